use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginData, LoginRequest, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::{ApiError, ApiResult},
    extract::ValidJson,
    response::ApiSuccess,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/me", get(me))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<RegisterRequest>,
) -> ApiResult<ApiSuccess> {
    payload.email = payload.email.trim().to_lowercase();

    // The unique index on users.email is the backstop for races
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.email,
        &payload.first_name,
        &payload.last_name,
        &hash,
    )
    .await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(ApiSuccess::message(StatusCode::CREATED, "user registered"))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<LoginRequest>,
) -> ApiResult<ApiSuccess<LoginData>> {
    payload.email = payload.email.trim().to_lowercase();

    // Same response for unknown email and wrong password
    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        warn!(email = %payload.email, "login with unknown email");
        return Err(ApiError::Unauthorized("invalid email or password"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::Unauthorized("invalid email or password"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(ApiSuccess::data(
        StatusCode::OK,
        "login successful",
        LoginData { token },
    ))
}

#[instrument(skip(state))]
async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<ApiSuccess<User>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    Ok(ApiSuccess::data(StatusCode::OK, "user data fetched", user))
}
