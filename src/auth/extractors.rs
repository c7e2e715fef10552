use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts and verifies the bearer token, yielding the caller's user ID.
///
/// Every failure mode (missing header, bad scheme, bad signature, expiry)
/// rejects with the same uniform message so token internals do not leak.
#[derive(Debug)]
pub struct AuthUser(pub i64);

const REJECTION: ApiError = ApiError::Unauthorized("missing or invalid token");

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(REJECTION)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(REJECTION)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token verification failed");
            REJECTION
        })?;

        Ok(AuthUser(claims.sub))
    }
}
