use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    extract::ValidJson,
    response::ApiSuccess,
    state::AppState,
    todos::{
        dto::{CreateTodoRequest, CreatedTodo, UpdateTodoRequest},
        guard::authorize_access,
        repo::Todo,
    },
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", post(create_todo).get(list_todos))
        .route("/todos/:id", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/todos/:id/done", patch(mark_done))
}

/// The path id is parsed by hand so a non-numeric segment yields the
/// validation envelope instead of axum's bare rejection.
fn parse_todo_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        let mut details = BTreeMap::new();
        details.insert("id".to_string(), "must be a number".to_string());
        ApiError::Validation(details)
    })
}

/// The row can vanish between the ownership guard and the mutation;
/// zero touched rows degrades to NotFound.
fn require_row(rows: u64) -> Result<(), ApiError> {
    if rows == 0 {
        return Err(ApiError::TodoNotFound);
    }
    Ok(())
}

#[instrument(skip(state, payload))]
async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(payload): ValidJson<CreateTodoRequest>,
) -> ApiResult<ApiSuccess<CreatedTodo>> {
    let todo = Todo::create(&state.db, user_id, &payload.title, &payload.content).await?;
    info!(user_id, todo_id = todo.id, "todo created");
    Ok(ApiSuccess::data(
        StatusCode::CREATED,
        "todo created",
        CreatedTodo { id: todo.id },
    ))
}

#[instrument(skip(state))]
async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<ApiSuccess<Vec<Todo>>> {
    let todos = Todo::list_by_owner(&state.db, user_id).await?;
    Ok(ApiSuccess::data(StatusCode::OK, "todos fetched", todos))
}

#[instrument(skip(state))]
async fn get_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiSuccess<Todo>> {
    let id = parse_todo_id(&id)?;
    let todo = authorize_access(&state.db, user_id, id).await?;
    Ok(ApiSuccess::data(StatusCode::OK, "todo fetched", todo))
}

#[instrument(skip(state, payload))]
async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateTodoRequest>,
) -> ApiResult<ApiSuccess> {
    let id = parse_todo_id(&id)?;
    authorize_access(&state.db, user_id, id).await?;

    let rows = Todo::update_by_id(&state.db, id, &payload.title, &payload.content, payload.done)
        .await?;
    require_row(rows)?;

    info!(user_id, todo_id = id, "todo updated");
    Ok(ApiSuccess::message(StatusCode::OK, "todo updated"))
}

#[instrument(skip(state))]
async fn mark_done(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiSuccess> {
    let id = parse_todo_id(&id)?;
    authorize_access(&state.db, user_id, id).await?;

    let rows = Todo::mark_done_by_id(&state.db, id).await?;
    require_row(rows)?;

    info!(user_id, todo_id = id, "todo marked done");
    Ok(ApiSuccess::message(StatusCode::OK, "todo marked done"))
}

#[instrument(skip(state))]
async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiSuccess> {
    let id = parse_todo_id(&id)?;
    authorize_access(&state.db, user_id, id).await?;

    let rows = Todo::delete_by_id(&state.db, id).await?;
    require_row(rows)?;

    info!(user_id, todo_id = id, "todo deleted");
    Ok(ApiSuccess::message(StatusCode::OK, "todo deleted"))
}
