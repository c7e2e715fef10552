use sqlx::PgPool;
use tracing::warn;

use crate::error::ApiError;
use crate::todos::repo::Todo;

/// Ownership guard: fetch the todo and check that it belongs to the
/// caller. Absent row and foreign row are distinct outcomes, and the
/// check runs fresh against the database on every call.
pub async fn authorize_access(db: &PgPool, user_id: i64, todo_id: i64) -> Result<Todo, ApiError> {
    let todo = Todo::find_by_id(db, todo_id).await?;
    decide_access(todo, user_id)
}

pub(crate) fn decide_access(todo: Option<Todo>, user_id: i64) -> Result<Todo, ApiError> {
    let todo = todo.ok_or(ApiError::TodoNotFound)?;
    if todo.user_id != user_id {
        warn!(
            todo_id = todo.id,
            owner = todo.user_id,
            caller = user_id,
            "ownership check failed"
        );
        return Err(ApiError::PermissionDenied);
    }
    Ok(todo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn make_todo(id: i64, user_id: i64) -> Todo {
        Todo {
            id,
            user_id,
            title: "sleep".into(),
            content: "sleep forever".into(),
            done: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn owner_passes_the_check() {
        let todo = decide_access(Some(make_todo(1, 7)), 7).expect("owner should pass");
        assert_eq!(todo.id, 1);
    }

    #[test]
    fn foreign_caller_is_denied_without_data() {
        let err = decide_access(Some(make_todo(1, 7)), 8).unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied));
    }

    #[test]
    fn absent_todo_is_not_found_not_denied() {
        let err = decide_access(None, 7).unwrap_err();
        assert!(matches!(err, ApiError::TodoNotFound));
    }
}
