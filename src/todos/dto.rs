use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for creating a todo.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 666, message = "must be between 1 and 666 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 6666, message = "must be between 1 and 6666 characters"))]
    pub content: String,
}

/// Request body for a full update; `done` is set explicitly.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 666, message = "must be between 1 and 666 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 6666, message = "must be between 1 and 6666 characters"))]
    pub content: String,
    pub done: bool,
}

/// Payload returned after creating a todo.
#[derive(Debug, Serialize)]
pub struct CreatedTodo {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_oversized_title() {
        let payload = CreateTodoRequest {
            title: "x".repeat(667),
            content: "content".into(),
        };
        let errs = payload.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("title"));
    }

    #[test]
    fn create_rejects_empty_fields() {
        let payload = CreateTodoRequest {
            title: "".into(),
            content: "".into(),
        };
        let errs = payload.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("content"));
    }

    #[test]
    fn update_accepts_a_well_formed_payload() {
        let payload = UpdateTodoRequest {
            title: "sleep".into(),
            content: "sleep forever".into(),
            done: true,
        };
        assert!(payload.validate().is_ok());
    }
}
