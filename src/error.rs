use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for every handler. Each variant carries a fixed
/// error code and maps to one HTTP status in `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot parse json body")]
    InvalidJson(String),

    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("this todo belongs to another user")]
    PermissionDenied,

    #[error("user not found")]
    UserNotFound,

    #[error("todo not found")]
    TodoNotFound,

    #[error("email already registered")]
    EmailTaken,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String, Option<Value>) {
        match self {
            ApiError::InvalidJson(detail) => (
                StatusCode::BAD_REQUEST,
                "INVALID_JSON",
                "cannot parse json body".into(),
                Some(Value::String(detail)),
            ),
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "validation failed".into(),
                Some(json!(fields)),
            ),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.into(), None)
            }
            ApiError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "PERMISSION_DENIED",
                "this todo belongs to another user".into(),
                None,
            ),
            ApiError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "user not found".into(),
                None,
            ),
            ApiError::TodoNotFound => (
                StatusCode::NOT_FOUND,
                "TODO_NOT_FOUND",
                "todo not found".into(),
                None,
            ),
            ApiError::EmailTaken => (
                StatusCode::CONFLICT,
                "EMAIL_TAKEN",
                "email already registered".into(),
                None,
            ),
            ApiError::Internal(err) => {
                // Log the cause, never send it to the client
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "something went wrong".into(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();
        let body = Json(ErrorResponse {
            success: false,
            error: ErrorBody {
                code,
                message,
                details,
            },
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.constraint().map_or(false, |c| c.contains("email")) {
                return ApiError::EmailTaken;
            }
        }
        ApiError::Internal(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        ApiError::InvalidJson(rej.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errs: validator::ValidationErrors) -> Self {
        let details = errs
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let reason = errors
                    .first()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    })
                    .unwrap_or_else(|| "invalid".to_string());
                (field.to_string(), reason)
            })
            .collect();
        ApiError::Validation(details)
    }
}
