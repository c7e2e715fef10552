use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success half of the response envelope: `{"success": true, "message", "data"?}`.
#[derive(Debug)]
pub struct ApiSuccess<T = ()> {
    status: StatusCode,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct SuccessBody<T: Serialize> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl ApiSuccess<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn data(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = Json(SuccessBody {
            success: true,
            message: self.message,
            data: self.data,
        });
        (self.status, body).into_response()
    }
}
