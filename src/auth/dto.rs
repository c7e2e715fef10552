use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for user registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 666, message = "must be between 1 and 666 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 666, message = "must be between 1 and 666 characters"))]
    pub last_name: String,
    #[validate(length(min = 6, max = 12, message = "must be between 6 and 12 characters"))]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, max = 12, message = "must be between 6 and 12 characters"))]
    pub password: String,
}

/// Payload returned on successful login.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
}
