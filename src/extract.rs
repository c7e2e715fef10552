use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON body extractor that runs payload validation before the handler
/// sees the value. Parse failures become `INVALID_JSON`, validation
/// failures become `VALIDATION_ERROR` with per-field details.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    use crate::auth::dto::RegisterRequest;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn parses_and_accepts_a_valid_payload() {
        let req = json_request(
            r#"{"email":"ken@ken.me","firstName":"Ken","lastName":"Chen","password":"secret99"}"#,
        );
        let ValidJson(payload) = ValidJson::<RegisterRequest>::from_request(req, &())
            .await
            .expect("payload should be accepted");
        assert_eq!(payload.email, "ken@ken.me");
        assert_eq!(payload.first_name, "Ken");
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let req = json_request("{not json");
        let err = ValidJson::<RegisterRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn rejects_invalid_fields_with_details() {
        let req = json_request(
            r#"{"email":"not-an-email","firstName":"Ken","lastName":"Chen","password":"ab"}"#,
        );
        let err = ValidJson::<RegisterRequest>::from_request(req, &())
            .await
            .unwrap_err();
        match err {
            ApiError::Validation(details) => {
                assert!(details.contains_key("email"));
                assert!(details.contains_key("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
