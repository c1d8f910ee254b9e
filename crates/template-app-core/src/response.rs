//! Response payloads that are checked against their declared shape.
//!
//! A handler returning [`ValidatedJson`] has its payload validated with
//! [`validator::Validate`] when the response is built. A payload that fails
//! produces a 500 response tagged with a [`ResponseValidationError`]
//! extension, which the response-validation middleware picks up, logs, and
//! replaces with a generic error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use validator::{Validate, ValidationErrors};

/// Marker stored in response extensions when an outgoing payload failed validation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("response failed validation")]
pub struct ResponseValidationError {
    pub errors: ValidationErrors,
}

impl ResponseValidationError {
    pub fn new(errors: ValidationErrors) -> Self {
        Self { errors }
    }
}

/// JSON response whose body must pass [`Validate`] before it is sent.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> IntoResponse for ValidatedJson<T>
where
    T: Serialize + Validate,
{
    fn into_response(self) -> Response {
        match self.0.validate() {
            Ok(()) => Json(self.0).into_response(),
            Err(errors) => {
                let marker = ResponseValidationError::new(errors.clone());
                // Raw body, only seen by clients when the interceptor is not installed.
                let body = Json(json!({
                    "error": "Response validation failed",
                    "details": errors,
                }));
                let mut response = (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
                response.extensions_mut().insert(marker);
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[derive(Serialize, Validate)]
    struct Message {
        #[validate(length(min = 1))]
        message: String,
    }

    #[tokio::test]
    async fn test_valid_payload_is_plain_json() {
        let response = ValidatedJson(Message {
            message: "Hello World".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .extensions()
                .get::<ResponseValidationError>()
                .is_none()
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Hello World" }));
    }

    #[test]
    fn test_invalid_payload_is_tagged() {
        let response = ValidatedJson(Message {
            message: String::new(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let marker = response
            .extensions()
            .get::<ResponseValidationError>()
            .expect("marker extension");
        assert!(marker.errors.field_errors().contains_key("message"));
    }
}
