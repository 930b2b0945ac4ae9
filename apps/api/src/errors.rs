use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::content_client::ContentError;
use crate::forms::FieldError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid form: {0:?}")]
    InvalidForm(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Content API error: {0}")]
    Upstream(String),
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match &err {
            ContentError::Api { status, message } => match *status {
                400 => AppError::Validation(message.clone()),
                401 | 403 => AppError::Unauthorized(message.clone()),
                404 => AppError::NotFound(message.clone()),
                _ => AppError::Upstream(err.to_string()),
            },
            ContentError::Http(_) => AppError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidForm(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Please fill all the required fields.".to_string(),
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                if msg.is_empty() {
                    "Authentication required".to_string()
                } else {
                    msg.clone()
                },
            ),
            AppError::Upstream(msg) => {
                tracing::error!("Content API error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The content service is unavailable".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::InvalidForm(fields) = &self {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_content_status_mapping() {
        let api = |status| ContentError::Api {
            status,
            message: "msg".to_string(),
        };
        assert!(matches!(AppError::from(api(400)), AppError::Validation(_)));
        assert!(matches!(AppError::from(api(401)), AppError::Unauthorized(_)));
        assert!(matches!(AppError::from(api(403)), AppError::Unauthorized(_)));
        assert!(matches!(AppError::from(api(404)), AppError::NotFound(_)));
        assert!(matches!(AppError::from(api(500)), AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_leaked() {
        let (status, body) = body_of(AppError::Upstream("db password wrong".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert!(!body.to_string().contains("password"));
    }

    #[tokio::test]
    async fn test_invalid_form_lists_fields() {
        let (status, body) = body_of(AppError::InvalidForm(vec![FieldError::new(
            "skills",
            "This field is required.",
        )]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["fields"][0]["field"], "skills");
        assert_eq!(body["error"]["fields"][0]["message"], "This field is required.");
    }

    #[tokio::test]
    async fn test_unauthorized_default_message() {
        let (status, body) = body_of(AppError::Unauthorized(String::new())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_no_variant_answers_with_a_bare_500() {
        let variants = [
            AppError::NotFound("x".to_string()),
            AppError::Validation("x".to_string()),
            AppError::InvalidForm(Vec::new()),
            AppError::Unauthorized("x".to_string()),
            AppError::Upstream("x".to_string()),
        ];
        for err in variants {
            let (status, body) = body_of(err).await;
            assert_ne!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body["error"]["code"].is_string());
        }
    }
}
