use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::member::MemberError;
use thiserror::Error;
use tracing::{debug, error};

/// Error body returned to clients: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed(allowed: &str) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, format!("{allowed} method only"))
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<MemberError> for JsonApiError {
    fn from(e: MemberError) -> Self {
        match e {
            MemberError::Validation(msg) => JsonApiError::bad_request(msg),
            MemberError::NotFound => JsonApiError::not_found(e.to_string()),
            MemberError::Repository(_) => {
                // detail stays in the log
                error!(code = e.code(), err = %e, "member operation failed");
                JsonApiError::internal()
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(err = %rejection.body_text(), "rejected json body");
        JsonApiError::bad_request("Invalid JSON")
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(err = %rejection.body_text(), "rejected query string");
        JsonApiError::bad_request("Invalid query parameters")
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        // non-numeric ids cannot name a member
        debug!(err = %rejection.body_text(), "rejected path");
        JsonApiError::not_found("Member not found")
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
