//! API error types and JSON response formatting.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::blog::{BlogId, BlogIdError, ValidationError};
use crate::store::StoreError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details in the response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// No blog with this id.
    pub fn blog_not_found(id: &BlogId) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "BLOG_NOT_FOUND",
            format!("Blog '{}' not found", id),
        )
        .with_details(serde_json::json!({ "id": id }))
    }

    /// A path segment that cannot be a blog id.
    pub fn malformatted_id(err: &BlogIdError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "MALFORMATTED_ID", err.to_string())
            .with_details(serde_json::json!({ "id": err.0 }))
    }

    /// A blog body missing `title` or `url`.
    pub fn validation(err: &ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            .with_details(serde_json::json!({ "field": err.field() }))
    }

    /// A body that is not the JSON we expect.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_JSON", message)
    }

    /// A body axum refused to decode.
    ///
    /// A missing `Content-Type: application/json` keeps axum's 415. Syntax
    /// and data errors (such as negative `likes`) are 400.
    pub fn json_rejection(rejection: &JsonRejection) -> Self {
        let err = Self::invalid_json(rejection.body_text());
        match rejection {
            JsonRejection::MissingJsonContentType(_) => err.with_status(rejection.status()),
            _ => err,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "request failed");
        } else {
            tracing::debug!(status = %self.status, code = self.code, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Invalid(e) => Self::validation(e),
            StoreError::NotInitialized(path) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_NOT_INITIALIZED",
                format!("Blog store at '{}' is not initialized", path),
            ),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<BlogIdError> for ApiError {
    fn from(err: BlogIdError) -> Self {
        Self::malformatted_id(&err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::json_rejection(&rejection)
    }
}
