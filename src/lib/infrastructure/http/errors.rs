//! API error-handling module

use std::fmt;

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::contact::errors::ContactError;

/// Longest provider error body we echo back to the client
pub const DETAIL_MAX_CHARS: usize = 500;

/// Headers set on every response of the API
///
/// Responses carry form-submission outcomes and must never be cached.
pub fn response_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        ),
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
    ]
}

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for errors
    #[schema(example = false)]
    pub ok: bool,

    /// The visitor-facing error message
    #[schema(example = "Invalid JSON")]
    pub error: String,

    /// Diagnostic detail, present only for provider rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,

    /// Diagnostic detail, capped at [`DETAIL_MAX_CHARS`]
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail: None,
        }
    }

    /// Create a new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            response_headers(),
            Json(ErrorResponse {
                ok: false,
                error: self.message,
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        let status = match &err {
            ContactError::InvalidBody
            | ContactError::MessageTooShort
            | ContactError::MessageTooLong
            | ContactError::InvalidEmail => StatusCode::BAD_REQUEST,
            ContactError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ContactError::SendFailed { .. } => StatusCode::BAD_GATEWAY,
        };

        let message = err.to_string();

        let detail = match err {
            ContactError::SendFailed {
                detail: Some(detail),
            } if !detail.is_empty() => Some(truncate_detail(detail)),
            _ => None,
        };

        Self {
            status,
            message,
            detail,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::new_500(&err.to_string())
    }
}

fn truncate_detail(detail: String) -> String {
    if detail.chars().count() <= DETAIL_MAX_CHARS {
        detail
    } else {
        detail.chars().take(DETAIL_MAX_CHARS).collect()
    }
}
