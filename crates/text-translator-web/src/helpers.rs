//! Error mapping for JSON API handlers.
//!
//! Converts core errors into HTTP responses with `{"error": message}`
//! bodies, keeping route handlers free of status-code boilerplate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use text_translator_core::{Error, ErrorKind};

/// Standard result type for JSON API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An API error with an HTTP status and a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err.kind() {
            // Caller can fix the input
            ErrorKind::EmptyInput | ErrorKind::InvalidRecord => StatusCode::BAD_REQUEST,
            // Upstream provider failed; retryable
            ErrorKind::Provider => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_maps_to_bad_request() {
        let api_err = ApiError::from(Error::EmptyInput);
        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert!(api_err.message.contains("empty"));
    }

    #[test]
    fn test_provider_error_maps_to_bad_gateway() {
        let api_err = ApiError::from(Error::Provider("quota exceeded".into()));
        assert_eq!(api_err.status, StatusCode::BAD_GATEWAY);
        assert!(api_err.message.contains("quota exceeded"));
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let api_err = ApiError::from(Error::CacheInit("locked".into()));
        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
