//! Doorward — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use doorward_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::InvalidIdentity(_) => (StatusCode::BAD_REQUEST, "invalid_identity"),
            DomainError::InvalidLocation(_) => (StatusCode::BAD_REQUEST, "invalid_location"),
            DomainError::InvalidFormat => (StatusCode::BAD_REQUEST, "invalid_format"),
            DomainError::UnknownLocation(_) => (StatusCode::NOT_FOUND, "unknown_location"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_invalid_identity_maps_to_400() {
        assert_eq!(
            status_of(DomainError::InvalidIdentity("steve".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_location_maps_to_400() {
        assert_eq!(
            status_of(DomainError::InvalidLocation("empty".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_format_maps_to_400() {
        assert_eq!(
            status_of(DomainError::InvalidFormat),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unknown_location_maps_to_404() {
        assert_eq!(
            status_of(DomainError::UnknownLocation("unknown-loc".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("lock poisoned".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
