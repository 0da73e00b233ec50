//! Client error types.

use sparkreceipt_core::calendar::CalendarError;
use sparkreceipt_core::invoice::InvoiceError;
use sparkreceipt_core::records::ValidationError;
use sparkreceipt_core::storage::{DateRangeError, StoreError};
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Receipt extraction failed: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Store(inner) => inner,
            ClientError::ServerError { status, message } => {
                StoreError::Rejected { status, message }
            }
            ClientError::NotFound { resource } => StoreError::NotFound {
                collection: "record",
                id: resource,
            },
            ClientError::Json(e) => StoreError::Serialization(e.to_string()),
            ClientError::InvalidResponse(message) => StoreError::InvalidData(message),
            other => StoreError::ConnectionFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_rejected() {
        let err: StoreError = ClientError::ServerError {
            status: 400,
            message: "bad column".to_string(),
        }
        .into();
        assert_eq!(
            err,
            StoreError::Rejected {
                status: 400,
                message: "bad column".to_string()
            }
        );
    }

    #[test]
    fn test_store_error_round_trips_unchanged() {
        let original = StoreError::InvalidData("empty".to_string());
        let err: StoreError = ClientError::Store(original.clone()).into();
        assert_eq!(err, original);
    }

    #[test]
    fn test_io_error_maps_to_connection_failed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.jpg");
        let err: StoreError = ClientError::Io(io).into();
        assert!(matches!(err, StoreError::ConnectionFailed(_)));
    }
}
