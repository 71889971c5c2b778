//! Error types for the docket ecosystem.

use thiserror::Error;

/// Errors that can occur in docket operations.
#[derive(Error, Debug)]
pub enum DocketError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Store returned status {status}: {detail}")]
    StoreStatus { status: u16, detail: String },

    #[error("Causelist service returned status {status}")]
    Endpoint { status: u16 },

    #[error("Invalid response payload: {0}")]
    Payload(String),
}

/// Result type alias for docket operations.
pub type DocketResult<T> = Result<T, DocketError>;
