//! Application error types

use restory_domain::DomainError;
use thiserror::Error;

use crate::ports::TransportError;

/// Application-level errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// Parsing the transport output into domain values failed.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The transport failed structurally. HTTP error statuses never take
    /// this path; they come back as captured responses.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
