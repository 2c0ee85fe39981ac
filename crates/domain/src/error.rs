//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during parsing or validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The first token of a response status line is not a numeric code.
    #[error("invalid status line: {0:?}")]
    InvalidStatusLine(String),

    /// A serialized header line is missing the `Name: Value` separator.
    #[error("invalid header line: {0:?}")]
    InvalidHeaderLine(String),

    /// The HTTP verb is not supported.
    #[error("unsupported HTTP verb: {0}")]
    UnsupportedVerb(String),

    /// A response body is not valid UTF-8 text.
    #[error("response body is not valid UTF-8")]
    BodyNotText(#[from] std::str::Utf8Error),

    /// A response body is not a valid JSON document.
    #[error("response body is not valid JSON: {0}")]
    BodyNotJson(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
