//! Transport port
//!
//! Abstracts the application under test: given a fully built request, a
//! transport returns the raw status line, header pairs and body bytes. In
//! lenient mode HTTP failures are data to record, never errors; only
//! structural failures (the connection itself, an uninterpretable request)
//! error out.

use restory_domain::WireRequest;
use thiserror::Error;

/// Raw output of a dispatched request, before any domain parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// The status line, e.g. `200 OK`, or a bare code like `204`.
    pub status: String,
    /// Header pairs in arrival order, duplicates preserved.
    pub headers: Vec<(String, String)>,
    /// The body bytes; empty when the response had none.
    pub body: Vec<u8>,
}

/// Structural transport failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request URL could not be interpreted by the transport.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The connection to the application failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// An error status came back while lenient mode was off.
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    /// Any other structural failure.
    #[error("transport failure: {0}")]
    Other(String),
}

/// Port for dispatching a built request against the application under
/// test.
pub trait Transport {
    /// Sends the request and returns the raw response.
    ///
    /// With `lenient` set, non-2xx/3xx statuses are returned as data.
    /// Without it, an error status becomes
    /// [`TransportError::UnexpectedStatus`].
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for structural failures; these always
    /// propagate regardless of `lenient`.
    fn send(&self, request: &WireRequest, lenient: bool) -> Result<RawResponse, TransportError>;
}
