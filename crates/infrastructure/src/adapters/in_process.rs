//! In-process application transport
//!
//! Wraps a handler function standing in for the application under test, so
//! stories can be recorded without a listening socket. The handler receives
//! the built wire request and answers with raw response parts, exactly like
//! a remote application would through a real transport.

use restory_application::{RawResponse, Transport, TransportError};
use restory_domain::WireRequest;

/// Transport dispatching requests to an in-process handler.
pub struct InProcessTransport<F>
where
    F: Fn(&WireRequest) -> Result<RawResponse, TransportError>,
{
    handler: F,
}

impl<F> InProcessTransport<F>
where
    F: Fn(&WireRequest) -> Result<RawResponse, TransportError>,
{
    /// Wraps the handler.
    pub const fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> Transport for InProcessTransport<F>
where
    F: Fn(&WireRequest) -> Result<RawResponse, TransportError>,
{
    fn send(&self, request: &WireRequest, lenient: bool) -> Result<RawResponse, TransportError> {
        let response = (self.handler)(request)?;
        if !lenient {
            if let Some(code) = leading_status_code(&response.status) {
                if code >= 400 {
                    return Err(TransportError::UnexpectedStatus(code));
                }
            }
        }
        Ok(response)
    }
}

/// The numeric code at the start of a status line, when parseable.
fn leading_status_code(status: &str) -> Option<u16> {
    status.split(' ').next().and_then(|token| token.parse().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restory_domain::Call;

    fn teapot(_request: &WireRequest) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status: "418 I'm a teapot".to_string(),
            headers: Vec::new(),
            body: b"short and stout".to_vec(),
        })
    }

    #[test]
    fn test_lenient_mode_passes_error_statuses_through() {
        let transport = InProcessTransport::new(teapot);
        let request = Call::new("brew", "/coffee").wire_request();
        let response = transport.send(&request, true).unwrap();
        assert_eq!(response.status, "418 I'm a teapot");
    }

    #[test]
    fn test_strict_mode_rejects_error_statuses() {
        let transport = InProcessTransport::new(teapot);
        let request = Call::new("brew", "/coffee").wire_request();
        let result = transport.send(&request, false);
        assert_eq!(result, Err(TransportError::UnexpectedStatus(418)));
    }

    #[test]
    fn test_handler_failure_propagates() {
        let transport = InProcessTransport::new(|_request: &WireRequest| {
            Err(TransportError::Connection("handler went away".to_string()))
        });
        let request = Call::new("gone", "/").wire_request();
        assert!(matches!(
            transport.send(&request, true),
            Err(TransportError::Connection(_))
        ));
    }
}
