//! Blocking reqwest transport
//!
//! Dispatches wire requests over HTTP with a blocking `reqwest` client.
//! Invocation is synchronous end to end, matching the single-threaded
//! recording model. HTTP error statuses come back as data in lenient mode;
//! only connection-level failures map to [`TransportError`].

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use restory_application::{RawResponse, Transport, TransportError};
use restory_domain::{Verb, WireRequest};

/// Transport backed by a blocking `reqwest` client.
///
/// Wire request URLs are paths; the transport resolves them against the
/// base URL of the application under test.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for the application served at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|error| TransportError::Other(error.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Uses an existing client, for custom timeout or TLS settings.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Resolves a wire request URL against the base URL. Absolute URLs are
    /// passed through untouched.
    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{url}", self.base_url.trim_end_matches('/'))
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &WireRequest, lenient: bool) -> Result<RawResponse, TransportError> {
        let url = self.absolute_url(&request.url);
        debug!(verb = %request.verb, %url, "dispatching request");

        let mut builder = self.client.request(to_method(request.verb), url.as_str());
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }
        // Explicit headers win over anything the body generated.
        for header in &request.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        let response = builder.send().map_err(|error| {
            warn!(%error, "transport failure");
            map_error(&error)
        })?;

        let status = response.status();
        if !lenient && (status.is_client_error() || status.is_server_error()) {
            return Err(TransportError::UnexpectedStatus(status.as_u16()));
        }

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|error| TransportError::Other(error.to_string()))?
            .to_vec();

        let status = status_line(status);
        debug!(%status, "response received");
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Converts a domain verb to a reqwest method.
fn to_method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
        Verb::Head => Method::HEAD,
        Verb::Options => Method::OPTIONS,
    }
}

/// Rebuilds the status line from the code and its canonical reason, e.g.
/// `200 OK`, or the bare code when no reason is defined.
fn status_line(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || status.as_u16().to_string(),
        |reason| format!("{} {reason}", status.as_u16()),
    )
}

/// Maps reqwest errors to transport errors.
fn map_error(error: &reqwest::Error) -> TransportError {
    if error.is_connect() || error.is_timeout() {
        TransportError::Connection(error.to_string())
    } else if error.is_builder() {
        TransportError::InvalidUrl(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
