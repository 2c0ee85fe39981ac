//! The response model
//!
//! Wraps the raw status line, the header collection and the body as they
//! came back from the transport, deriving the parsed status code and
//! content type at construction. Responses are immutable; HTTP failures are
//! ordinary responses here, not errors.

use crate::error::{DomainError, DomainResult};
use crate::header::Headers;

/// A captured HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: String,
    status_code: u16,
    status_text: Option<String>,
    headers: Headers,
    body: Option<Vec<u8>>,
    content_type: Option<String>,
    encoding: Option<String>,
}

impl Response {
    /// Parses raw transport output into a response.
    ///
    /// The body is normalized so it is either absent or non-empty. The
    /// content type and encoding are derived from the first
    /// `Content-Type` header (matched case-insensitively) of the form
    /// `type/subtype[; charset=X]`; a header that does not match the
    /// pattern leaves both absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusLine` when the first token of the
    /// status line is not a numeric status code. Status lines come from the
    /// trusted transport, so no further recovery is attempted.
    pub fn new(
        status: impl Into<String>,
        headers: impl Into<Headers>,
        body: Option<Vec<u8>>,
    ) -> DomainResult<Self> {
        let status = status.into();
        let headers = headers.into();
        let (status_code, status_text) = parse_status_line(&status)?;
        let (content_type, encoding) = headers
            .get("Content-Type")
            .map_or((None, None), parse_content_type);

        Ok(Self {
            status,
            status_code,
            status_text,
            headers,
            body: body.filter(|b| !b.is_empty()),
            content_type,
            encoding,
        })
    }

    /// The raw status line, e.g. `200 OK`.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The numeric status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The status line after the code, when the line carried any text.
    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    /// The response headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body bytes; absent when the response had no body.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The media type parsed from the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The charset parsed from the `Content-Type` header.
    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// The body decoded as UTF-8 text, when a body is present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BodyNotText` when the body is not valid UTF-8.
    pub fn text(&self) -> DomainResult<Option<&str>> {
        self.body
            .as_deref()
            .map(std::str::from_utf8)
            .transpose()
            .map_err(DomainError::from)
    }

    /// The body parsed as a JSON document, when a body is present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BodyNotJson` when the body does not parse.
    pub fn json(&self) -> DomainResult<Option<serde_json::Value>> {
        self.body
            .as_deref()
            .map(|body| {
                serde_json::from_slice(body)
                    .map_err(|error| DomainError::BodyNotJson(error.to_string()))
            })
            .transpose()
    }
}

/// Splits a status line into its numeric code and optional trailing text.
fn parse_status_line(status: &str) -> DomainResult<(u16, Option<String>)> {
    let invalid = || DomainError::InvalidStatusLine(status.to_string());
    match status.split_once(' ') {
        Some((code, text)) => Ok((code.parse().map_err(|_| invalid())?, Some(text.to_string()))),
        None => Ok((status.parse().map_err(|_| invalid())?, None)),
    }
}

/// Parses `type/subtype[; charset=X]`, tolerating trailing content.
///
/// The type and subtype are runs of word characters; anything after them
/// that is not a charset parameter is ignored, and a value that does not
/// start with `type/subtype` yields neither part.
fn parse_content_type(value: &str) -> (Option<String>, Option<String>) {
    let type_len = word_len(value);
    if type_len == 0 {
        return (None, None);
    }
    let Some(after_type) = value[type_len..].strip_prefix('/') else {
        return (None, None);
    };
    let subtype_len = word_len(after_type);
    if subtype_len == 0 {
        return (None, None);
    }

    let content_type = value[..type_len + 1 + subtype_len].to_string();
    let encoding = after_type[subtype_len..]
        .strip_prefix(';')
        .map(|rest| rest.strip_prefix(char::is_whitespace).unwrap_or(rest))
        .and_then(|rest| rest.strip_prefix("charset="))
        .filter(|charset| !charset.is_empty())
        .map(ToString::to_string);

    (Some(content_type), encoding)
}

/// Length of the leading run of word characters.
fn word_len(input: &str) -> usize {
    input
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(input.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::header::Header;
    use pretty_assertions::assert_eq;

    fn plain(status: &str) -> Response {
        Response::new(status, Headers::new(), None).unwrap()
    }

    #[test]
    fn test_status_line_with_text() {
        let response = plain("200 OK");
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.status_text(), Some("OK"));
    }

    #[test]
    fn test_status_line_with_multi_word_text() {
        let response = plain("500 Internal Server Error");
        assert_eq!(response.status_code(), 500);
        assert_eq!(response.status_text(), Some("Internal Server Error"));
    }

    #[test]
    fn test_bare_status_code() {
        let response = plain("204");
        assert_eq!(response.status_code(), 204);
        assert_eq!(response.status_text(), None);
    }

    #[test]
    fn test_malformed_status_line_is_rejected() {
        let result = Response::new("OK 200", Headers::new(), None);
        assert!(matches!(result, Err(DomainError::InvalidStatusLine(_))));
    }

    #[test]
    fn test_content_type_with_charset() {
        let headers = vec![Header::new("Content-Type", "application/json; charset=utf-8")];
        let response = Response::new("200 OK", headers, None).unwrap();
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.encoding(), Some("utf-8"));
    }

    #[test]
    fn test_content_type_without_charset() {
        let headers = vec![Header::new("Content-Type", "text/plain")];
        let response = Response::new("200 OK", headers, None).unwrap();
        assert_eq!(response.content_type(), Some("text/plain"));
        assert_eq!(response.encoding(), None);
    }

    #[test]
    fn test_content_type_without_space_before_charset() {
        let headers = vec![Header::new("content-type", "text/html;charset=iso-8859-1")];
        let response = Response::new("200 OK", headers, None).unwrap();
        assert_eq!(response.content_type(), Some("text/html"));
        assert_eq!(response.encoding(), Some("iso-8859-1"));
    }

    #[test]
    fn test_unparseable_content_type_is_ignored() {
        let headers = vec![Header::new("Content-Type", "nonsense")];
        let response = Response::new("200 OK", headers, None).unwrap();
        assert_eq!(response.content_type(), None);
        assert_eq!(response.encoding(), None);
    }

    #[test]
    fn test_empty_body_is_absent() {
        let response = Response::new("200 OK", Headers::new(), Some(Vec::new())).unwrap();
        assert_eq!(response.body(), None);
        assert_eq!(response.text().unwrap(), None);
    }

    #[test]
    fn test_text_and_json_accessors() {
        let body = br#"{"id": 7}"#.to_vec();
        let response = Response::new("200 OK", Headers::new(), Some(body)).unwrap();
        assert_eq!(response.text().unwrap(), Some(r#"{"id": 7}"#));
        assert_eq!(response.json().unwrap(), Some(serde_json::json!({"id": 7})));
    }

    #[test]
    fn test_invalid_utf8_body_errors_on_text() {
        let response = Response::new("200 OK", Headers::new(), Some(vec![0xff, 0xfe])).unwrap();
        assert!(matches!(response.text(), Err(DomainError::BodyNotText(_))));
    }
}
