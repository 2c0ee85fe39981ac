//! Response document type

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::header::Headers;
use crate::response::Response;

/// The serialized form of a captured response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDocument {
    /// The raw status line, e.g. `200 OK`.
    pub status: String,
    /// Headers as `Name: Value` lines; omitted when there are none.
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    /// The body as text; omitted when the body is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Response {
    /// Converts the response to its document form.
    ///
    /// The body is rendered with lossy UTF-8 decoding so serialization
    /// cannot fail; the dumped text is authoritative from then on.
    #[must_use]
    pub fn to_document(&self) -> ResponseDocument {
        ResponseDocument {
            status: self.status().to_string(),
            headers: self.headers().clone(),
            body: self
                .body()
                .map(|body| String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Rebuilds a response from its document form.
    ///
    /// # Errors
    ///
    /// Fails when the recorded status line cannot be parsed.
    pub fn from_document(document: ResponseDocument) -> DomainResult<Self> {
        Self::new(
            document.status,
            document.headers,
            document.body.map(String::into_bytes),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::header::Header;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_omits_absent_parts() {
        let response = Response::new("204", Headers::new(), None).unwrap();
        let json = serde_json::to_value(response.to_document()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "204"}));
    }

    #[test]
    fn test_document_round_trip() {
        let response = Response::new(
            "200 OK",
            vec![Header::new("Content-Type", "application/json; charset=utf-8")],
            Some(br#"{"ok": true}"#.to_vec()),
        )
        .unwrap();

        let document = response.to_document();
        let restored = Response::from_document(document.clone()).unwrap();

        assert_eq!(restored, response);
        assert_eq!(restored.to_document(), document);
        assert_eq!(restored.encoding(), Some("utf-8"));
    }
}
