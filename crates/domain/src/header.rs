//! HTTP header collection
//!
//! Headers are an ordered sequence of name/value pairs. Names are matched
//! case-insensitively for lookup and replacement while the supplied casing
//! is preserved in output. Duplicate names are allowed; collapsing repeated
//! headers is a caller decision, not something this collection imposes.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// A single HTTP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The header name, with its supplied casing.
    pub name: String,
    /// The header value.
    pub value: String,
}

impl Header {
    /// Creates a header from a name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Renders the header in `Name: Value` form, the serialized shape.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }

    /// Parses a `Name: Value` line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidHeaderLine` when the line has no colon.
    pub fn parse_line(line: &str) -> DomainResult<Self> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| DomainError::InvalidHeaderLine(line.to_string()))?;
        Ok(Self::new(name.trim(), value.trim_start()))
    }
}

/// An ordered collection of HTTP headers.
///
/// Serializes as a sequence of `Name: Value` strings; deserialization also
/// accepts name/value pairs. Both forms normalize to the same collection,
/// and normalizing an already-normalized collection is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a collection from name/value pairs, preserving order.
    pub fn from_pairs<N, V, I>(pairs: I) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (N, V)>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Header::new(name, value))
            .collect()
    }

    /// Builds a collection from `Name: Value` lines.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidHeaderLine` for a line without a colon.
    pub fn from_lines<S, I>(lines: I) -> DomainResult<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        lines
            .into_iter()
            .map(|line| Header::parse_line(line.as_ref()))
            .collect()
    }

    /// Appends a header, keeping any existing entries with the same name.
    pub fn push(&mut self, header: Header) {
        self.items.push(header);
    }

    /// The first value for `name`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Every value for `name` in order, matched case-insensitively.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.items
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Removes every header matching `name`, case-insensitively.
    pub fn remove(&mut self, name: &str) {
        self.items.retain(|h| !h.name.eq_ignore_ascii_case(name));
    }

    /// Replaces every header matching `name` with a single trailing entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let header = Header::new(name, value);
        self.remove(&header.name);
        self.items.push(header);
    }

    /// Iterates over the headers in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.items.iter()
    }

    /// The headers rendered as `Name: Value` lines.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.items.iter().map(Header::to_line).collect()
    }

    /// The number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<Header>> for Headers {
    fn from(items: Vec<Header>) -> Self {
        Self { items }
    }
}

impl From<Vec<(String, String)>> for Headers {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<BTreeMap<String, String>> for Headers {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter().map(Header::to_line))
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Entry {
            Line(String),
            Pair(String, String),
        }

        Vec::<Entry>::deserialize(deserializer)?
            .into_iter()
            .map(|entry| match entry {
                Entry::Line(line) => Header::parse_line(&line).map_err(D::Error::custom),
                Entry::Pair(name, value) => Ok(Header::new(name, value)),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.push(Header::new("Content-Type", "application/json"));
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(headers.get("Accept"), None);
    }

    #[test]
    fn test_casing_is_preserved() {
        let headers = Headers::from_pairs([("X-CuStOm", "1")]);
        assert_eq!(headers.to_lines(), vec!["X-CuStOm: 1".to_string()]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let headers = Headers::from_pairs([("Set-Cookie", "a=1"), ("Set-Cookie", "b=2")]);
        let values: Vec<_> = headers.get_all("set-cookie").collect();
        assert_eq!(values, vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_set_replaces_all_matches() {
        let mut headers =
            Headers::from_pairs([("content-type", "text/plain"), ("Content-Type", "text/html")]);
        headers.set("Content-Type", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_line_round_trip_is_idempotent() {
        let headers = Headers::from_pairs([("Authorization", "Bearer abc"), ("Accept", "*/*")]);
        let reparsed = Headers::from_lines(headers.to_lines()).unwrap();
        assert_eq!(reparsed, headers);
        assert_eq!(reparsed.to_lines(), headers.to_lines());
    }

    #[test]
    fn test_line_without_colon_is_rejected() {
        let result = Header::parse_line("not a header");
        assert!(matches!(result, Err(DomainError::InvalidHeaderLine(_))));
    }

    #[test]
    fn test_serde_round_trip_as_lines() {
        let headers = Headers::from_pairs([("Accept", "application/json")]);
        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"["Accept: application/json"]"#);
        let back: Headers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, headers);
    }

    #[test]
    fn test_deserialize_accepts_pairs() {
        let back: Headers = serde_json::from_str(r#"[["Accept", "*/*"]]"#).unwrap();
        assert_eq!(back.get("accept"), Some("*/*"));
    }
}
