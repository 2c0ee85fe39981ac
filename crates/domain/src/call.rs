//! The call model
//!
//! A [`Call`] is one fully specified HTTP request together with the
//! response captured for it. Calls are immutable values: construction
//! normalizes the URL and the header/query collections, builders return new
//! values, and a captured response is attached with
//! [`Call::with_response`] rather than by mutating shared state.

use std::collections::BTreeMap;

use serde_json::Value;
use url::form_urlencoded;

use crate::header::{Header, Headers};
use crate::response::Response;
use crate::template;
use crate::verb::Verb;

/// One HTTP interaction: the request fields plus the captured response.
///
/// The URL never contains the raw `name: value` syntax after construction;
/// inline parameters are extracted into `url_parameters` and the URL keeps
/// the `/:name` placeholder form.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) url_parameters: BTreeMap<String, String>,
    pub(crate) verb: Verb,
    pub(crate) form: Option<BTreeMap<String, String>>,
    pub(crate) content_type: Option<String>,
    pub(crate) headers: Headers,
    pub(crate) actor: Option<String>,
    pub(crate) query: Option<BTreeMap<String, String>>,
    pub(crate) description: Option<String>,
    pub(crate) extra: BTreeMap<String, Value>,
    pub(crate) response: Option<Response>,
}

impl Call {
    /// Creates a call for `url`, extracting any inline URL parameters.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let (url, url_parameters) = template::extract_url_parameters(&url.into());
        Self {
            title: title.into(),
            url,
            url_parameters,
            verb: Verb::default(),
            form: None,
            content_type: None,
            headers: Headers::new(),
            actor: None,
            query: None,
            description: None,
            extra: BTreeMap::new(),
            response: None,
        }
    }

    /// Sets the HTTP verb.
    #[must_use]
    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    /// Declares one URL parameter explicitly, overriding an extracted value
    /// of the same name.
    #[must_use]
    pub fn with_url_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_parameters.insert(name.into(), value.into());
        self
    }

    /// Declares URL parameters explicitly; each overrides an extracted
    /// value of the same name.
    #[must_use]
    pub fn with_url_parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.url_parameters.extend(parameters);
        self
    }

    /// Sets the form body. An empty map counts as no body.
    #[must_use]
    pub fn with_form(mut self, form: BTreeMap<String, String>) -> Self {
        self.form = normalize_map(Some(form));
        self
    }

    /// Overrides the media type of the body at invocation time.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Appends one header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Sets the actor label (the identity the call is performed as). Only
    /// recorded in documents; invocation ignores it.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Sets the query mapping. An empty map counts as no query.
    #[must_use]
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = normalize_map(Some(query));
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Carries an uninterpreted field through serialization.
    #[must_use]
    pub fn with_extra_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Attaches a captured response, replacing any previous one.
    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }

    /// The call title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The URL in placeholder form.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL parameters, extracted and declared.
    #[must_use]
    pub const fn url_parameters(&self) -> &BTreeMap<String, String> {
        &self.url_parameters
    }

    /// The HTTP verb.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// The form body, when present.
    #[must_use]
    pub const fn form(&self) -> Option<&BTreeMap<String, String>> {
        self.form.as_ref()
    }

    /// The media-type override, when present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The actor label, when present.
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// The query mapping, when present.
    #[must_use]
    pub const fn query(&self) -> Option<&BTreeMap<String, String>> {
        self.query.as_ref()
    }

    /// The description, when present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Uninterpreted fields carried through serialization.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// The captured response, when one has been attached.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Builds the request handed to a transport.
    ///
    /// Appends the URL-encoded query string when a query is present, and
    /// applies the `content_type` override by replacing any existing
    /// `Content-Type` header with it.
    #[must_use]
    pub fn wire_request(&self) -> WireRequest {
        let url = self.query.as_ref().map_or_else(
            || self.url.clone(),
            |query| {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish();
                format!("{}?{encoded}", self.url)
            },
        );

        let mut headers = self.headers.clone();
        if let Some(content_type) = &self.content_type {
            headers.set("Content-Type", content_type);
        }

        WireRequest {
            verb: self.verb,
            url,
            headers,
            form: self.form.clone(),
        }
    }
}

/// The fully built request a transport dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// The HTTP verb.
    pub verb: Verb,
    /// The URL, with the query string appended when one exists.
    pub url: String,
    /// The headers, with the content-type override already applied.
    pub headers: Headers,
    /// The form body parameters, when present.
    pub form: Option<BTreeMap<String, String>>,
}

/// Uniform access to the effective request of plain and derived calls.
pub trait AsCall {
    /// The call whose fields describe the request to perform.
    fn as_call(&self) -> &Call;
}

impl AsCall for Call {
    fn as_call(&self) -> &Call {
        self
    }
}

/// Treats an empty map as absent, per the query normalization contract.
pub(crate) fn normalize_map(
    map: Option<BTreeMap<String, String>>,
) -> Option<BTreeMap<String, String>> {
    map.filter(|m| !m.is_empty())
}
