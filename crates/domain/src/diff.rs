//! Sparse call diffs and overridden calls
//!
//! An overridden call derives a complete request from a base call plus a
//! sparse diff. The effective fields are resolved once at construction;
//! only the diff itself (with the override's own title, description and
//! response) is ever serialized, keeping story documents compact and
//! re-diffable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::call::{AsCall, Call, normalize_map};
use crate::header::Headers;
use crate::response::Response;
use crate::template;
use crate::verb::Verb;

/// The sparse set of request fields an overridden call changes.
///
/// Absent fields mean "inherit from the base call". A field name not known
/// to the call model is carried in `extra` rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallDiff {
    /// Replacement URL, which may itself carry inline parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// URL parameters merged into the base's, each entry winning on
    /// collision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_parameters: Option<BTreeMap<String, String>>,
    /// Replacement verb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<Verb>,
    /// Replacement form body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<BTreeMap<String, String>>,
    /// Replacement media-type override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Replacement headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    /// Replacement actor label.
    #[serde(default, rename = "as_", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Replacement query mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, String>>,
    /// Fields the call model does not interpret, merged over the base's.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CallDiff {
    /// Creates an empty diff, which inherits everything from the base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Merges URL parameters over the base's.
    #[must_use]
    pub fn with_url_parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.url_parameters = Some(parameters);
        self
    }

    /// Merges one URL parameter over the base's.
    #[must_use]
    pub fn with_url_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces the verb.
    #[must_use]
    pub const fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = Some(verb);
        self
    }

    /// Replaces the form body.
    #[must_use]
    pub fn with_form(mut self, form: BTreeMap<String, String>) -> Self {
        self.form = Some(form);
        self
    }

    /// Replaces the media-type override.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Replaces the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Replaces the actor label.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Replaces the query mapping.
    #[must_use]
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Carries an uninterpreted field.
    #[must_use]
    pub fn with_extra_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Re-templates a diff URL and folds the extracted parameters into the
    /// diff.
    ///
    /// Parameters declared explicitly on the diff win over those extracted
    /// from its URL. Normalizing an already-normalized diff is a no-op, so
    /// diffs decoded from documents replay safely.
    #[must_use]
    fn normalized(mut self) -> Self {
        if let Some(url) = self.url.take() {
            let (rewritten, mut merged) = template::extract_url_parameters(&url);
            if let Some(explicit) = self.url_parameters.take() {
                merged.extend(explicit);
            }
            self.url = Some(rewritten);
            if !merged.is_empty() {
                self.url_parameters = Some(merged);
            }
        }
        self
    }
}

/// A call derived from a base call plus a sparse diff.
///
/// Holds the resolved effective call for invocation and the diff for
/// serialization. The base call is only read at construction; it is not
/// retained or mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct OverriddenCall {
    title: String,
    description: Option<String>,
    diff: CallDiff,
    call: Call,
    response: Option<Response>,
}

impl OverriddenCall {
    /// Derives a call from `base` with `diff` applied over it.
    #[must_use]
    pub fn derive(base: &Call, title: impl Into<String>, diff: CallDiff) -> Self {
        let title = title.into();
        let diff = diff.normalized();
        let call = resolve(base, &diff, &title, None);
        Self {
            title,
            description: None,
            diff,
            call,
            response: None,
        }
    }

    /// Sets the override's description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.call.description = Some(description.clone());
        self.description = Some(description);
        self
    }

    /// Attaches a captured response, replacing any previous one.
    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }

    /// The override's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The override's description, when present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The sparse diff this call was derived with.
    #[must_use]
    pub const fn diff(&self) -> &CallDiff {
        &self.diff
    }

    /// The resolved effective call.
    #[must_use]
    pub const fn call(&self) -> &Call {
        &self.call
    }

    /// The captured response, when one has been attached.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }
}

impl AsCall for OverriddenCall {
    fn as_call(&self) -> &Call {
        &self.call
    }
}

/// Applies `diff` over `base`, producing the effective call.
///
/// Every top-level field is replaced when the diff carries it;
/// `url_parameters` and the uninterpreted extra fields are merged entry by
/// entry, so an override can change one value without redeclaring the rest.
fn resolve(base: &Call, diff: &CallDiff, title: &str, description: Option<String>) -> Call {
    let mut url_parameters = base.url_parameters.clone();
    if let Some(parameters) = &diff.url_parameters {
        url_parameters.extend(parameters.clone());
    }

    let mut extra = base.extra.clone();
    extra.extend(diff.extra.clone());

    Call {
        title: title.to_string(),
        url: diff.url.clone().unwrap_or_else(|| base.url.clone()),
        url_parameters,
        verb: diff.verb.unwrap_or(base.verb),
        form: normalize_map(diff.form.clone().or_else(|| base.form.clone())),
        content_type: diff.content_type.clone().or_else(|| base.content_type.clone()),
        headers: diff.headers.clone().unwrap_or_else(|| base.headers.clone()),
        actor: diff.actor.clone().or_else(|| base.actor.clone()),
        query: normalize_map(diff.query.clone().or_else(|| base.query.clone())),
        description,
        extra,
        response: None,
    }
}
