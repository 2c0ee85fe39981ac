//! Call and override document types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::call::{Call, normalize_map};
use crate::diff::{CallDiff, OverriddenCall};
use crate::error::DomainResult;
use crate::header::Headers;
use crate::response::Response;
use crate::template;
use crate::verb::Verb;

use super::response::ResponseDocument;

/// The serialized form of a fully specified call.
///
/// `title`, `url` and `verb` are always written; everything else only when
/// present. The media-type override is invocation-only state and is never
/// part of a call document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallDocument {
    /// The call title.
    pub title: String,
    /// The URL in placeholder form.
    pub url: String,
    /// The HTTP verb; a document without one means GET.
    #[serde(default)]
    pub verb: Verb,
    /// URL parameters; omitted when there are none.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub url_parameters: BTreeMap<String, String>,
    /// The form body, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<BTreeMap<String, String>>,
    /// Headers as `Name: Value` lines; omitted when there are none.
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    /// The actor label, when present.
    #[serde(default, rename = "as_", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// The query mapping, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, String>>,
    /// The description, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The captured response, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseDocument>,
    /// Uninterpreted fields, carried through unchanged.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Call {
    /// Converts the call to its document form.
    #[must_use]
    pub fn to_document(&self) -> CallDocument {
        CallDocument {
            title: self.title.clone(),
            url: self.url.clone(),
            verb: self.verb,
            url_parameters: self.url_parameters.clone(),
            form: self.form.clone(),
            headers: self.headers.clone(),
            actor: self.actor.clone(),
            query: self.query.clone(),
            description: self.description.clone(),
            response: self.response.as_ref().map(Response::to_document),
            extra: self.extra.clone(),
        }
    }

    /// Rebuilds a call from its document form, re-running the same
    /// normalization construction applies: URL templating, explicit
    /// parameters over extracted ones, empty maps as absent.
    ///
    /// # Errors
    ///
    /// Fails when a recorded response cannot be rebuilt.
    pub fn from_document(document: CallDocument) -> DomainResult<Self> {
        let response = document.response.map(Response::from_document).transpose()?;
        let (url, mut url_parameters) = template::extract_url_parameters(&document.url);
        url_parameters.extend(document.url_parameters);

        Ok(Self {
            title: document.title,
            url,
            url_parameters,
            verb: document.verb,
            form: normalize_map(document.form),
            content_type: None,
            headers: document.headers,
            actor: document.actor,
            query: normalize_map(document.query),
            description: document.description,
            extra: document.extra,
            response,
        })
    }
}

/// The serialized form of an overridden call: its title, the sparse diff
/// and the captured response. The resolved effective fields are never
/// written; decoding replays the diff against the same base call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideDocument {
    /// The override's title.
    pub title: String,
    /// The sparse diff, flattened into the document.
    #[serde(flatten)]
    pub diff: CallDiff,
    /// The override's description, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The captured response, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseDocument>,
}

impl OverriddenCall {
    /// Converts the override to its document form.
    #[must_use]
    pub fn to_document(&self) -> OverrideDocument {
        OverrideDocument {
            title: self.title().to_string(),
            diff: self.diff().clone(),
            description: self.description().map(ToString::to_string),
            response: self.response().map(Response::to_document),
        }
    }

    /// Replays a document's diff against `base`, rebuilding the same
    /// effective call that existed before serialization.
    ///
    /// # Errors
    ///
    /// Fails when a recorded response cannot be rebuilt.
    pub fn from_document(base: &Call, document: OverrideDocument) -> DomainResult<Self> {
        let mut call = Self::derive(base, document.title, document.diff);
        if let Some(description) = document.description {
            call = call.with_description(description);
        }
        match document.response.map(Response::from_document).transpose()? {
            Some(response) => Ok(call.with_response(response)),
            None => Ok(call),
        }
    }
}
