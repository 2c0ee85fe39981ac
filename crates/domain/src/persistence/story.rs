//! Story document type

use serde::{Deserialize, Serialize};

use crate::call::Call;
use crate::diff::OverriddenCall;
use crate::error::DomainResult;
use crate::story::Story;

use super::call::{CallDocument, OverrideDocument};

/// The serialized form of a story: the base call document plus the
/// override documents, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    /// The base call.
    pub base_call: CallDocument,
    /// The overridden variants. Always written, possibly empty.
    #[serde(default)]
    pub calls: Vec<OverrideDocument>,
}

impl Story {
    /// Converts the story to its document form.
    #[must_use]
    pub fn to_document(&self) -> StoryDocument {
        StoryDocument {
            base_call: self.base_call.to_document(),
            calls: self.calls.iter().map(OverriddenCall::to_document).collect(),
        }
    }

    /// Rebuilds a story from its document form: the base call first, then
    /// each override replayed against it. A document without `calls`
    /// yields a story with no variants.
    ///
    /// # Errors
    ///
    /// Fails when the base call or any override cannot be rebuilt.
    pub fn from_document(document: StoryDocument) -> DomainResult<Self> {
        let base_call = Call::from_document(document.base_call)?;
        let calls = document
            .calls
            .into_iter()
            .map(|call| OverriddenCall::from_document(&base_call, call))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { base_call, calls })
    }
}
