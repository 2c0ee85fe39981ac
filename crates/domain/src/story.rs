//! The story model
//!
//! A story is one base call plus the ordered variants derived from it.
//! Serializing a story never mutates it and can be repeated any number of
//! times.

use crate::call::Call;
use crate::diff::{CallDiff, OverriddenCall};

/// One base call and its overridden variants, each paired with the
/// response captured for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// The canonical request the variants are diffed against.
    pub base_call: Call,
    /// The derived variants, in invocation order.
    pub calls: Vec<OverriddenCall>,
}

impl Story {
    /// Creates a story around a base call, with no variants yet.
    #[must_use]
    pub const fn new(base_call: Call) -> Self {
        Self {
            base_call,
            calls: Vec::new(),
        }
    }

    /// Derives a variant of this story's base call.
    ///
    /// The variant is returned rather than appended so the author can
    /// finish it (description, response) before [`Story::push`]ing it.
    #[must_use]
    pub fn derive(&self, title: impl Into<String>, diff: CallDiff) -> OverriddenCall {
        OverriddenCall::derive(&self.base_call, title, diff)
    }

    /// Appends a variant.
    pub fn push(&mut self, call: OverriddenCall) {
        self.calls.push(call);
    }
}
