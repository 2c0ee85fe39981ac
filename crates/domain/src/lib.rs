//! Restory Domain - HTTP call stories as pure values
//!
//! This crate defines the core model for recording and replaying HTTP
//! interactions: a fully specified base [`Call`], sparse [`CallDiff`]s
//! deriving [`OverriddenCall`] variants from it, the captured [`Response`]s
//! and the [`Story`] that binds them together with a serializable document
//! form. All types here are pure Rust values with no I/O dependencies.

pub mod call;
pub mod diff;
pub mod error;
pub mod header;
pub mod persistence;
pub mod response;
pub mod story;
pub mod template;
pub mod verb;

pub use call::{AsCall, Call, WireRequest};
pub use diff::{CallDiff, OverriddenCall};
pub use error::{DomainError, DomainResult};
pub use header::{Header, Headers};
pub use response::Response;
pub use story::Story;
pub use verb::Verb;
