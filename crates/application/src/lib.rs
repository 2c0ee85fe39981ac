//! Restory Application - ports and use cases
//!
//! The application layer connects the pure domain model to the world: the
//! [`Transport`] port stands in for the application under test, and the
//! use cases invoke single calls or record whole stories through it.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{RawResponse, Transport, TransportError};
pub use use_cases::{RecordStory, RunCall};
