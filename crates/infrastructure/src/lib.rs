//! Restory Infrastructure - adapters and persistence
//!
//! Concrete implementations behind the application ports: the in-process
//! and blocking-HTTP transports, the stable YAML encoder and the
//! file-backed story store.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{InProcessTransport, ReqwestTransport};
pub use persistence::{StoryStore, StoryStoreError, dump, dumps, load, loads};
pub use serialization::{SerializationError, from_yaml, to_yaml_stable};
