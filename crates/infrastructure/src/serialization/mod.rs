//! Serialization helpers

mod yaml;

pub use yaml::{SerializationError, from_yaml, to_yaml_stable};
