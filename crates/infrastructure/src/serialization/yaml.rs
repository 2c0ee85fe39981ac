//! YAML serialization helpers for stable story documents.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    Serialize(serde_yaml::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Deserialize(serde_yaml::Error),
}

/// Serializes a value to block-style YAML.
///
/// Key order follows struct declaration order, so two dumps of equal
/// values are byte-identical and two story documents diff cleanly with a
/// line-based differ.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    serde_yaml::to_string(value).map_err(SerializationError::Serialize)
}

/// Deserializes a value from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or doesn't match the expected
/// type.
pub fn from_yaml<T: DeserializeOwned>(text: &str) -> Result<T, SerializationError> {
    serde_yaml::from_str(text).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_output_is_block_style_with_trailing_newline() {
        let mut map = BTreeMap::new();
        map.insert("title", "get user");
        map.insert("url", "/users/:user_id");

        let yaml = to_yaml_stable(&map).unwrap();
        assert!(yaml.ends_with('\n'));
        assert!(!yaml.contains('{'));
        assert!(yaml.contains("title: get user"));
    }

    #[test]
    fn test_equal_values_dump_identically() {
        let mut map = BTreeMap::new();
        map.insert("a", vec!["x", "y"]);
        assert_eq!(to_yaml_stable(&map).unwrap(), to_yaml_stable(&map.clone()).unwrap());
    }

    #[test]
    fn test_round_trip() {
        let mut original = BTreeMap::new();
        original.insert("key".to_string(), "value".to_string());

        let yaml = to_yaml_stable(&original).unwrap();
        let restored: BTreeMap<String, String> = from_yaml(&yaml).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let result: Result<BTreeMap<String, String>, _> = from_yaml(": not yaml :");
        assert!(result.is_err());
    }
}
