//! Story document encoding and the file-backed store.
//!
//! A story encodes to one block-style YAML document with the `base_call`
//! and `calls` top-level keys. Encoding never mutates the story and can be
//! repeated; decoding replays each override diff against the decoded base
//! call.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use restory_domain::persistence::StoryDocument;
use restory_domain::{DomainError, Story};

use crate::serialization::{SerializationError, from_yaml, to_yaml_stable};

/// Errors from story encoding, decoding or storage.
#[derive(Debug, Error)]
pub enum StoryStoreError {
    /// Encoding or decoding the YAML document failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// Rebuilding domain values from a decoded document failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading or writing the story failed.
    #[error("story I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Encodes a story as YAML text.
///
/// # Errors
///
/// Returns an error when the document cannot be encoded.
pub fn dumps(story: &Story) -> Result<String, StoryStoreError> {
    Ok(to_yaml_stable(&story.to_document())?)
}

/// Encodes a story into a writer.
///
/// # Errors
///
/// Returns an error when encoding or writing fails.
pub fn dump<W: Write>(story: &Story, mut writer: W) -> Result<(), StoryStoreError> {
    writer.write_all(dumps(story)?.as_bytes())?;
    Ok(())
}

/// Decodes a story from YAML text.
///
/// # Errors
///
/// Returns an error when the text is not a valid story document or the
/// domain values cannot be rebuilt from it.
pub fn loads(text: &str) -> Result<Story, StoryStoreError> {
    let document: StoryDocument = from_yaml(text)?;
    Ok(Story::from_document(document)?)
}

/// Decodes a story from a reader.
///
/// # Errors
///
/// Returns an error when reading or decoding fails.
pub fn load<R: Read>(mut reader: R) -> Result<Story, StoryStoreError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    loads(&text)
}

/// Directory-backed story storage, one `.yml` file per story name.
pub struct StoryStore {
    root: PathBuf,
}

impl StoryStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoryStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file path a story name maps to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.yml"))
    }

    /// Saves a story under `name`, overwriting any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding or writing fails.
    pub fn save(&self, name: &str, story: &Story) -> Result<(), StoryStoreError> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "saving story");
        fs::write(path, dumps(story)?)?;
        Ok(())
    }

    /// Loads the story saved under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or decoded.
    pub fn load(&self, name: &str) -> Result<Story, StoryStoreError> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "loading story");
        loads(&fs::read_to_string(path)?)
    }
}
