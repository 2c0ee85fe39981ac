//! Story persistence

mod story;

pub use story::{StoryStore, StoryStoreError, dump, dumps, load, loads};
