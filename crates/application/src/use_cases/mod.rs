//! Use cases for invoking calls and recording stories

mod record_story;
mod run_call;

pub use record_story::RecordStory;
pub use run_call::RunCall;
