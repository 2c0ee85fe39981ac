//! Record-story use case

use restory_domain::Story;

use crate::error::ApplicationResult;
use crate::ports::Transport;

use super::run_call::RunCall;

/// Invokes every call of a story in order and attaches the observed
/// responses.
///
/// Recording consumes the story and returns a new one; the input parts are
/// never mutated in place. Re-recording a story overwrites the previously
/// attached responses.
pub struct RecordStory<T: Transport> {
    runner: RunCall<T>,
}

impl<T: Transport> RecordStory<T> {
    /// Creates the use case around a transport.
    pub const fn new(transport: T) -> Self {
        Self {
            runner: RunCall::new(transport),
        }
    }

    /// Runs the base call first, then each variant in order, and returns
    /// the story with every response attached.
    ///
    /// # Errors
    ///
    /// Returns the first structural failure; calls after it are not
    /// invoked.
    pub fn record(&self, story: Story) -> ApplicationResult<Story> {
        let Story { base_call, calls } = story;

        let response = self.runner.run(&base_call)?;
        let base_call = base_call.with_response(response);

        let mut recorded = Vec::with_capacity(calls.len());
        for call in calls {
            let response = self.runner.run(&call)?;
            recorded.push(call.with_response(response));
        }

        Ok(Story {
            base_call,
            calls: recorded,
        })
    }
}
