//! Run-call use case

use restory_domain::{AsCall, Headers, Response};

use crate::error::ApplicationResult;
use crate::ports::Transport;

/// Invokes a single call against the application under test.
///
/// The transport runs in lenient mode, so a 404 or 500 comes back as a
/// populated [`Response`]; only structural transport failures and
/// unparseable transport output are errors. The call itself is not
/// touched; attaching the response is the caller's decision.
pub struct RunCall<T: Transport> {
    transport: T,
}

impl<T: Transport> RunCall<T> {
    /// Creates the use case around a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Builds the wire request for `call`, dispatches it and parses the
    /// raw output into a response.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails structurally or when its
    /// output cannot be parsed into a response.
    pub fn run(&self, call: &impl AsCall) -> ApplicationResult<Response> {
        let request = call.as_call().wire_request();
        let raw = self.transport.send(&request, true)?;
        let response = Response::new(raw.status, Headers::from_pairs(raw.headers), Some(raw.body))?;
        Ok(response)
    }
}
