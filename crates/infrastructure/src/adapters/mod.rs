//! Transport adapters

mod in_process;
mod reqwest_transport;

pub use in_process::InProcessTransport;
pub use reqwest_transport::ReqwestTransport;
