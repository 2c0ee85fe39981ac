//! Ports to the world outside the application layer

mod transport;

pub use transport::{RawResponse, Transport, TransportError};
