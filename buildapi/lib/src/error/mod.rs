//! Layered error types for the client.
//!
//! - [`BuildApiError`] - Everything a single operation call can fail with
//! - [`TransportError`] - Failures of the underlying HTTP exchange
//! - [`ConfigError`] - Client construction failures

mod call_error;
mod config_error;
mod transport_error;

pub use call_error::{BuildApiError, ErrorKind};
pub use config_error::ConfigError;
pub use transport_error::TransportError;
