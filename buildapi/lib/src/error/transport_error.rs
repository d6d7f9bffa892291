//! HTTP transport errors.

use thiserror::Error;

/// The HTTP exchange itself failed.
///
/// Covers connection, DNS, TLS and body-read failures. HTTP status codes are
/// not errors at this layer; the dispatcher interprets the body regardless.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request failed inside `reqwest`.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A non-reqwest transport could not complete the exchange.
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
            Self::Connection(_) => false,
        }
    }

    /// Returns `true` if no connection could be established.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect(),
            Self::Connection(_) => true,
        }
    }
}
