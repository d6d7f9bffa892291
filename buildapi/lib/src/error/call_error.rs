//! Errors returned by operation calls.

use strum::{Display, IntoStaticStr};
use thiserror::Error;

use super::TransportError;
use crate::envelope::RequestId;

/// Everything a single operation call can fail with.
///
/// Every variant is delivered as the `Err` of the awaited call; nothing is
/// raised before the call's future runs, and nothing is retried.
///
/// ## Examples
///
/// ```rust,ignore
/// use buildapi::BuildApiError;
///
/// match client.call("cancelBuild", ["try", "123"]).await {
///     Ok(outcome) => println!("{}", outcome.to_json()),
///     Err(BuildApiError::Api { message, .. }) => eprintln!("refused: {message}"),
///     Err(e) if e.is_local() => eprintln!("bad call: {e}"),
///     Err(e) => eprintln!("failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum BuildApiError {
    /// The positional arguments do not match the path placeholders.
    #[error("incorrect number of arguments for {operation}: expected {expected}, got {actual}")]
    Argument {
        /// The operation called.
        operation: String,
        /// Placeholder count of the operation's path.
        expected: usize,
        /// Positional arguments supplied.
        actual: usize,
    },

    /// A positional value is a `.` or `..` path segment, which would move
    /// the request off its path template.
    #[error("invalid path argument {value:?} at position {position} for {operation}: dot segments are not allowed")]
    InvalidPathArgument {
        /// The operation called.
        operation: String,
        /// Zero-based index of the offending positional argument.
        position: usize,
        /// The rejected value.
        value: String,
    },

    /// A mutating call is missing a required body field.
    #[error("missing required body parameter `{field}` for {operation}")]
    MissingParameter {
        /// The operation called.
        operation: String,
        /// The first required field found missing.
        field: String,
    },

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON, or not a valid status envelope
    /// for a mutating call.
    #[error("failed to decode response from {operation} (HTTP {status}): {source}")]
    Decode {
        /// The operation called.
        operation: String,
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The API reported a non-`OK` status for a mutating call.
    ///
    /// Displays as the API's own message.
    #[error("{message}")]
    Api {
        /// The operation called.
        operation: String,
        /// The status string the API returned.
        status: String,
        /// The API's explanation.
        message: String,
        /// Request id, if the API returned one.
        request_id: Option<RequestId>,
    },

    /// No operation with this name exists on the client.
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// The name looked up.
        name: String,
    },
}

/// Coarse classification of a [`BuildApiError`], for logs and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// See [`BuildApiError::Argument`].
    Argument,
    /// See [`BuildApiError::InvalidPathArgument`].
    InvalidPathArgument,
    /// See [`BuildApiError::MissingParameter`].
    MissingParameter,
    /// See [`BuildApiError::Transport`].
    Transport,
    /// See [`BuildApiError::Decode`].
    Decode,
    /// See [`BuildApiError::Api`].
    Api,
    /// See [`BuildApiError::UnknownOperation`].
    UnknownOperation,
}

impl BuildApiError {
    /// The error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Argument { .. } => ErrorKind::Argument,
            Self::InvalidPathArgument { .. } => ErrorKind::InvalidPathArgument,
            Self::MissingParameter { .. } => ErrorKind::MissingParameter,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Api { .. } => ErrorKind::Api,
            Self::UnknownOperation { .. } => ErrorKind::UnknownOperation,
        }
    }

    /// Returns `true` if the error was detected before any network access.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Argument { .. }
                | Self::InvalidPathArgument { .. }
                | Self::MissingParameter { .. }
                | Self::UnknownOperation { .. }
        )
    }

    /// The raw response body, for errors that have one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}
