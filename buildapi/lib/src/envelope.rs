//! Response shapes.
//!
//! Reads return whatever JSON the API sent. Mutations return a status
//! envelope, `{"status": "OK", "request_id": 42, "msg": "..."}`, which is
//! normalized into [`Outcome::Accepted`] or an API error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Identifier the API assigns to queued work.
///
/// The API returns integers; text ids are accepted for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id.
    Number(u64),
    /// Textual id.
    Text(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The status envelope returned by mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// `"OK"` on success; anything else is a failure.
    pub status: String,
    /// Id of the queued request, when there is one.
    #[serde(default)]
    pub request_id: Option<RequestId>,
    /// Human-readable result or failure reason.
    #[serde(default)]
    pub msg: Option<String>,
}

impl ResponseEnvelope {
    /// The status value that marks success.
    pub const OK: &'static str = "OK";

    /// Returns `true` if the API accepted the request.
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

/// The successful result of an operation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A read: the parsed JSON body, verbatim.
    Read(Value),
    /// A mutation the API accepted.
    Accepted {
        /// Id of the queued request, when the API returned one.
        request_id: Option<RequestId>,
        /// The API's message.
        msg: String,
    },
}

impl Outcome {
    /// The JSON body of a read.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Read(value) => Some(value),
            Self::Accepted { .. } => None,
        }
    }

    /// Consumes the outcome, returning the JSON body of a read.
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Read(value) => Some(value),
            Self::Accepted { .. } => None,
        }
    }

    /// The request id of an accepted mutation.
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            Self::Accepted { request_id, .. } => request_id.as_ref(),
            Self::Read(_) => None,
        }
    }

    /// The message of an accepted mutation.
    pub fn msg(&self) -> Option<&str> {
        match self {
            Self::Accepted { msg, .. } => Some(msg),
            Self::Read(_) => None,
        }
    }

    /// A JSON rendering of the outcome, for display.
    ///
    /// Reads render as their body; accepted mutations as
    /// `{"request_id": ..., "msg": ...}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Read(value) => value.clone(),
            Self::Accepted { request_id, msg } => json!({
                "request_id": request_id,
                "msg": msg,
            }),
        }
    }
}
