//! Core types for operation descriptors.
//!
//! - [`RestMethod`] - HTTP method enumeration
//! - [`OperationDescriptor`] - A single remote operation

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::path::PathTemplate;

/// HTTP methods used by the self-serve API.
///
/// Parsing is case-insensitive because descriptor tables have historically
/// spelled methods both as `GET` and `get`. Display is always uppercase.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use buildapi_define::RestMethod;
///
/// assert_eq!(RestMethod::from_str("delete").unwrap(), RestMethod::Delete);
/// assert_eq!(RestMethod::Post.to_string(), "POST");
/// assert!(RestMethod::Put.is_mutating());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RestMethod {
    /// HTTP GET - Read a resource; the JSON body is returned verbatim
    Get,
    /// HTTP POST - Submit new work (rebuilds, new builds)
    Post,
    /// HTTP PUT - Modify an existing request (reprioritize)
    Put,
    /// HTTP DELETE - Cancel a build, request or revision
    Delete,
}

impl RestMethod {
    /// Returns `true` for methods that change server state.
    ///
    /// Mutating calls send a form body, enforce required body fields and
    /// return a status envelope rather than a raw JSON document.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl<'de> Deserialize<'de> for RestMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::unknown_variant(&raw, &["GET", "POST", "PUT", "DELETE"]))
    }
}

/// A single remote operation.
///
/// The descriptor is static data: it says where the operation lives, which
/// HTTP method it uses, and which body fields a mutating call must carry.
///
/// ## Path Parameters
///
/// Placeholder segments (`:branch_id`) are filled, left to right, by the
/// positional arguments of a call. The number of placeholders is therefore
/// the number of positional arguments the operation accepts.
///
/// ## Examples
///
/// ```
/// use buildapi_define::{OperationDescriptor, RestMethod};
///
/// let op = OperationDescriptor::put("reprioritizeBuild", &[":branch_id", "build", ":build_id"])
///     .with_required(&["priority"])
///     .with_description("Change the priority of a pending build");
///
/// assert_eq!(op.method, RestMethod::Put);
/// assert_eq!(op.arity(), 2);
/// assert!(op.required.contains(&"priority".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Unique name of the operation (e.g. `getBuildInfo`).
    pub name: String,
    /// Path template relative to the API root.
    pub path: PathTemplate,
    /// HTTP method for this operation.
    pub method: RestMethod,
    /// Body fields a mutating call must supply.
    #[serde(default, alias = "require")]
    pub required: Vec<String>,
    /// Body fields a mutating call may supply. Informational only.
    #[serde(default)]
    pub optional: Vec<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl OperationDescriptor {
    /// Creates a descriptor with no body fields.
    pub fn new(name: impl Into<String>, method: RestMethod, path: &[&str]) -> Self {
        Self {
            name: name.into(),
            path: PathTemplate::from_segments(path),
            method,
            required: Vec::new(),
            optional: Vec::new(),
            description: String::new(),
        }
    }

    /// Creates a GET descriptor.
    pub fn get(name: impl Into<String>, path: &[&str]) -> Self {
        Self::new(name, RestMethod::Get, path)
    }

    /// Creates a POST descriptor.
    pub fn post(name: impl Into<String>, path: &[&str]) -> Self {
        Self::new(name, RestMethod::Post, path)
    }

    /// Creates a PUT descriptor.
    pub fn put(name: impl Into<String>, path: &[&str]) -> Self {
        Self::new(name, RestMethod::Put, path)
    }

    /// Creates a DELETE descriptor.
    pub fn delete(name: impl Into<String>, path: &[&str]) -> Self {
        Self::new(name, RestMethod::Delete, path)
    }

    /// Sets the required body fields.
    pub fn with_required(mut self, fields: &[&str]) -> Self {
        self.required = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Sets the optional body fields.
    pub fn with_optional(mut self, fields: &[&str]) -> Self {
        self.optional = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of positional arguments a call must supply.
    pub fn arity(&self) -> usize {
        self.path.placeholder_count()
    }
}
