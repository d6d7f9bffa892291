//! The top-level API definition.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::path::PathSegment;
use crate::types::OperationDescriptor;

/// A complete API definition: URI defaults, credential sources and the
/// ordered operation table.
///
/// The base URI of a client is assembled as
/// `<protocol>://<host>/<root_path>?format=json`; the three parts here are the
/// defaults, each overridable at client construction.
///
/// ## Examples
///
/// ```
/// use buildapi_define::{ApiDefinition, OperationDescriptor};
///
/// let api = ApiDefinition {
///     name: "SelfServe".to_string(),
///     description: "Build self-serve API".to_string(),
///     docs_url: None,
///     protocol: "https".to_string(),
///     host: "builds.example.com".to_string(),
///     root_path: "buildapi/self-serve".to_string(),
///     env_username: Some("BUILDAPI_USERNAME".to_string()),
///     env_password: Some("BUILDAPI_PASSWORD".to_string()),
///     operations: vec![OperationDescriptor::get("branches", &["branches"])],
/// };
///
/// assert!(api.validate().is_ok());
/// assert!(api.operation("branches").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDefinition {
    /// Name of the API.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Link to API documentation.
    #[serde(default)]
    pub docs_url: Option<String>,
    /// Default URI scheme (`https`).
    pub protocol: String,
    /// Default host.
    pub host: String,
    /// Default root path, without leading or trailing `/`.
    pub root_path: String,
    /// Environment variable holding the basic-auth username.
    #[serde(default)]
    pub env_username: Option<String>,
    /// Environment variable holding the basic-auth password.
    #[serde(default)]
    pub env_password: Option<String>,
    /// All operations, in table order.
    pub operations: Vec<OperationDescriptor>,
}

impl ApiDefinition {
    /// Looks up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// Checks the table for authoring mistakes.
    ///
    /// ## Errors
    ///
    /// Returns the first problem found:
    /// - an empty operation name
    /// - a duplicate operation name
    /// - an unnamed or repeated placeholder
    /// - body fields declared on a GET operation
    pub fn validate(&self) -> Result<(), DefinitionError> {
        validate_operations(&self.operations)
    }
}

/// Checks an operation table for authoring mistakes.
///
/// See [`ApiDefinition::validate`].
pub fn validate_operations(operations: &[OperationDescriptor]) -> Result<(), DefinitionError> {
    let mut names = HashSet::new();

    for (index, op) in operations.iter().enumerate() {
        if op.name.is_empty() {
            return Err(DefinitionError::EmptyName { index });
        }
        if !names.insert(op.name.as_str()) {
            return Err(DefinitionError::DuplicateName {
                name: op.name.clone(),
            });
        }

        let mut placeholders = HashSet::new();
        for segment in op.path.segments() {
            let PathSegment::Placeholder(name) = segment else {
                continue;
            };
            if name.is_empty() {
                return Err(DefinitionError::EmptyPlaceholder {
                    operation: op.name.clone(),
                });
            }
            if !placeholders.insert(name.as_str()) {
                return Err(DefinitionError::DuplicatePlaceholder {
                    operation: op.name.clone(),
                    placeholder: name.clone(),
                });
            }
        }

        if !op.method.is_mutating() && (!op.required.is_empty() || !op.optional.is_empty()) {
            return Err(DefinitionError::BodyFieldsOnRead {
                operation: op.name.clone(),
            });
        }
    }

    Ok(())
}
