//! Errors raised while building or loading descriptor tables.

use thiserror::Error;

/// The number of positional values did not match a template's placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} path argument(s), got {actual}")]
pub struct ArityMismatch {
    /// Placeholder count of the template.
    pub expected: usize,
    /// Number of values supplied.
    pub actual: usize,
}

/// A descriptor table is malformed.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// An operation has an empty name.
    #[error("Operation at index {index} has an empty name")]
    EmptyName {
        /// Position of the offending descriptor in the table.
        index: usize,
    },

    /// Two operations share a name.
    #[error("Duplicate operation name: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A placeholder segment has no name (a bare `:`).
    #[error("Operation {operation} has an unnamed path placeholder")]
    EmptyPlaceholder {
        /// The operation whose template is invalid.
        operation: String,
    },

    /// A placeholder name appears twice in one template.
    #[error("Operation {operation} repeats path placeholder :{placeholder}")]
    DuplicatePlaceholder {
        /// The operation whose template is invalid.
        operation: String,
        /// The repeated placeholder name.
        placeholder: String,
    },

    /// A GET operation declares body fields.
    #[error("Operation {operation} is a GET but declares body fields")]
    BodyFieldsOnRead {
        /// The offending operation.
        operation: String,
    },

    /// JSON table could not be parsed.
    #[error("JSON table parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML table could not be parsed.
    #[error("YAML table parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_display() {
        let err = ArityMismatch {
            expected: 2,
            actual: 0,
        };
        assert_eq!(err.to_string(), "expected 2 path argument(s), got 0");
    }

    #[test]
    fn duplicate_placeholder_display() {
        let err = DefinitionError::DuplicatePlaceholder {
            operation: "getRevInfo".to_string(),
            placeholder: "revision".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Operation getRevInfo repeats path placeholder :revision"
        );
    }
}
