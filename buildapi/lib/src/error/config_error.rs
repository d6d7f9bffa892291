//! Client construction errors.

use buildapi_define::DefinitionError;
use thiserror::Error;

/// Errors building a client.
///
/// These indicate programmer or configuration mistakes and surface before
/// any operation can be called.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The protocol is not a valid URI scheme.
    #[error("Invalid protocol: {protocol:?}")]
    InvalidProtocol {
        /// The protocol as supplied.
        protocol: String,
    },

    /// A required configuration field is missing or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The operation table is malformed.
    #[error("Invalid operation table: {0}")]
    InvalidDefinition(#[from] DefinitionError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("host");
        assert_eq!(err.to_string(), "Missing required field: host");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_definition() {
        let err: ConfigError = DefinitionError::DuplicateName {
            name: "jobs".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid operation table: Duplicate operation name: jobs"
        );
    }
}
