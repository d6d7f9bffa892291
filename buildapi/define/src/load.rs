//! Loading operation tables from JSON and YAML.
//!
//! Loaded tables are normalized (method casing, `require` -> `required`)
//! by the serde layer and then validated.

use crate::api::{ApiDefinition, validate_operations};
use crate::error::DefinitionError;
use crate::types::OperationDescriptor;

impl ApiDefinition {
    /// Parses and validates a complete definition from JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`DefinitionError::Json`] on malformed input, or the first
    /// validation problem in the operation table.
    pub fn from_json_str(text: &str) -> Result<Self, DefinitionError> {
        let api: Self = serde_json::from_str(text)?;
        api.validate()?;
        Ok(api)
    }

    /// Parses and validates a complete definition from YAML.
    ///
    /// ## Errors
    ///
    /// Returns [`DefinitionError::Yaml`] on malformed input, or the first
    /// validation problem in the operation table.
    pub fn from_yaml_str(text: &str) -> Result<Self, DefinitionError> {
        let api: Self = serde_yaml::from_str(text)?;
        api.validate()?;
        Ok(api)
    }
}

/// Parses and validates a JSON array of operation descriptors.
///
/// ## Errors
///
/// Returns [`DefinitionError::Json`] if the text is not a valid table, or a
/// validation error (see [`crate::ApiDefinition::validate`]).
pub fn operations_from_json(text: &str) -> Result<Vec<OperationDescriptor>, DefinitionError> {
    let operations: Vec<OperationDescriptor> = serde_json::from_str(text)?;
    validate_operations(&operations)?;
    Ok(operations)
}

/// Parses and validates a YAML sequence of operation descriptors.
///
/// ## Errors
///
/// Returns [`DefinitionError::Yaml`] if the text is not a valid table, or a
/// validation error (see [`crate::ApiDefinition::validate`]).
pub fn operations_from_yaml(text: &str) -> Result<Vec<OperationDescriptor>, DefinitionError> {
    let operations: Vec<OperationDescriptor> = serde_yaml::from_str(text)?;
    validate_operations(&operations)?;
    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RestMethod;

    #[test]
    fn json_table_with_mixed_conventions() {
        let ops = operations_from_json(
            r#"[
                {"name": "branches", "path": ["branches"], "method": "GET"},
                {"name": "cancelBuild", "path": [":branch_id", "build", ":build_id"], "method": "delete"},
                {"name": "rebuildRequest", "path": [":branch_id", "request"], "method": "Post",
                 "require": ["request_id"], "optional": ["priority", "count"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1].method, RestMethod::Delete);
        assert_eq!(ops[1].arity(), 2);
        assert_eq!(ops[2].required, vec!["request_id"]);
        assert_eq!(ops[2].optional, vec!["priority", "count"]);
    }

    #[test]
    fn yaml_table() {
        let ops = operations_from_yaml(
            r#"
- name: isDone
  path: [":branch_id", rev, ":revision", is_done]
  method: get
- name: reprioritizeBuild
  path: [":branch_id", build, ":build_id"]
  method: PUT
  required: [priority]
"#,
        )
        .unwrap();

        assert_eq!(ops[0].method, RestMethod::Get);
        assert_eq!(ops[0].path.to_string(), ":branch_id/rev/:revision/is_done");
        assert_eq!(ops[1].required, vec!["priority"]);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = operations_from_json("[{\"name\": ").unwrap_err();
        assert!(matches!(err, DefinitionError::Json(_)));
    }

    #[test]
    fn unknown_method_is_reported() {
        let err = operations_from_json(r#"[{"name": "x", "path": [], "method": "PATCH"}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("PATCH"));
    }

    #[test]
    fn full_definition_from_yaml() {
        let api = ApiDefinition::from_yaml_str(
            r#"
name: SelfServe
protocol: https
host: builds.example.com
root_path: buildapi/self-serve
env_username: BUILDAPI_USERNAME
operations:
  - name: getBranch
    path: [":branch_id"]
    method: GET
  - name: rebuildBuild
    path: [":branch_id", build]
    method: post
    require: [build_id]
"#,
        )
        .unwrap();

        assert_eq!(api.host, "builds.example.com");
        assert_eq!(api.env_username.as_deref(), Some("BUILDAPI_USERNAME"));
        assert!(api.env_password.is_none());
        assert_eq!(api.operation("rebuildBuild").unwrap().required, vec!["build_id"]);
    }

    #[test]
    fn full_definition_from_json_is_validated() {
        let err = ApiDefinition::from_json_str(
            r#"{"name": "x", "protocol": "https", "host": "h", "root_path": "",
                "operations": [{"name": "branches", "path": ["branches"], "method": "GET",
                                "required": ["oops"]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::BodyFieldsOnRead { .. }));
    }

    #[test]
    fn loaded_tables_are_validated() {
        let err = operations_from_json(
            r#"[{"name": "jobs", "path": ["jobs"], "method": "GET"},
                {"name": "jobs", "path": ["jobs"], "method": "GET"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateName { .. }));
    }
}
