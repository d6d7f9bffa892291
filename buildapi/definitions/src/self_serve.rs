//! Build self-serve API definition.
//!
//! The self-serve API exposes read access to branches, builds, requests and
//! revisions, and lets authenticated users cancel, rebuild, reprioritize and
//! schedule builds. All paths hang off `/buildapi/self-serve` and every
//! response is JSON (`?format=json`).

use buildapi_define::{ApiDefinition, OperationDescriptor};

/// Default host of the self-serve API.
pub const DEFAULT_HOST: &str = "secure.pub.build.mozilla.org";

/// Default root path of the self-serve API.
pub const DEFAULT_ROOT_PATH: &str = "buildapi/self-serve";

/// Environment variable read for the basic-auth username.
pub const ENV_USERNAME: &str = "BUILDAPI_USERNAME";

/// Environment variable read for the basic-auth password.
pub const ENV_PASSWORD: &str = "BUILDAPI_PASSWORD";

/// Creates the self-serve API definition.
///
/// ## Operations
///
/// Reads (GET, JSON returned verbatim):
///
/// - `branches` - branches
/// - `jobs` - jobs
/// - `getJob` - jobs/:job_id
/// - `getBranch` - :branch_id
/// - `getBuildInfo` - :branch_id/build/:build_id
/// - `getBuilders` - :branch_id/builders
/// - `getBuilder` - :branch_id/builders/:builder_name
/// - `getRequestInfo` - :branch_id/request/:request_id
/// - `getRevInfo` - :branch_id/rev/:revision
/// - `isDone` - :branch_id/rev/:revision/is_done
/// - `getBuildsForUser` - :branch_id/user/:user
///
/// Mutations (form body, status envelope):
///
/// - `cancelBuild` - DELETE :branch_id/build/:build_id
/// - `cancelRequest` - DELETE :branch_id/request/:request_id
/// - `cancelRevision` - DELETE :branch_id/rev/:revision
/// - `rebuildBuild` - POST :branch_id/build (`build_id`)
/// - `rebuildRequest` - POST :branch_id/request (`request_id`)
/// - `newBuildAtRevision` - POST :branch_id/rev/:revision
/// - `newPgoBuildAtRevision` - POST :branch_id/rev/:revision/pgo
/// - `newNightlyAtRevision` - POST :branch_id/rev/:revision/nightly
/// - `newBuildForBuilder` - POST :branch_id/builders/:builder_name/:revision
/// - `reprioritizeBuild` - PUT :branch_id/build/:build_id (`priority`)
/// - `reprioritizeRequest` - PUT :branch_id/request/:request_id (`priority`)
///
/// ## Examples
///
/// ```rust
/// use buildapi_definitions::self_serve::define_self_serve_api;
///
/// let api = define_self_serve_api();
/// let op = api.operation("rebuildBuild").unwrap();
/// assert_eq!(op.required, vec!["build_id".to_string()]);
/// ```
pub fn define_self_serve_api() -> ApiDefinition {
    ApiDefinition {
        name: "SelfServe".to_string(),
        description: "Build self-serve API for inspecting and controlling builds".to_string(),
        docs_url: Some(format!("https://{DEFAULT_HOST}/{DEFAULT_ROOT_PATH}")),
        protocol: "https".to_string(),
        host: DEFAULT_HOST.to_string(),
        root_path: DEFAULT_ROOT_PATH.to_string(),
        env_username: Some(ENV_USERNAME.to_string()),
        env_password: Some(ENV_PASSWORD.to_string()),
        operations: vec![
            // Basic reads
            OperationDescriptor::get("branches", &["branches"])
                .with_description("List the branches the API knows about"),
            OperationDescriptor::get("jobs", &["jobs"])
                .with_description("List the jobs submitted by the authenticated user"),
            OperationDescriptor::get("getJob", &["jobs", ":job_id"])
                .with_description("Status of a single job"),
            // Reads with path arguments
            OperationDescriptor::get("getBranch", &[":branch_id"])
                .with_description("Pending, running and complete builds on a branch"),
            OperationDescriptor::get("getBuildInfo", &[":branch_id", "build", ":build_id"])
                .with_description("Information about a single build"),
            OperationDescriptor::get("getBuilders", &[":branch_id", "builders"])
                .with_description("Builders available on a branch"),
            OperationDescriptor::get("getBuilder", &[":branch_id", "builders", ":builder_name"])
                .with_description("Information about a single builder"),
            OperationDescriptor::get("getRequestInfo", &[":branch_id", "request", ":request_id"])
                .with_description("Information about a single build request"),
            OperationDescriptor::get("getRevInfo", &[":branch_id", "rev", ":revision"])
                .with_description("Builds for a revision"),
            OperationDescriptor::get("isDone", &[":branch_id", "rev", ":revision", "is_done"])
                .with_description("Whether all builds for a revision have finished"),
            OperationDescriptor::get("getBuildsForUser", &[":branch_id", "user", ":user"])
                .with_description("Builds submitted by a user on a branch"),
            // Cancellation
            OperationDescriptor::delete("cancelBuild", &[":branch_id", "build", ":build_id"])
                .with_description("Cancel a running build"),
            OperationDescriptor::delete("cancelRequest", &[":branch_id", "request", ":request_id"])
                .with_description("Cancel a pending build request"),
            OperationDescriptor::delete("cancelRevision", &[":branch_id", "rev", ":revision"])
                .with_description("Cancel every build for a revision"),
            // New work
            OperationDescriptor::post("rebuildBuild", &[":branch_id", "build"])
                .with_required(&["build_id"])
                .with_optional(&["priority", "count"])
                .with_description("Rebuild a finished build"),
            OperationDescriptor::post("rebuildRequest", &[":branch_id", "request"])
                .with_required(&["request_id"])
                .with_optional(&["priority", "count"])
                .with_description("Rebuild a build request"),
            OperationDescriptor::post("newBuildAtRevision", &[":branch_id", "rev", ":revision"])
                .with_description("Schedule new builds for a revision"),
            OperationDescriptor::post(
                "newPgoBuildAtRevision",
                &[":branch_id", "rev", ":revision", "pgo"],
            )
            .with_description("Schedule PGO builds for a revision"),
            OperationDescriptor::post(
                "newNightlyAtRevision",
                &[":branch_id", "rev", ":revision", "nightly"],
            )
            .with_description("Schedule nightly builds for a revision"),
            OperationDescriptor::post(
                "newBuildForBuilder",
                &[":branch_id", "builders", ":builder_name", ":revision"],
            )
            .with_optional(&["properties", "files"])
            .with_description("Schedule a build on one builder for a revision"),
            // Priority changes
            OperationDescriptor::put("reprioritizeBuild", &[":branch_id", "build", ":build_id"])
                .with_required(&["priority"])
                .with_description("Change the priority of a build"),
            OperationDescriptor::put(
                "reprioritizeRequest",
                &[":branch_id", "request", ":request_id"],
            )
            .with_required(&["priority"])
            .with_description("Change the priority of a pending request"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildapi_define::RestMethod;

    #[test]
    fn api_metadata() {
        let api = define_self_serve_api();
        assert_eq!(api.name, "SelfServe");
        assert_eq!(api.protocol, "https");
        assert_eq!(api.host, DEFAULT_HOST);
        assert_eq!(api.root_path, DEFAULT_ROOT_PATH);
        assert_eq!(api.env_username.as_deref(), Some(ENV_USERNAME));
        assert_eq!(api.env_password.as_deref(), Some(ENV_PASSWORD));
    }

    #[test]
    fn table_is_valid() {
        let api = define_self_serve_api();
        assert!(api.validate().is_ok());
        assert_eq!(api.operations.len(), 22);
    }

    #[test]
    fn reads_have_no_body_fields() {
        let api = define_self_serve_api();
        for op in api.operations.iter().filter(|op| op.method == RestMethod::Get) {
            assert!(op.required.is_empty(), "{} declares required fields", op.name);
            assert!(op.optional.is_empty(), "{} declares optional fields", op.name);
        }
    }

    #[test]
    fn get_build_info_takes_branch_and_build() {
        let api = define_self_serve_api();
        let op = api.operation("getBuildInfo").unwrap();

        assert_eq!(op.method, RestMethod::Get);
        assert_eq!(
            op.path.placeholders().collect::<Vec<_>>(),
            vec!["branch_id", "build_id"]
        );
    }

    #[test]
    fn get_request_info_is_distinct_from_get_branch() {
        let api = define_self_serve_api();
        let branch = api.operation("getBranch").unwrap();
        let request = api.operation("getRequestInfo").unwrap();

        assert_ne!(branch.path, request.path);
        assert_eq!(request.path.to_string(), ":branch_id/request/:request_id");
    }

    #[test]
    fn cancellations_are_deletes() {
        let api = define_self_serve_api();
        for name in ["cancelBuild", "cancelRequest", "cancelRevision"] {
            let op = api.operation(name).unwrap();
            assert_eq!(op.method, RestMethod::Delete, "{name}");
            assert_eq!(op.arity(), 2, "{name}");
        }
    }

    #[test]
    fn rebuilds_require_an_id() {
        let api = define_self_serve_api();
        let build = api.operation("rebuildBuild").unwrap();
        let request = api.operation("rebuildRequest").unwrap();

        assert_eq!(build.method, RestMethod::Post);
        assert_eq!(build.required, vec!["build_id"]);
        assert_eq!(request.required, vec!["request_id"]);
        assert_eq!(build.arity(), 1);
    }

    #[test]
    fn reprioritize_requires_priority() {
        let api = define_self_serve_api();
        for name in ["reprioritizeBuild", "reprioritizeRequest"] {
            let op = api.operation(name).unwrap();
            assert_eq!(op.method, RestMethod::Put);
            assert_eq!(op.required, vec!["priority"]);
        }
    }

    #[test]
    fn builder_build_takes_three_arguments() {
        let api = define_self_serve_api();
        let op = api.operation("newBuildForBuilder").unwrap();
        assert_eq!(op.arity(), 3);
        assert!(op.required.is_empty());
    }

    #[test]
    fn table_round_trips_through_json() {
        let api = define_self_serve_api();
        let json = serde_json::to_string(&api.operations).unwrap();
        let loaded = buildapi_define::operations_from_json(&json).unwrap();
        assert_eq!(loaded, api.operations);
    }
}
