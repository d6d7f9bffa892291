//! Operation descriptor primitives.
//!
//! This crate provides the types used to _declare_ the operations of the build
//! self-serve API. A declaration is pure data: the runtime in the `buildapi`
//! crate consumes it once, at client construction, and synthesizes one callable
//! operation per descriptor.
//!
//! ## Core Types
//!
//! - [`ApiDefinition`] - The API's name, URI defaults, credential env vars and operation table
//! - [`OperationDescriptor`] - One remote operation: name, method, path template, body fields
//! - [`RestMethod`] - The HTTP methods the API uses (GET, POST, PUT, DELETE)
//! - [`PathTemplate`] - Ordered path segments, each a literal or a positional placeholder
//! - [`PathSegment`] - A single literal (`build`) or placeholder (`:build_id`) segment
//!
//! ## Examples
//!
//! ```
//! use buildapi_define::{OperationDescriptor, RestMethod};
//!
//! let op = OperationDescriptor::get("getBuildInfo", &[":branch_id", "build", ":build_id"]);
//!
//! assert_eq!(op.method, RestMethod::Get);
//! assert_eq!(op.path.placeholder_count(), 2);
//! assert_eq!(op.path.render(&["try", "42"]).unwrap(), "try/build/42");
//! ```
//!
//! ## Loading tables
//!
//! Tables can also be loaded from JSON or YAML. Older tables spell the
//! required-field list `require` and use lowercase methods; both are accepted
//! and normalized:
//!
//! ```
//! use buildapi_define::{operations_from_json, RestMethod};
//!
//! let ops = operations_from_json(
//!     r#"[{"name": "rebuildBuild", "path": [":branch_id", "build"], "method": "post", "require": ["build_id"]}]"#,
//! ).unwrap();
//!
//! assert_eq!(ops[0].method, RestMethod::Post);
//! assert_eq!(ops[0].required, vec!["build_id".to_string()]);
//! ```

pub mod api;
pub mod error;
pub mod load;
pub mod path;
pub mod prelude;
pub mod types;

pub use api::{ApiDefinition, validate_operations};
pub use error::{ArityMismatch, DefinitionError};
pub use load::{operations_from_json, operations_from_yaml};
pub use path::{PathSegment, PathTemplate};
pub use types::{OperationDescriptor, RestMethod};
