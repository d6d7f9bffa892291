//! Convenient re-exports for writing descriptor tables.
//!
//! ```
//! use buildapi_define::prelude::*;
//!
//! let ops = vec![
//!     OperationDescriptor::get("branches", &["branches"]),
//!     OperationDescriptor::delete("cancelRevision", &[":branch_id", "rev", ":revision"]),
//! ];
//! assert_eq!(ops[1].method, RestMethod::Delete);
//! ```

pub use crate::api::ApiDefinition;
pub use crate::error::DefinitionError;
pub use crate::path::{PathSegment, PathTemplate};
pub use crate::types::{OperationDescriptor, RestMethod};
