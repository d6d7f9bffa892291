//! Build API Definitions
//!
//! This crate contains the operation tables that use the primitives from
//! `buildapi-define`. Each API is organized in its own module.
//!
//! ## Available APIs
//!
//! - [`self_serve`] - The build self-serve API (branches, builds, requests, revisions)
//!
//! ## Examples
//!
//! ```
//! use buildapi_definitions::self_serve::define_self_serve_api;
//!
//! let api = define_self_serve_api();
//! assert_eq!(api.name, "SelfServe");
//! assert!(api.operation("getBuildInfo").is_some());
//! ```

pub mod self_serve;

pub use self_serve::define_self_serve_api;
