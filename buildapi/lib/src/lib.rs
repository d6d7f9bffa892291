//! Descriptor-driven async client for the build self-serve JSON API.
//!
//! The API is described as a table of [`OperationDescriptor`]s (see the
//! `buildapi-definitions` crate). At construction, [`BuildApiClient`] resolves
//! a base URL and credentials, then a [`Synthesizer`] turns every descriptor
//! into a callable [`Operation`]. A call:
//!
//! - substitutes positional arguments into the path template
//! - appends the path to the base URL (which always carries `format=json`)
//! - checks required body fields for POST, PUT and DELETE
//! - sends one HTTP request with preemptive basic auth
//! - returns the JSON body for reads, or the status envelope's
//!   `request_id`/`msg` for accepted mutations
//!
//! Argument and missing-field errors are raised before any network activity.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use buildapi::{BodyParams, BuildApiClient, ClientOptions, Invocation};
//!
//! let client = BuildApiClient::self_serve(ClientOptions::new())?;
//!
//! let info = client.call("getBuildInfo", ["try", "1234"]).await?;
//! println!("{}", info.to_json());
//!
//! let rebuild = client.operation("rebuildBuild").unwrap();
//! let queued = rebuild
//!     .call(Invocation::new().arg("try").params(BodyParams::new().with("build_id", 1234)))
//!     .await?;
//! ```
//!
//! ## Tracing
//!
//! Each call runs inside a `buildapi_call` span carrying `operation`,
//! `http.method`, `http.url`, `http.status_code` and `otel.status_code`.
//! Passwords are never logged.

pub mod body;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod synthesizer;
pub mod transport;

pub use body::BodyParams;
pub use client::{BuildApiClient, BuildApiClientBuilder};
pub use config::{ClientConfig, ClientOptions, Credentials, FORMAT_QUERY};
pub use envelope::{Outcome, RequestId, ResponseEnvelope};
pub use error::{BuildApiError, ConfigError, ErrorKind, TransportError};
pub use operation::{Invocation, Operation};
pub use synthesizer::Synthesizer;
pub use transport::{
    BoxFuture, ReqwestTransport, ReqwestTransportBuilder, Transport, TransportRequest,
    TransportResponse, USER_AGENT,
};

pub use buildapi_define::{ApiDefinition, OperationDescriptor, PathTemplate, RestMethod};
