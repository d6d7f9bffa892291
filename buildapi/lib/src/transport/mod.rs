//! The HTTP transport seam.
//!
//! The dispatcher never talks to the network directly. It hands a
//! [`TransportRequest`] to a [`Transport`] and interprets the
//! [`TransportResponse`] it gets back. [`ReqwestTransport`] is the default
//! implementation; tests substitute their own.

mod reqwest_transport;

pub use reqwest_transport::{ReqwestTransport, ReqwestTransportBuilder, USER_AGENT};

use std::future::Future;
use std::pin::Pin;

use buildapi_define::RestMethod;
use bytes::Bytes;
use url::Url;

use crate::config::Credentials;
use crate::error::TransportError;

/// Boxed future type for async trait methods.
///
/// This type alias provides dyn-compatible async method returns.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A fully prepared request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Absolute URL, including the `format=json` query.
    pub url: Url,
    /// Basic-auth credentials, sent preemptively.
    pub credentials: Option<Credentials>,
    /// URL-encoded form body; `None` means no body.
    pub form: Option<Vec<(String, String)>>,
}

/// The raw result of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Bytes,
}

/// Sends requests on behalf of synthesized operations.
///
/// Implementations perform exactly one exchange per call and never retry.
/// The trait is dyn-compatible so a client can hold `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response status and body.
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse, TransportError>>;
}

/// Converts to the equivalent `reqwest::Method`.
pub fn to_reqwest(method: RestMethod) -> reqwest::Method {
    match method {
        RestMethod::Get => reqwest::Method::GET,
        RestMethod::Post => reqwest::Method::POST,
        RestMethod::Put => reqwest::Method::PUT,
        RestMethod::Delete => reqwest::Method::DELETE,
    }
}
