//! `reqwest`-backed transport.

use std::time::Duration;

use tracing::debug;

use super::{BoxFuture, Transport, TransportRequest, TransportResponse, to_reqwest};
use crate::error::{ConfigError, TransportError};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("buildapi-rs/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    user_agent: String,
}

impl ReqwestTransportBuilder {
    fn new() -> Self {
        Self {
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Sets a whole-request timeout. There is none by default.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let transport = ReqwestTransport::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the [`ReqwestTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ReqwestTransport, ConfigError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .pool_max_idle_per_host(10);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ReqwestTransport {
            client: builder.build()?,
        })
    }
}

/// Async HTTP transport over `reqwest::Client`.
///
/// Basic auth is attached to every request up front (the API does not issue
/// challenges), and form bodies are URL-encoded.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Creates a transport with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        Box::pin(async move {
            let TransportRequest {
                method,
                url,
                credentials,
                form,
            } = request;

            debug!(%method, %url, "Requesting URI");

            let mut builder = self.client.request(to_reqwest(method), url);
            if let Some(credentials) = &credentials {
                debug!(username = credentials.username(), "Using basic auth");
                builder = builder.basic_auth(credentials.username(), credentials.password());
            }
            if let Some(form) = &form {
                builder = builder.form(form);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;

            Ok(TransportResponse { status, body })
        })
    }
}
