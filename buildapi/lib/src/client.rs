//! The client: one configuration, one transport, and the full set of
//! synthesized operations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use buildapi_define::ApiDefinition;
use buildapi_definitions::define_self_serve_api;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{ClientConfig, ClientOptions, Credentials};
use crate::envelope::Outcome;
use crate::error::{BuildApiError, ConfigError};
use crate::operation::{Invocation, Operation};
use crate::synthesizer::Synthesizer;
use crate::transport::{ReqwestTransport, Transport};

/// Builder for configuring a [`BuildApiClient`].
pub struct BuildApiClientBuilder {
    api: ApiDefinition,
    options: ClientOptions,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl BuildApiClientBuilder {
    fn new(api: ApiDefinition) -> Self {
        Self {
            api,
            options: ClientOptions::new(),
            timeout: None,
            transport: None,
        }
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.options = self.options.username(username);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.options = self.options.password(password);
        self
    }

    /// Overrides the URI scheme (default `https`).
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.options = self.options.protocol(protocol);
        self
    }

    /// Overrides the host, optionally with a port.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options = self.options.host(host);
        self
    }

    /// Overrides the root path under which every operation path is appended.
    pub fn root_path(mut self, root_path: impl Into<String>) -> Self {
        self.options = self.options.root_path(root_path);
        self
    }

    /// Sets a request timeout on the default transport.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a custom transport instead of [`ReqwestTransport`].
    pub fn transport(self, transport: impl Transport + 'static) -> Self {
        self.transport_arc(Arc::new(transport))
    }

    /// Uses a shared custom transport.
    pub fn transport_arc(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Resolves the configuration and synthesizes every operation.
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL cannot be assembled, the operation
    /// table is invalid, or the default HTTP client cannot be constructed.
    pub fn build(self) -> Result<BuildApiClient, ConfigError> {
        let config = Arc::new(ClientConfig::new(&self.api, &self.options)?);
        debug!(api = %self.api.name, base_url = %config.base_url(), "Base URI is {}", config.base_url());

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = ReqwestTransport::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                Arc::new(builder.build()?)
            }
        };

        let synthesizer = Synthesizer::new(Arc::clone(&config), transport);
        let operations = synthesizer.synthesize_all(&self.api.operations)?;
        let index = operations
            .iter()
            .enumerate()
            .map(|(i, op)| (op.name().to_string(), i))
            .collect();

        Ok(BuildApiClient {
            api_name: self.api.name,
            config,
            operations,
            index,
        })
    }
}

/// Async client exposing one named [`Operation`] per table entry.
///
/// ## Examples
///
/// ```rust,ignore
/// use buildapi::{BodyParams, BuildApiClient, ClientOptions, Invocation};
///
/// let client = BuildApiClient::self_serve(
///     ClientOptions::new().username("someone@example.com").password("hunter2"),
/// )?;
///
/// let branches = client.call("branches", Invocation::new()).await?;
/// println!("{}", branches.to_json());
///
/// let queued = client
///     .call(
///         "rebuildBuild",
///         Invocation::new()
///             .arg("try")
///             .params(BodyParams::new().with("build_id", 1234)),
///     )
///     .await?;
/// println!("queued as {:?}", queued.request_id());
/// ```
#[derive(Debug, Clone)]
pub struct BuildApiClient {
    api_name: String,
    config: Arc<ClientConfig>,
    operations: Vec<Operation>,
    index: HashMap<String, usize>,
}

impl BuildApiClient {
    /// Creates a builder for the given API definition.
    pub fn builder(api: ApiDefinition) -> BuildApiClientBuilder {
        BuildApiClientBuilder::new(api)
    }

    /// Creates a client with the default transport.
    ///
    /// ## Errors
    ///
    /// See [`BuildApiClientBuilder::build`].
    pub fn new(api: ApiDefinition, options: ClientOptions) -> Result<Self, ConfigError> {
        Self::builder(api).options(options).build()
    }

    /// Creates a client for the self-serve API.
    ///
    /// Credentials not present in `options` are read from the environment
    /// variables named by the API definition.
    ///
    /// ## Errors
    ///
    /// See [`BuildApiClientBuilder::build`].
    pub fn self_serve(options: ClientOptions) -> Result<Self, ConfigError> {
        let api = define_self_serve_api();
        let options = ClientOptions::from_env(&api).merge(options);
        Self::new(api, options)
    }

    /// Name of the API this client talks to.
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        self.config.base_url()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.config.credentials()
    }

    /// Looks up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    /// All operations, in table order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Calls an operation by name.
    ///
    /// ## Errors
    ///
    /// Returns [`BuildApiError::UnknownOperation`] if no operation has that
    /// name, otherwise whatever [`Operation::call`] returns.
    #[instrument(name = "buildapi_dispatch", skip(self, invocation))]
    pub async fn call(
        &self,
        name: &str,
        invocation: impl Into<Invocation>,
    ) -> Result<Outcome, BuildApiError> {
        let operation = self
            .operation(name)
            .ok_or_else(|| BuildApiError::UnknownOperation {
                name: name.to_string(),
            })?;
        operation.call(invocation).await
    }
}
