//! Synthesized operations and their invocation arguments.

use std::fmt;
use std::sync::Arc;

use buildapi_define::{OperationDescriptor, PathTemplate, RestMethod};
use tracing::instrument;

use crate::body::BodyParams;
use crate::config::ClientConfig;
use crate::dispatch::dispatch;
use crate::envelope::Outcome;
use crate::error::BuildApiError;
use crate::transport::Transport;

/// Arguments for one call: positional path values plus optional body
/// parameters.
///
/// ## Examples
///
/// ```
/// use buildapi::{BodyParams, Invocation};
///
/// let invocation = Invocation::new()
///     .arg("try")
///     .params(BodyParams::new().with("build_id", 1234));
///
/// assert_eq!(invocation.args(), ["try"]);
/// assert!(invocation.body().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    args: Vec<String>,
    params: Option<BodyParams>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional path argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Appends several positional path arguments.
    pub fn with_args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Sets the body parameters.
    pub fn params(mut self, params: BodyParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn body(&self) -> Option<&BodyParams> {
        self.params.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Option<BodyParams>) {
        (self.args, self.params)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Invocation {
    fn from(args: [S; N]) -> Self {
        Self::new().with_args(args)
    }
}

impl From<Vec<String>> for Invocation {
    fn from(args: Vec<String>) -> Self {
        Self { args, params: None }
    }
}

/// A callable operation produced by the [`Synthesizer`](crate::Synthesizer).
///
/// An operation owns shared handles to its descriptor, the client
/// configuration and the transport, so it is cheap to clone and can be moved
/// into spawned tasks. Calls are independent of one another.
#[derive(Clone)]
pub struct Operation {
    descriptor: Arc<OperationDescriptor>,
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Operation {
    pub(crate) fn new(
        descriptor: OperationDescriptor,
        config: Arc<ClientConfig>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            config,
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn method(&self) -> RestMethod {
        self.descriptor.method
    }

    pub fn path(&self) -> &PathTemplate {
        &self.descriptor.path
    }

    /// Number of positional arguments the operation takes.
    pub fn arity(&self) -> usize {
        self.descriptor.arity()
    }

    pub fn descriptor(&self) -> &OperationDescriptor {
        &self.descriptor
    }

    /// Performs one API call.
    ///
    /// Reads resolve to [`Outcome::Read`] with the response body verbatim.
    /// Mutations resolve to [`Outcome::Accepted`] when the API answers with
    /// status `OK`.
    ///
    /// ## Errors
    ///
    /// - [`BuildApiError::Argument`] if the positional argument count is wrong
    /// - [`BuildApiError::MissingParameter`] if a mutation lacks a required
    ///   body field
    /// - [`BuildApiError::Transport`] if the HTTP exchange fails
    /// - [`BuildApiError::Decode`] if the body cannot be interpreted
    /// - [`BuildApiError::Api`] if a mutation is rejected
    ///
    /// The first two are raised before any network activity.
    #[instrument(
        name = "buildapi_call",
        skip(self, invocation),
        fields(
            operation = %self.name(),
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn call(&self, invocation: impl Into<Invocation>) -> Result<Outcome, BuildApiError> {
        dispatch(
            &self.descriptor,
            &self.config,
            self.transport.as_ref(),
            invocation.into(),
        )
        .await
    }

    /// Shorthand for [`call`](Self::call) with separate arguments and body.
    pub async fn invoke<I, S>(
        &self,
        args: I,
        params: Option<BodyParams>,
    ) -> Result<Outcome, BuildApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut invocation = Invocation::new().with_args(args);
        if let Some(params) = params {
            invocation = invocation.params(params);
        }
        self.call(invocation).await
    }

    /// Spawns the call on the current tokio runtime and hands the result to
    /// `done` once it completes.
    ///
    /// `done` runs exactly once, for success and failure alike.
    ///
    /// ## Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn call_then<F>(&self, invocation: impl Into<Invocation>, done: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Result<Outcome, BuildApiError>) + Send + 'static,
    {
        let operation = self.clone();
        let invocation = invocation.into();
        tokio::spawn(async move {
            let result = operation.call(invocation).await;
            done(result);
        })
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.descriptor.name)
            .field("method", &self.descriptor.method)
            .field("path", &self.descriptor.path.to_string())
            .finish_non_exhaustive()
    }
}
