//! Per-call dispatch logic.
//!
//! Every synthesized [`Operation`](crate::Operation) runs these steps in
//! order:
//!
//! 1. check positional arity against the path placeholders
//! 2. fill the path template, one segment per value, and append it to the
//!    base URL (`.` and `..` values are rejected)
//! 3. check required body fields (mutating methods only)
//! 4. build the [`TransportRequest`]
//! 5. send it through the [`Transport`]
//! 6. interpret the response: verbatim JSON for reads, a status envelope for
//!    mutations
//!
//! Steps 1 to 3 fail without touching the network.

use buildapi_define::OperationDescriptor;
use serde_json::Value;
use tracing::{Span, debug, warn};
use url::Url;

use crate::body::BodyParams;
use crate::config::ClientConfig;
use crate::envelope::{Outcome, ResponseEnvelope};
use crate::error::BuildApiError;
use crate::operation::Invocation;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Runs one call end to end.
///
/// Records `http.method`, `http.url`, `http.status_code` and
/// `otel.status_code` on the current span.
pub(crate) async fn dispatch(
    descriptor: &OperationDescriptor,
    config: &ClientConfig,
    transport: &dyn Transport,
    invocation: Invocation,
) -> Result<Outcome, BuildApiError> {
    let span = Span::current();
    span.record("http.method", descriptor.method.to_string().as_str());

    let (args, params) = invocation.into_parts();
    let url = compose_url(descriptor, config, &args)?;
    span.record("http.url", url.as_str());

    check_required(descriptor, params.as_ref())?;
    let request = build_request(descriptor, config, url, params);

    let response = match transport.send(request).await {
        Ok(response) => response,
        Err(e) => {
            span.record("otel.status_code", "ERROR");
            warn!(operation = %descriptor.name, error = %e, "Transport failed");
            return Err(e.into());
        }
    };
    span.record("http.status_code", response.status);

    let outcome = interpret(descriptor, response);
    span.record(
        "otel.status_code",
        if outcome.is_ok() { "OK" } else { "ERROR" },
    );
    outcome
}

/// Checks arity and builds the request URL.
///
/// Each positional value fills exactly one path segment.
///
/// ## Errors
///
/// - [`BuildApiError::Argument`] if `args` does not match the number of
///   placeholders in the descriptor's path
/// - [`BuildApiError::InvalidPathArgument`] if a value is a `.` or `..`
///   segment, percent-encoded or not
pub fn compose_url<S: AsRef<str>>(
    descriptor: &OperationDescriptor,
    config: &ClientConfig,
    args: &[S],
) -> Result<Url, BuildApiError> {
    let segments = descriptor
        .path
        .bind(args)
        .map_err(|mismatch| BuildApiError::Argument {
            operation: descriptor.name.clone(),
            expected: mismatch.expected,
            actual: mismatch.actual,
        })?;

    if let Some((position, value)) = args
        .iter()
        .map(|value| value.as_ref())
        .enumerate()
        .find(|(_, value)| is_dot_segment(value))
    {
        return Err(BuildApiError::InvalidPathArgument {
            operation: descriptor.name.clone(),
            position,
            value: value.to_string(),
        });
    }

    Ok(config.operation_url(&segments))
}

/// `.` and `..` would be resolved away by the URL layer, moving the request
/// to another resource.
fn is_dot_segment(value: &str) -> bool {
    let decoded = value.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Checks that a mutating call carries every required body field.
///
/// Reads are never checked.
///
/// ## Errors
///
/// Returns [`BuildApiError::MissingParameter`] naming the first missing field
/// in table order.
pub fn check_required(
    descriptor: &OperationDescriptor,
    params: Option<&BodyParams>,
) -> Result<(), BuildApiError> {
    if !descriptor.method.is_mutating() {
        return Ok(());
    }

    let missing = descriptor
        .required
        .iter()
        .find(|field| !params.is_some_and(|p| p.contains(field)));

    match missing {
        Some(field) => Err(BuildApiError::MissingParameter {
            operation: descriptor.name.clone(),
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

/// Assembles the transport request.
///
/// Reads never carry a body; parameters passed to a read are dropped.
pub fn build_request(
    descriptor: &OperationDescriptor,
    config: &ClientConfig,
    url: Url,
    params: Option<BodyParams>,
) -> TransportRequest {
    let form = match params {
        Some(params) if descriptor.method.is_mutating() => Some(params.to_form_pairs()),
        Some(_) => {
            debug!(operation = %descriptor.name, "Ignoring body parameters on a read");
            None
        }
        None => None,
    };

    TransportRequest {
        method: descriptor.method,
        url,
        credentials: config.credentials().cloned(),
        form,
    }
}

/// Normalizes a response.
///
/// ## Errors
///
/// - [`BuildApiError::Decode`] if the body is not JSON, or (for mutations)
///   not a status envelope
/// - [`BuildApiError::Api`] if a mutation's envelope status is not `OK`
pub fn interpret(
    descriptor: &OperationDescriptor,
    response: TransportResponse,
) -> Result<Outcome, BuildApiError> {
    let decode_error = |source: serde_json::Error| {
        warn!(
            operation = %descriptor.name,
            status = response.status,
            body_len = response.body.len(),
            "Failed to parse JSON response body"
        );
        BuildApiError::Decode {
            operation: descriptor.name.clone(),
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
            source,
        }
    };

    if !descriptor.method.is_mutating() {
        let value: Value = serde_json::from_slice(&response.body).map_err(decode_error)?;
        return Ok(Outcome::Read(value));
    }

    let envelope: ResponseEnvelope =
        serde_json::from_slice(&response.body).map_err(decode_error)?;

    if envelope.is_ok() {
        return Ok(Outcome::Accepted {
            request_id: envelope.request_id,
            msg: envelope.msg.unwrap_or_default(),
        });
    }

    let message = envelope
        .msg
        .unwrap_or_else(|| format!("request failed with status {}", envelope.status));
    warn!(operation = %descriptor.name, status = %envelope.status, %message, "API reported failure");

    Err(BuildApiError::Api {
        operation: descriptor.name.clone(),
        status: envelope.status,
        message,
        request_id: envelope.request_id,
    })
}
