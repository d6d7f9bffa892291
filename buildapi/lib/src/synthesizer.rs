//! Turns operation descriptors into callable [`Operation`]s.

use std::sync::Arc;

use buildapi_define::{OperationDescriptor, validate_operations};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::operation::Operation;
use crate::transport::Transport;

/// Binds descriptors to one client's configuration and transport.
///
/// Synthesis is pure: no I/O happens until an operation is called. Every
/// operation produced by the same synthesizer shares the same configuration
/// and transport.
#[derive(Clone)]
pub struct Synthesizer {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Synthesizer {
    pub fn new(config: Arc<ClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Produces a single operation. The descriptor is not validated.
    pub fn synthesize(&self, descriptor: OperationDescriptor) -> Operation {
        debug!(
            operation = %descriptor.name,
            method = %descriptor.method,
            path = %descriptor.path,
            "Creating operation"
        );
        Operation::new(descriptor, Arc::clone(&self.config), Arc::clone(&self.transport))
    }

    /// Validates a whole table and produces one operation per entry, in table
    /// order.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidDefinition`] if the table has empty or
    /// duplicate names, malformed placeholders, or body fields on a read.
    pub fn synthesize_all(
        &self,
        descriptors: &[OperationDescriptor],
    ) -> Result<Vec<Operation>, ConfigError> {
        validate_operations(descriptors)?;
        Ok(descriptors
            .iter()
            .cloned()
            .map(|descriptor| self.synthesize(descriptor))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyParams;
    use crate::config::ClientOptions;
    use crate::operation::Invocation;
    use crate::transport::testing::CannedTransport;
    use buildapi_define::RestMethod;
    use buildapi_definitions::define_self_serve_api;

    fn synthesizer() -> Synthesizer {
        synthesizer_with(Arc::new(CannedTransport::new(200, "{}")))
    }

    fn synthesizer_with(transport: Arc<CannedTransport>) -> Synthesizer {
        let config = ClientConfig::new(&define_self_serve_api(), &ClientOptions::new()).unwrap();
        Synthesizer::new(Arc::new(config), transport)
    }

    fn descriptor(name: &str) -> OperationDescriptor {
        define_self_serve_api()
            .operations
            .into_iter()
            .find(|d| d.name == name)
            .unwrap()
    }

    #[test]
    fn synthesizes_every_table_entry_in_order() {
        let api = define_self_serve_api();
        let ops = synthesizer().synthesize_all(&api.operations).unwrap();

        assert_eq!(ops.len(), api.operations.len());
        for (op, descriptor) in ops.iter().zip(&api.operations) {
            assert_eq!(op.name(), descriptor.name);
            assert_eq!(op.method(), descriptor.method);
            assert_eq!(op.arity(), descriptor.path.placeholder_count());
        }
    }

    #[test]
    fn rejects_invalid_tables() {
        let table = vec![
            OperationDescriptor::get("branches", &["branches"]),
            OperationDescriptor::get("branches", &["other"]),
        ];
        let err = synthesizer().synthesize_all(&table).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDefinition(_)));
    }

    #[test]
    fn synthesize_single() {
        let op = synthesizer().synthesize(OperationDescriptor::delete(
            "cancelRequest",
            &[":branch_id", "request", ":request_id"],
        ));
        assert_eq!(op.name(), "cancelRequest");
        assert_eq!(op.method(), RestMethod::Delete);
        assert_eq!(op.arity(), 2);
    }

    #[tokio::test]
    async fn same_descriptor_synthesized_twice_behaves_identically() {
        let transport = Arc::new(CannedTransport::new(
            200,
            r#"{"status": "OK", "request_id": 42, "msg": "queued"}"#,
        ));
        let synthesizer = synthesizer_with(Arc::clone(&transport));

        let cases = [
            (descriptor("getBuildInfo"), Invocation::from(["try", "1234"])),
            (
                descriptor("rebuildBuild"),
                Invocation::from(["try"])
                    .params(BodyParams::new().with("build_id", 1234).with("priority", 2)),
            ),
        ];

        for (descriptor, invocation) in cases {
            let first = synthesizer.synthesize(descriptor.clone());
            let second = synthesizer.synthesize(descriptor);

            let a = first.call(invocation.clone()).await.unwrap();
            let b = second.call(invocation).await.unwrap();
            assert_eq!(a, b);

            let requests = transport.requests.lock().unwrap().clone();
            let [.., x, y] = requests.as_slice() else {
                panic!("expected two recorded requests");
            };
            assert_eq!(x, y);
        }

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].method, RestMethod::Get);
        assert!(requests[0].form.is_none());
        assert_eq!(requests[2].method, RestMethod::Post);
        assert!(requests[2].form.is_some());
    }
}
