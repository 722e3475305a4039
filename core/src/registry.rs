//! FlowRegistry - deferred flow lookup by dotted locator.
//!
//! Migrations and config files cannot hold live flow references, so a flow
//! may be named by a textual locator of the form `"<namespace>.<Name>"`.
//! Instead of a dynamic import, flows are registered under a namespace
//! during an explicit initialization phase and looked up here.
//!
//! Registration is write-mostly and happens at startup; lookups take a read
//! lock only.

use crate::flow::Flow;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("flow locator `{0}` has no namespace separator")]
    InvalidLocator(String),
    #[error("flow namespace `{0}` is not registered")]
    NamespaceNotFound(String),
    #[error("no flow named `{name}` in namespace `{namespace}`")]
    FlowNotFound { namespace: String, name: String },
}

static GLOBAL: Lazy<FlowRegistry> = Lazy::new(FlowRegistry::new);

/// Process-wide table of flows, keyed by namespace and flow name.
#[derive(Default)]
pub struct FlowRegistry {
    namespaces: RwLock<AHashMap<String, AHashMap<String, Arc<Flow>>>>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry backing deferred locators.
    pub fn global() -> &'static FlowRegistry {
        &GLOBAL
    }

    /// Register a flow under a namespace, keyed by the flow's own name.
    ///
    /// Re-registering a name replaces the previous flow. Returns the shared
    /// handle for callers that also want a live reference.
    pub fn register(&self, namespace: impl Into<String>, flow: Flow) -> Arc<Flow> {
        let namespace = namespace.into();
        let flow = Arc::new(flow);
        tracing::debug!(namespace = %namespace, flow = %flow.name(), "registering flow");
        self.namespaces
            .write()
            .entry(namespace)
            .or_default()
            .insert(flow.name().to_string(), flow.clone());
        flow
    }

    /// Look up a flow by a `"<namespace>.<Name>"` locator.
    ///
    /// The locator is split on the LAST dot, so namespaces may themselves
    /// be dotted (`"app.flows.Review"`). Each failure mode is distinct:
    /// a malformed locator, a missing namespace, or a missing flow name.
    pub fn lookup(&self, locator: &str) -> Result<Arc<Flow>, ResolveError> {
        let dot = locator
            .rfind('.')
            .ok_or_else(|| ResolveError::InvalidLocator(locator.to_string()))?;
        let (namespace, name) = (&locator[..dot], &locator[dot + 1..]);

        let namespaces = self.namespaces.read();
        let flows = namespaces
            .get(namespace)
            .ok_or_else(|| ResolveError::NamespaceNotFound(namespace.to_string()))?;
        flows
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::FlowNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_flow() -> Flow {
        Flow::builder("Review")
            .state("draft", "Draft")
            .state("published", "Published")
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = FlowRegistry::new();
        registry.register("app.flows", review_flow());

        let flow = registry.lookup("app.flows.Review").unwrap();
        assert_eq!(flow.name(), "Review");
        assert_eq!(flow.len(), 2);
    }

    #[test]
    fn test_locator_splits_on_last_dot() {
        let registry = FlowRegistry::new();
        registry.register("deeply.nested.module", review_flow());

        assert!(registry.lookup("deeply.nested.module.Review").is_ok());
        assert_eq!(
            registry.lookup("deeply.nested.Review").unwrap_err(),
            ResolveError::NamespaceNotFound("deeply.nested".to_string())
        );
    }

    #[test]
    fn test_invalid_locator() {
        let registry = FlowRegistry::new();
        assert_eq!(
            registry.lookup("Review").unwrap_err(),
            ResolveError::InvalidLocator("Review".to_string())
        );
    }

    #[test]
    fn test_flow_not_found_in_namespace() {
        let registry = FlowRegistry::new();
        registry.register("app.flows", review_flow());

        assert_eq!(
            registry.lookup("app.flows.Billing").unwrap_err(),
            ResolveError::FlowNotFound {
                namespace: "app.flows".to_string(),
                name: "Billing".to_string(),
            }
        );
    }

    #[test]
    fn test_reregistering_replaces() {
        let registry = FlowRegistry::new();
        registry.register("app.flows", review_flow());
        registry.register(
            "app.flows",
            Flow::builder("Review").state("draft", "Draft").build().unwrap(),
        );

        let flow = registry.lookup("app.flows.Review").unwrap();
        assert_eq!(flow.len(), 1);
    }
}
