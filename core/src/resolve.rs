//! FlowRef - live or deferred references to a flow.
//!
//! A field may name its flow either by a live handle or by a registry
//! locator. [`resolve`] turns either form into a concrete flow plus a
//! canonical string usable to reconstruct the reference later. Resolution
//! is a one-time cost paid at field construction, never per access.

use crate::flow::Flow;
use crate::registry::{FlowRegistry, ResolveError};
use std::fmt;
use std::sync::Arc;

/// Either a live flow or a `"<namespace>.<Name>"` locator.
#[derive(Debug, Clone)]
pub enum FlowRef {
    Flow(Arc<Flow>),
    Path(String),
}

impl From<Arc<Flow>> for FlowRef {
    fn from(flow: Arc<Flow>) -> Self {
        FlowRef::Flow(flow)
    }
}

impl From<Flow> for FlowRef {
    fn from(flow: Flow) -> Self {
        FlowRef::Flow(Arc::new(flow))
    }
}

impl From<&str> for FlowRef {
    fn from(path: &str) -> Self {
        FlowRef::Path(path.to_string())
    }
}

impl From<String> for FlowRef {
    fn from(path: String) -> Self {
        FlowRef::Path(path)
    }
}

impl fmt::Display for FlowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowRef::Flow(flow) => write!(f, "{flow}"),
            FlowRef::Path(path) => f.write_str(path),
        }
    }
}

/// Resolve a flow reference into `(flow, canonical_name)`.
///
/// A live reference is returned as-is; its canonical name is the flow's
/// display name. A locator goes through the registry and keeps the locator
/// itself as the canonical name. Lookup failures propagate unmodified -
/// a misconfigured flow reference is fatal at construction time.
pub fn resolve(
    flow_ref: &FlowRef,
    registry: &FlowRegistry,
) -> Result<(Arc<Flow>, String), ResolveError> {
    match flow_ref {
        FlowRef::Flow(flow) => Ok((flow.clone(), flow.name().to_string())),
        FlowRef::Path(path) => {
            let flow = registry.lookup(path)?;
            tracing::debug!(locator = %path, flow = %flow.name(), "resolved flow locator");
            Ok((flow, path.clone()))
        }
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
    fn test_resolve_live_reference() {
        let registry = FlowRegistry::new();
        let flow = Arc::new(review_flow());

        let (resolved, canonical) = resolve(&FlowRef::from(flow.clone()), &registry).unwrap();
        assert!(Arc::ptr_eq(&resolved, &flow));
        assert_eq!(canonical, "Review");
    }

    #[test]
    fn test_resolve_locator() {
        let registry = FlowRegistry::new();
        registry.register("app.flows", review_flow());

        let (resolved, canonical) = resolve(&FlowRef::from("app.flows.Review"), &registry).unwrap();
        assert_eq!(resolved.name(), "Review");
        assert_eq!(canonical, "app.flows.Review");
    }

    #[test]
    fn test_live_and_locator_resolution_are_equivalent() {
        let registry = FlowRegistry::new();
        let live = registry.register("app.flows", review_flow());

        let (by_ref, _) = resolve(&FlowRef::from(live), &registry).unwrap();
        let (by_path, _) = resolve(&FlowRef::from("app.flows.Review"), &registry).unwrap();

        assert_eq!(by_ref.state_choices(), by_path.state_choices());
        assert_eq!(
            by_ref.get_state("draft").unwrap(),
            by_path.get_state("draft").unwrap()
        );
        assert!(by_ref.get_state("bogus").is_err());
        assert!(by_path.get_state("bogus").is_err());
    }

    #[test]
    fn test_unresolvable_locator_propagates() {
        let registry = FlowRegistry::new();
        let err = resolve(&FlowRef::from("missing.ns.Review"), &registry).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NamespaceNotFound("missing.ns".to_string())
        );
    }
}
