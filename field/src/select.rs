//! Select - the choice-enumeration boundary for input renderers.
//!
//! The field hands the rendering collaborator labeled options, nothing
//! more; producing actual markup is out of scope. Selected values are
//! normalized to tokens before matching: a `State` reduces to its token,
//! anything else is ignored, and matching is by token, never by identity.

use crate::field::{StateField, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One renderable option: a storable value (or `None` for unset), a label,
/// and whether it is currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Option<String>,
    pub label: String,
    pub selected: bool,
}

/// Enumerate the field's choices with selection marks for the given
/// currently-selected values.
pub fn select_options(field: &StateField, selected: &[Value]) -> Vec<SelectOption> {
    let selected_tokens: HashSet<&str> = selected
        .iter()
        .filter_map(|value| match value {
            Value::State(state) => Some(state.token()),
            _ => None,
        })
        .collect();

    field
        .choices()
        .into_iter()
        .map(|(value, label)| {
            let selected = value
                .as_deref()
                .is_some_and(|token| selected_tokens.contains(token));
            SelectOption {
                value,
                label,
                selected,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UNSET_LABEL;
    use stateflow_core::{Flow, FlowRegistry, State};

    fn review_field(registry: &FlowRegistry) -> StateField {
        registry.register(
            "app.flows",
            Flow::builder("Review")
                .state("draft", "Draft")
                .state("published", "Published")
                .build()
                .unwrap(),
        );
        StateField::builder("state")
            .flow("app.flows.Review")
            .build_with(registry)
            .unwrap()
    }

    #[test]
    fn test_options_mirror_field_choices() {
        let registry = FlowRegistry::new();
        let field = review_field(&registry);

        let options = select_options(&field, &[]);
        let rendered: Vec<_> = options
            .iter()
            .map(|o| (o.value.clone(), o.label.clone()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                (None, UNSET_LABEL.to_string()),
                (Some("draft".to_string()), "Draft".to_string()),
                (Some("published".to_string()), "Published".to_string()),
            ]
        );
        assert!(options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_selected_state_matches_by_token() {
        let registry = FlowRegistry::new();
        let field = review_field(&registry);

        // A freshly constructed handle, not the flow's own allocation.
        let current = State::new("published", "Published");
        let options = select_options(&field, &[Value::State(current)]);

        let selected: Vec<_> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect();
        assert_eq!(selected, vec![Some("published".to_string())]);
    }

    #[test]
    fn test_non_state_selected_values_are_ignored() {
        let registry = FlowRegistry::new();
        let field = review_field(&registry);

        let options = select_options(
            &field,
            &[Value::Raw("draft".to_string()), Value::Null],
        );
        assert!(options.iter().all(|o| !o.selected));
    }
}
