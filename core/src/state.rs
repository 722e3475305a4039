//! State - one named point in a flow.
//!
//! A `State` is an immutable, singleton-like value identified by a stable
//! storable token. Handles are cheap to clone (the definition is shared);
//! equality and hashing go by token, so two handles on the same declaration
//! compare equal no matter how they were obtained.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The declaration record behind a state: its storable token and its
/// human-facing label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDef {
    pub token: String,
    pub label: String,
}

/// One immutable member of a flow.
#[derive(Debug, Clone)]
pub struct State {
    def: Arc<StateDef>,
}

impl State {
    pub fn new(token: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            def: Arc::new(StateDef {
                token: token.into(),
                label: label.into(),
            }),
        }
    }

    /// The canonical storable token.
    pub fn token(&self) -> &str {
        &self.def.token
    }

    /// The human-facing label.
    pub fn label(&self) -> &str {
        &self.def.label
    }

    /// The underlying declaration record.
    pub fn def(&self) -> &StateDef {
        &self.def
    }
}

// Identity is the token, not the allocation.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.def.token == other.def.token
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.def.token.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.def.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_token() {
        let a = State::new("draft", "Draft");
        let b = State::new("draft", "Draft (copy)");
        let c = State::new("published", "Published");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_shares_definition() {
        let a = State::new("draft", "Draft");
        let b = a.clone();

        assert_eq!(a, b);
        assert_eq!(b.label(), "Draft");
    }

    #[test]
    fn test_display_is_token() {
        let s = State::new("in_review", "In review");
        assert_eq!(s.to_string(), "in_review");
    }

    #[test]
    fn test_def_serializes() {
        let s = State::new("draft", "Draft");
        let json = serde_json::to_value(s.def()).unwrap();
        assert_eq!(json["token"], "draft");
        assert_eq!(json["label"], "Draft");
    }
}
