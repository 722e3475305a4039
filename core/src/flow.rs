//! Flow - an ordered, fixed collection of states declared together.
//!
//! A `Flow` is the legal vocabulary for one state field: it maps storable
//! tokens back to their canonical `State` values and enumerates its states
//! as `(token, label)` choice pairs in declaration order. Flows are built
//! once through [`FlowBuilder`] and immutable afterwards.

use crate::state::State;
use ahash::AHashMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("unknown state token `{token}` for flow `{flow}`")]
    UnknownToken { flow: String, token: String },
    #[error("duplicate state token `{token}` in flow `{flow}`")]
    DuplicateToken { flow: String, token: String },
}

/// A named state-machine definition.
#[derive(Debug)]
pub struct Flow {
    id: Uuid,
    name: String,
    states: Vec<State>,
    index: AHashMap<String, usize>,
}

impl Flow {
    pub fn builder(name: impl Into<String>) -> FlowBuilder {
        FlowBuilder {
            name: name.into(),
            states: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All states, in declaration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// `(token, label)` pairs for every state, declaration order preserved.
    pub fn state_choices(&self) -> Vec<(String, String)> {
        self.states
            .iter()
            .map(|s| (s.token().to_string(), s.label().to_string()))
            .collect()
    }

    /// Map a storable token back to its canonical state.
    ///
    /// An unknown token is a data-integrity error and surfaces as
    /// [`FlowError::UnknownToken`]; it is never defaulted.
    pub fn get_state(&self, token: &str) -> Result<State, FlowError> {
        self.index
            .get(token)
            .map(|&i| self.states[i].clone())
            .ok_or_else(|| FlowError::UnknownToken {
                flow: self.name.clone(),
                token: token.to_string(),
            })
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Flow`]. Declaration order of `state` calls is preserved.
pub struct FlowBuilder {
    name: String,
    states: Vec<State>,
}

impl FlowBuilder {
    pub fn state(mut self, token: impl Into<String>, label: impl Into<String>) -> Self {
        self.states.push(State::new(token, label));
        self
    }

    pub fn build(self) -> Result<Flow, FlowError> {
        let mut index = AHashMap::with_capacity(self.states.len());
        for (i, state) in self.states.iter().enumerate() {
            if index.insert(state.token().to_string(), i).is_some() {
                return Err(FlowError::DuplicateToken {
                    flow: self.name,
                    token: state.token().to_string(),
                });
            }
        }
        Ok(Flow {
            id: Uuid::new_v4(),
            name: self.name,
            states: self.states,
            index,
        })
    }
}
