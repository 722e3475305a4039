//! StateField - the persistable field descriptor.
//!
//! A `StateField` composes flow resolution with the scalar conversions the
//! storage boundary needs: states persist as their text tokens, and every
//! inbound value is coerced back to a canonical [`State`] of the field's
//! flow. The flow reference is resolved exactly once, inside the builder;
//! the original reference argument is kept for reproducing an equivalent
//! field definition later.

use serde::{Deserialize, Serialize};
use stateflow_core::{resolve, Flow, FlowError, FlowRef, FlowRegistry, ResolveError, State};
use std::sync::Arc;
use thiserror::Error;

/// Label paired with the `None` choice handed to input renderers.
pub const UNSET_LABEL: &str = "— unset —";

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("state field `{0}` has no flow")]
    MissingFlow(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The scalar column shape a state field persists as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Text,
}

/// A value on its way into or out of a state field.
///
/// `Raw` covers tokens (and arbitrary strings) assigned without prior
/// coercion; `State` is the canonical in-memory form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    State(State),
    Raw(String),
}

impl From<State> for Value {
    fn from(state: State) -> Self {
        Value::State(state)
    }
}

impl From<&str> for Value {
    fn from(raw: &str) -> Self {
        Value::Raw(raw.to_string())
    }
}

impl From<String> for Value {
    fn from(raw: String) -> Self {
        Value::Raw(raw)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A persistable finite-state field bound to one flow.
#[derive(Debug, Clone)]
pub struct StateField {
    name: String,
    verbose_name: Option<String>,
    flow: Arc<Flow>,
    flow_path: String,
    flow_ref: FlowRef,
}

impl StateField {
    pub fn builder(name: impl Into<String>) -> StateFieldBuilder {
        StateFieldBuilder {
            name: name.into(),
            verbose_name: None,
            flow: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verbose_name(&self) -> Option<&str> {
        self.verbose_name.as_deref()
    }

    /// The resolved flow. Never changes after construction.
    pub fn flow(&self) -> &Arc<Flow> {
        &self.flow
    }

    /// Canonical string identifying the flow reference.
    pub fn flow_path(&self) -> &str {
        &self.flow_path
    }

    pub fn storage_kind(&self) -> StorageKind {
        StorageKind::Text
    }

    /// Outbound conversion: state to storable scalar.
    ///
    /// `Null` maps to `None`, a state to its token, and a raw string passes
    /// through unchanged (fallback for a token assigned without coercion -
    /// an invalid one fails on the next inbound conversion).
    pub fn to_storage(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::State(state) => Some(state.token().to_string()),
            Value::Raw(raw) => Some(raw.clone()),
        }
    }

    /// Inbound conversion: any assigned or loaded value to a canonical state.
    ///
    /// Idempotent: an already-coerced state returns unchanged. An empty
    /// raw string is treated as unset, matching the storage boundary's
    /// `None`/empty allowance. An unknown token is a data-integrity error
    /// and propagates.
    pub fn coerce(&self, value: Value) -> Result<Option<State>, FlowError> {
        match value {
            Value::Null => Ok(None),
            Value::State(state) => Ok(Some(state)),
            Value::Raw(raw) if raw.is_empty() => Ok(None),
            Value::Raw(raw) => self.flow.get_state(&raw).map(Some),
        }
    }

    /// Inbound conversion from the storage layer.
    pub fn from_storage(&self, raw: Option<&str>) -> Result<Option<State>, FlowError> {
        match raw {
            None => Ok(None),
            Some(token) => self.coerce(Value::Raw(token.to_string())),
        }
    }

    /// The choice list handed to an input-rendering collaborator:
    /// the unset option followed by the flow's `(token, label)` pairs.
    pub fn choices(&self) -> Vec<(Option<String>, String)> {
        let mut choices = vec![(None, UNSET_LABEL.to_string())];
        choices.extend(
            self.flow
                .state_choices()
                .into_iter()
                .map(|(token, label)| (Some(token), label)),
        );
        choices
    }

    /// Rebuild the construction arguments, carrying the ORIGINAL flow
    /// reference so re-running construction is equivalent regardless of
    /// which reference form was supplied.
    pub fn deconstruct(&self) -> StateFieldBuilder {
        StateFieldBuilder {
            name: self.name.clone(),
            verbose_name: self.verbose_name.clone(),
            flow: Some(self.flow_ref.clone()),
        }
    }

    /// Serializable snapshot of the field definition for schema files.
    pub fn spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.name.clone(),
            verbose_name: self.verbose_name.clone(),
            flow: self.flow_ref.to_string(),
        }
    }
}

/// Builder for [`StateField`]. `build` performs the one-time flow
/// resolution; a missing flow is a configuration error.
#[derive(Debug, Clone)]
pub struct StateFieldBuilder {
    name: String,
    verbose_name: Option<String>,
    flow: Option<FlowRef>,
}

impl StateFieldBuilder {
    pub fn verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    pub fn flow(mut self, flow: impl Into<FlowRef>) -> Self {
        self.flow = Some(flow.into());
        self
    }

    /// Resolve against the process-wide registry.
    pub fn build(self) -> Result<StateField, FieldError> {
        self.build_with(FlowRegistry::global())
    }

    /// Resolve against an explicit registry.
    pub fn build_with(self, registry: &FlowRegistry) -> Result<StateField, FieldError> {
        let flow_ref = self
            .flow
            .ok_or_else(|| FieldError::MissingFlow(self.name.clone()))?;
        let (flow, flow_path) = resolve(&flow_ref, registry)?;
        Ok(StateField {
            name: self.name,
            verbose_name: self.verbose_name,
            flow,
            flow_path,
            flow_ref,
        })
    }
}

/// Serializable field definition, usable by schema-diffing tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub verbose_name: Option<String>,
    pub flow: String,
}
