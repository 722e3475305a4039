//! Record integration - the host-framework surface the fields need.
//!
//! The real persistence framework owns record lifecycle and the query
//! layer; this module is the narrow contract stateflow requires from it:
//! a registration hook per (record type, field name), and per-instance
//! private attribute storage for the coerced values.

use crate::accessor::StateAccessor;
use crate::field::{StateField, Value};
use ahash::AHashMap;
use stateflow_core::{FlowError, State};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("record type `{record}` has no state field `{field}`")]
    UnknownField { record: String, field: String },
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Per-record-instance private storage: field name to coerced slot.
///
/// Invariant: a slot holds either nothing or a canonical state of the
/// owning field's flow - never a raw token.
#[derive(Debug, Default)]
pub struct AttributeStore {
    slots: AHashMap<String, Option<State>>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put(&mut self, name: &str, value: Option<State>) {
        self.slots.insert(name.to_string(), value);
    }

    pub(crate) fn slot(&self, name: &str) -> Option<&State> {
        self.slots.get(name).and_then(Option::as_ref)
    }
}

/// A named record schema: the fields attached to it and their accessors.
#[derive(Debug, Default)]
pub struct RecordType {
    name: String,
    accessors: AHashMap<String, StateAccessor>,
    fields: Vec<Arc<StateField>>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registration hook, invoked once per field at class-definition
    /// time: lists the field on the type AND installs the coercing
    /// accessor under the field's name. Attaching over an existing name
    /// replaces the previous accessor.
    pub fn attach(&mut self, field: StateField) -> &mut Self {
        let field = Arc::new(field);
        tracing::debug!(
            record = %self.name,
            field = %field.name(),
            flow = %field.flow().name(),
            "attaching state field"
        );
        if let Some(previous) = self
            .fields
            .iter()
            .position(|f| f.name() == field.name())
        {
            self.fields[previous] = field.clone();
        } else {
            self.fields.push(field.clone());
        }
        self.accessors
            .insert(field.name().to_string(), StateAccessor::new(field));
        self
    }

    /// Type-level access: the accessor itself, never a value.
    pub fn accessor(&self, name: &str) -> Option<&StateAccessor> {
        self.accessors.get(name)
    }

    /// Attached fields, in attachment order.
    pub fn fields(&self) -> impl Iterator<Item = &StateField> {
        self.fields.iter().map(Arc::as_ref)
    }

    fn require(&self, name: &str) -> Result<&StateAccessor, RecordError> {
        self.accessors
            .get(name)
            .ok_or_else(|| RecordError::UnknownField {
                record: self.name.clone(),
                field: name.to_string(),
            })
    }
}

/// One record instance: a schema handle plus private attribute storage.
#[derive(Debug)]
pub struct Record {
    ty: Arc<RecordType>,
    attrs: AttributeStore,
}

impl Record {
    pub fn new(ty: Arc<RecordType>) -> Self {
        Self {
            ty,
            attrs: AttributeStore::new(),
        }
    }

    pub fn record_type(&self) -> &RecordType {
        &self.ty
    }

    /// Assign through the field's coercing accessor.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let accessor = self.ty.require(field)?;
        accessor.set(&mut self.attrs, value)?;
        Ok(())
    }

    /// Read the stored state verbatim.
    pub fn get(&self, field: &str) -> Result<Option<&State>, RecordError> {
        let accessor = self.ty.require(field)?;
        Ok(accessor.get(&self.attrs))
    }

    /// Load a persisted scalar into the slot, via the field's inbound
    /// conversion. An unknown stored token is a data-corruption condition
    /// and propagates.
    pub fn load(&mut self, field: &str, raw: Option<&str>) -> Result<(), RecordError> {
        let accessor = self.ty.require(field)?;
        let coerced = accessor.field().from_storage(raw)?;
        self.attrs.put(field, coerced);
        Ok(())
    }

    /// Prepare the slot's value for persistence.
    pub fn dump(&self, field: &str) -> Result<Option<String>, RecordError> {
        let accessor = self.ty.require(field)?;
        let value = match accessor.get(&self.attrs) {
            Some(state) => Value::State(state.clone()),
            None => Value::Null,
        };
        Ok(accessor.field().to_storage(&value))
    }
}
