//! StateAccessor - the coercion choke point for one field.
//!
//! Installed once per (record type, field name) at registration time, the
//! accessor is the sole read/write gate for that attribute: every write is
//! coerced through the field before it reaches the record's private
//! storage, and reads return the stored state verbatim with no flow lookup.
//!
//! Validation is eager: writing an unknown token fails the write itself
//! instead of surfacing at the next load or persist.

use crate::field::{StateField, Value};
use crate::record::AttributeStore;
use stateflow_core::{FlowError, State};
use std::sync::Arc;

/// Per-field attribute gate. Owns no state beyond its field descriptor;
/// never recreated per record instance.
#[derive(Debug, Clone)]
pub struct StateAccessor {
    field: Arc<StateField>,
}

impl StateAccessor {
    pub fn new(field: Arc<StateField>) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &StateField {
        &self.field
    }

    /// Coerce and store a value in the record's private slot.
    ///
    /// Idempotent for already-coerced states. An unknown token propagates
    /// and leaves the slot untouched.
    pub fn set(&self, attrs: &mut AttributeStore, value: impl Into<Value>) -> Result<(), FlowError> {
        let coerced = self.field.coerce(value.into())?;
        attrs.put(self.field.name(), coerced);
        Ok(())
    }

    /// Read the previously stored state verbatim. O(1), no re-validation.
    pub fn get<'a>(&self, attrs: &'a AttributeStore) -> Option<&'a State> {
        attrs.slot(self.field.name())
    }
}
