//! stateflow-field - persistable state fields for host records
//!
//! This crate composes the stateflow-core resolver into a field descriptor
//! a host record framework can mount:
//! - `StateField`: flow resolution plus the storage scalar conversions
//! - `StateAccessor`: the per-field coercion gate for reads and writes
//! - `RecordType` / `Record`: the registration hook and instance storage
//! - `select`: the choice-enumeration boundary for input renderers

pub mod accessor;
pub mod field;
pub mod record;
pub mod select;

pub use accessor::StateAccessor;
pub use field::{FieldError, FieldSpec, StateField, StateFieldBuilder, StorageKind, Value, UNSET_LABEL};
pub use record::{AttributeStore, Record, RecordError, RecordType};
pub use select::{select_options, SelectOption};
