//! stateflow-core - Flow and State capability surface
//!
//! This crate defines the **structural** aspects of stateflow:
//! - `State`: immutable, token-identified members of a flow
//! - `Flow`: an ordered, fixed set of states declared together
//! - `FlowRegistry`: deferred lookup of flows by dotted locator
//! - `FlowRef` / `resolve`: live or deferred flow references
//!
//! **IMPORTANT**: This layer is Pure Rust - no IO, no Async.

pub mod flow;
pub mod registry;
pub mod resolve;
pub mod state;

pub use flow::{Flow, FlowBuilder, FlowError};
pub use registry::{FlowRegistry, ResolveError};
pub use resolve::{resolve, FlowRef};
pub use state::{State, StateDef};
