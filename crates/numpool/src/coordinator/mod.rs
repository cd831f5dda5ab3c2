//! Run supervision and the engine facade.
//!
//! This module contains the coordinator state machine that sequences producer
//! activation, races the size cap against the deadline, drains every producer
//! and seals the pool, plus the [`Engine`] that owns one run at a time.
//!
//! ## Structure
//!
//! - [`Engine`] - entry point for the presentation layer.
//! - [`ProducerFactory`] - which producers a run launches.
//! - [`RunSummary`] - what a completed run reports.

mod engine;
mod factory;
mod state;
mod summary;
mod supervisor;

pub use engine::*;
pub use factory::*;
pub use state::{EngineState, StopCause};
pub use summary::*;
