//! A bounded pool of integers filled concurrently by independent producers.
//!
//! An [`Engine`] run launches an odd producer and a negated-prime producer as
//! Tokio tasks, activates an even producer once the pool crosses a threshold,
//! and stops everything when the pool reaches its cap, the deadline elapses,
//! or [`Engine::stop`] is called. The pool is then sorted ascending exactly
//! once and can be read through [`Query`] or handed to a [`PersistenceSink`].
//!
//! ## Feature Flags
//! - `tracing`: emit lifecycle and fault events through `tracing`
//! - `serde`: derive `Serialize`/`Deserialize` for configs, summaries and records
//! - `cache-padded`: pad the pool mutex to its own cache line
//! - `all`: every feature above

mod config;
mod coordinator;
mod error;
mod pool;
mod prime;
mod producer;
mod query;
mod random;
mod sink;
mod sleep;

pub use crate::config::*;
pub use crate::coordinator::*;
pub use crate::error::*;
pub use crate::pool::*;
pub use crate::prime::*;
pub use crate::producer::*;
pub use crate::query::*;
pub use crate::random::*;
pub use crate::sink::*;
pub use crate::sleep::*;
