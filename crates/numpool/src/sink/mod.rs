//! The boundary between the engine and durable storage.
//!
//! The engine hands a finished, sorted snapshot to a [`PersistenceSink`] as
//! [`NewNumber`] records. The sink owns identity: it assigns each record an id
//! and stores it as a [`PersistedNumber`]. [`MemorySink`] is a reference
//! implementation for tests and local tooling.

mod interface;
mod memory;
mod record;

pub use interface::*;
pub use memory::*;
pub use record::*;
