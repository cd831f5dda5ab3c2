//! Error types for the number pool engine.
//!
//! Most failures inside the engine are contained: a full pool simply refuses
//! insertions, a timeout is a recorded stop cause, and producer faults are
//! reported in the run summary. The only error expected to reach a caller
//! during normal operation is a [`Error::Sink`] failure from an explicit save.
//!
//! ## Error Cases
//! - `InvalidConfig`: an [`EngineConfig`] failed validation.
//! - `AlreadyRunning`: a run was started while another was still active.
//! - `NotTerminal`: a save was requested before the pool was sorted.
//! - `PoolSealed`: the pool was mutated or sorted after it was sealed.
//! - `CandidateOverflow`: a producer's arithmetic left the value range.
//! - `ProducerPanicked`: a producer task panicked.
//! - `Sink`: the persistence collaborator rejected a save.
//!
//! [`EngineConfig`]: crate::EngineConfig

use crate::ProducerKind;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Boxed error returned by a [`PersistenceSink`].
///
/// [`PersistenceSink`]: crate::PersistenceSink
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// All errors that `numpool` can produce.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The configuration was rejected before a run started.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// `start` was called while a run was already in progress.
    #[error("A run is already in progress")]
    AlreadyRunning,

    /// The pool has not reached its terminal (sorted) state yet.
    #[error("The pool is not terminal yet")]
    NotTerminal,

    /// The pool was sorted and no longer accepts mutation.
    #[error("The pool is sealed")]
    PoolSealed,

    /// A producer's candidate value overflowed the pool's value range.
    #[error("{kind} producer overflowed its candidate range")]
    CandidateOverflow { kind: ProducerKind },

    /// A producer task panicked before it could report.
    #[error("{kind} producer panicked")]
    ProducerPanicked { kind: ProducerKind },

    /// The persistence sink failed. The in-memory pool is left untouched.
    #[error("Sink error: {0}")]
    Sink(#[source] BoxError),
}

impl Error {
    /// Returns `true` for faults raised inside a producer.
    ///
    /// These are contained by the coordinator and never returned from
    /// [`Engine::start`].
    ///
    /// [`Engine::start`]: crate::Engine::start
    pub const fn is_producer_fault(&self) -> bool {
        matches!(
            self,
            Self::CandidateOverflow { .. } | Self::ProducerPanicked { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_faults_are_classified() {
        assert!(
            Error::CandidateOverflow {
                kind: ProducerKind::Prime
            }
            .is_producer_fault()
        );
        assert!(
            Error::ProducerPanicked {
                kind: ProducerKind::Even
            }
            .is_producer_fault()
        );
        assert!(!Error::NotTerminal.is_producer_fault());
        assert!(!Error::Sink("disk full".into()).is_producer_fault());
    }

    #[test]
    fn messages_name_the_producer() {
        let err = Error::CandidateOverflow {
            kind: ProducerKind::Prime,
        };
        assert_eq!(err.to_string(), "prime producer overflowed its candidate range");
    }
}
