use core::fmt;
use portable_atomic::{AtomicU8, Ordering};

/// Lifecycle of an [`Engine`] run.
///
/// `Idle -> Running -> Draining -> Terminal`, and back to `Running` when a new
/// run starts.
///
/// [`Engine`]: crate::Engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[repr(u8)]
pub enum EngineState {
    /// No run has started.
    Idle = 0,
    /// Producers are inserting; the coordinator is polling.
    Running = 1,
    /// The stop signal is set; waiting for every producer to exit.
    Draining = 2,
    /// The pool is sorted and immutable.
    Terminal = 3,
}

impl EngineState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Draining,
            _ => Self::Terminal,
        }
    }

    /// Returns `true` while a run is in progress.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Draining)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// Why a run stopped producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StopCause {
    /// The pool reached `max_entries`.
    CapacityReached,
    /// The deadline elapsed first. Not an error.
    TimedOut,
    /// [`Engine::stop`] was called.
    ///
    /// [`Engine::stop`]: crate::Engine::stop
    Stopped,
    /// Every launched producer had finished and no relaunch was due.
    ProducersExhausted,
}

impl fmt::Display for StopCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CapacityReached => "capacity reached",
            Self::TimedOut => "timed out",
            Self::Stopped => "stopped",
            Self::ProducersExhausted => "producers exhausted",
        };
        f.write_str(name)
    }
}

/// Atomic cell holding an [`EngineState`].
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(EngineState::Idle as u8))
    }

    pub(crate) fn get(&self) -> EngineState {
        EngineState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, state: EngineState) {
        #[cfg(feature = "tracing")]
        tracing::debug!("engine state -> {state}");
        self.0.store(state as u8, Ordering::Release);
    }

    /// Moves to `Running` unless a run is already active.
    pub(crate) fn try_begin(&self) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                (!EngineState::from_u8(raw).is_active()).then_some(EngineState::Running as u8)
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begins_only_when_inactive() {
        let cell = StateCell::new();
        assert_eq!(cell.get(), EngineState::Idle);
        assert!(cell.try_begin());
        assert_eq!(cell.get(), EngineState::Running);
        assert!(!cell.try_begin());

        cell.set(EngineState::Draining);
        assert!(!cell.try_begin());

        cell.set(EngineState::Terminal);
        assert!(cell.try_begin());
        assert_eq!(cell.get(), EngineState::Running);
    }
}
