use crate::{PoolCounts, ProducerKind, ProducerReport, StopCause};
use core::time::Duration;

/// A producer that ended with an error or a panic instead of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProducerFault {
    pub kind: ProducerKind,
    pub message: String,
}

/// The outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// What stopped production.
    pub cause: StopCause,
    /// Wall-clock time from launch to the final sort.
    pub elapsed: Duration,
    /// Counts over the sorted, terminal pool.
    pub counts: PoolCounts,
    /// How many even producer instances were launched over the run.
    pub even_launches: usize,
    /// Reports from producers that exited cleanly.
    pub reports: Vec<ProducerReport>,
    /// Producers that faulted. These never abort the run.
    pub faults: Vec<ProducerFault>,
}

impl RunSummary {
    /// Total insertions recorded by producers that exited cleanly.
    pub fn reported_insertions(&self) -> u64 {
        self.reports.iter().map(|r| r.inserted).sum()
    }

    /// Returns `true` if the run ended because its deadline elapsed.
    pub fn timed_out(&self) -> bool {
        self.cause == StopCause::TimedOut
    }
}
