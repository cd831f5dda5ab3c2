use crate::{Error, Result};
use core::time::Duration;

/// Hard cap on the number of values in the pool.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000_000;

/// Pool size at which the even producer is (re)considered for activation.
pub const DEFAULT_EVEN_ACTIVATION_THRESHOLD: usize = 2_500_000;

/// Wall-clock budget for a single run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Back-off after each producer iteration.
pub const DEFAULT_PRODUCER_INTERVAL: Duration = Duration::from_millis(10);

/// Coordinator polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// When the first even producer instance is launched.
///
/// Under both policies, once the pool has reached the activation threshold
/// the coordinator launches a fresh even producer whenever the most recently
/// launched one has finished, so at least one stays live until the run stops.
/// Every instance ever launched is tracked and awaited.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EvenActivation {
    /// Launch the first even producer when the pool first reaches the
    /// threshold. No even value can appear before that point.
    #[default]
    Deferred,
    /// Launch one even producer at start, alongside the odd and prime
    /// producers.
    Eager,
}

/// Tunables for one engine run.
///
/// Defaults match a full-size production run: ten million entries, even
/// activation at two and a half million, a five minute deadline and 10ms
/// back-off everywhere.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use numpool::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_max_entries(1_000)
///     .with_even_activation_threshold(10)
///     .with_timeout(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub max_entries: usize,
    pub even_activation_threshold: usize,
    pub timeout: Duration,
    pub producer_interval: Duration,
    pub poll_interval: Duration,
    pub even_activation: EvenActivation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            even_activation_threshold: DEFAULT_EVEN_ACTIVATION_THRESHOLD,
            timeout: DEFAULT_TIMEOUT,
            producer_interval: DEFAULT_PRODUCER_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            even_activation: EvenActivation::Deferred,
        }
    }
}

impl EngineConfig {
    /// Set the hard cap on pool size.
    pub const fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the pool size that activates the even producer.
    pub const fn with_even_activation_threshold(mut self, threshold: usize) -> Self {
        self.even_activation_threshold = threshold;
        self
    }

    /// Set the wall-clock budget for a run.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the back-off after each producer iteration.
    pub const fn with_producer_interval(mut self, interval: Duration) -> Self {
        self.producer_interval = interval;
        self
    }

    /// Set the coordinator polling period.
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Choose when the first even producer launches.
    pub const fn with_even_activation(mut self, activation: EvenActivation) -> Self {
        self.even_activation = activation;
        self
    }

    /// Checks the configuration before a run.
    ///
    /// A threshold above `max_entries` is allowed; it simply means the even
    /// producer never activates under [`EvenActivation::Deferred`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `max_entries`, the timeout, or
    /// either interval is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(invalid("max_entries must be greater than 0"));
        }
        if self.timeout.is_zero() {
            return Err(invalid("timeout must be greater than 0"));
        }
        if self.poll_interval.is_zero() {
            return Err(invalid("poll_interval must be greater than 0"));
        }
        if self.producer_interval.is_zero() {
            return Err(invalid("producer_interval must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Error {
    Error::InvalidConfig {
        reason: reason.to_owned(),
    }
}
