//! Read-only aggregate queries over a pool.
//!
//! Every query takes the pool lock for the duration of its read, so a query
//! issued while producers are running sees a consistent (if immediately
//! stale) view. Only after the run reaches [`EngineState::Terminal`] is the
//! result stable.
//!
//! [`EngineState::Terminal`]: crate::EngineState::Terminal

use crate::{SharedPool, is_prime_magnitude};
use std::sync::Arc;

/// Aggregate counts over one consistent view of the pool.
///
/// `odd + even == total` always holds, since the pool never contains zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolCounts {
    pub total: usize,
    pub odd: usize,
    pub even: usize,
    /// Values whose magnitude is prime, including negated primes.
    pub prime: usize,
}

impl PoolCounts {
    /// Counts `values` in a single pass.
    pub fn from_values(values: &[i32]) -> Self {
        let mut counts = Self {
            total: values.len(),
            ..Self::default()
        };
        for &value in values {
            if is_odd(value) {
                counts.odd += 1;
            } else {
                counts.even += 1;
            }
            if is_prime_magnitude(value) {
                counts.prime += 1;
            }
        }
        counts
    }
}

#[inline]
const fn is_odd(value: i32) -> bool {
    value % 2 != 0
}

/// Query facade handed to the presentation layer.
///
/// Cheap to clone; all clones read the same pool.
#[derive(Clone, Debug)]
pub struct Query {
    pool: Arc<SharedPool>,
}

impl Query {
    pub const fn new(pool: Arc<SharedPool>) -> Self {
        Self { pool }
    }

    /// Number of values in the pool.
    pub fn total_count(&self) -> usize {
        self.pool.size()
    }

    /// Number of odd values (positive or negative).
    pub fn odd_count(&self) -> usize {
        self.pool
            .with_values(|values| values.iter().filter(|&&v| is_odd(v)).count())
    }

    /// Number of even values.
    pub fn even_count(&self) -> usize {
        self.pool
            .with_values(|values| values.iter().filter(|&&v| !is_odd(v)).count())
    }

    /// Number of values whose magnitude is prime.
    ///
    /// Trial division is slow on a full pool, so this counts over a snapshot
    /// instead of holding the lock against the producers.
    pub fn prime_count(&self) -> usize {
        self.pool
            .snapshot()
            .into_iter()
            .filter(|&v| is_prime_magnitude(v))
            .count()
    }

    /// Every value currently in the pool. Sorted once the run is terminal.
    pub fn all_values(&self) -> Vec<i32> {
        self.pool.snapshot()
    }

    /// All counts from one snapshot, so they agree with each other.
    pub fn counts(&self) -> PoolCounts {
        PoolCounts::from_values(&self.pool.snapshot())
    }

    /// Returns `true` once the pool has been sorted and sealed.
    pub fn is_final(&self) -> bool {
        self.pool.is_sealed()
    }
}
