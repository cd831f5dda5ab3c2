use super::{MutexGuard, PaddedMutex, padded_mutex};
use crate::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Upper bound on the capacity reserved up front, so a large cap does not
/// allocate the whole pool before the first insertion.
const INITIAL_RESERVE: usize = 1 << 16;

struct PoolState {
    values: Vec<i32>,
    sealed: bool,
}

/// A bounded, lock-guarded sequence of nonzero integers.
///
/// All producers and the coordinator share one [`SharedPool`] behind an
/// [`Arc`]. Every mutation, every size read used for a control decision, and
/// the final sort go through the same mutex, so the capacity can never be
/// exceeded regardless of how many producers race on it.
///
/// Once [`SharedPool::sort_ascending`] has run, the pool is **sealed**: it is
/// sorted exactly once and refuses any further insertion.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Hard capacity cap checked under the lock
/// - ✅ `cache-padded` feature pads the mutex to its own cache line
///
/// [`Arc`]: std::sync::Arc
pub struct SharedPool {
    state: PaddedMutex<PoolState>,
    max_entries: usize,
}

impl SharedPool {
    /// Creates an empty pool that holds at most `max_entries` values.
    ///
    /// # Example
    /// ```
    /// use numpool::SharedPool;
    ///
    /// let pool = SharedPool::new(2);
    /// assert!(pool.try_insert(-2));
    /// assert!(pool.try_insert(7));
    /// assert!(!pool.try_insert(9));
    /// assert_eq!(pool.size(), 2);
    /// ```
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: padded_mutex(PoolState {
                values: Vec::with_capacity(max_entries.min(INITIAL_RESERVE)),
                sealed: false,
            }),
            max_entries,
        }
    }

    /// The hard capacity of this pool.
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Acquires the pool lock.
    ///
    /// Producers hold the returned guard for exactly one iteration: check the
    /// stop condition and capacity, then attempt one insertion. The guard must
    /// be dropped before the producer suspends.
    pub fn lock(&self) -> PoolGuard<'_> {
        PoolGuard {
            state: self.state.lock(),
            max_entries: self.max_entries,
        }
    }

    /// Appends `value` if there is room. See [`PoolGuard::try_insert`].
    pub fn try_insert(&self, value: i32) -> bool {
        self.lock().try_insert(value)
    }

    /// Current number of values in the pool.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` once the pool has been sorted and sealed.
    pub fn is_sealed(&self) -> bool {
        self.lock().is_sealed()
    }

    /// Sorts the pool ascending and seals it.
    ///
    /// The sort runs under the insertion lock, so no insertion can interleave
    /// with it. It is meant to run once, after every producer has stopped.
    ///
    /// # Errors
    /// - Returns [`Error::PoolSealed`] if the pool was already sorted.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn sort_ascending(&self) -> Result<()> {
        let mut guard = self.state.lock();
        if guard.sealed {
            return Err(Error::PoolSealed);
        }
        guard.values.sort_unstable();
        guard.sealed = true;
        Ok(())
    }

    /// Copies the current contents out from under the lock.
    pub fn snapshot(&self) -> Vec<i32> {
        self.state.lock().values.clone()
    }

    /// Runs `f` over the current contents while holding the lock.
    pub(crate) fn with_values<R>(&self, f: impl FnOnce(&[i32]) -> R) -> R {
        f(&self.state.lock().values)
    }
}

impl core::fmt::Debug for SharedPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let guard = self.lock();
        f.debug_struct("SharedPool")
            .field("len", &guard.len())
            .field("max_entries", &self.max_entries)
            .field("sealed", &guard.is_sealed())
            .finish()
    }
}

/// Exclusive access to a [`SharedPool`] for the duration of one critical
/// section.
pub struct PoolGuard<'a> {
    state: MutexGuard<'a, PoolState>,
    max_entries: usize,
}

impl PoolGuard<'_> {
    /// Current number of values.
    pub fn len(&self) -> usize {
        self.state.values.len()
    }

    /// Returns `true` if the pool holds no values.
    pub fn is_empty(&self) -> bool {
        self.state.values.is_empty()
    }

    /// Returns `true` if no further insertion can succeed because the cap has
    /// been reached or the pool is sealed.
    pub fn is_full(&self) -> bool {
        self.state.sealed || self.state.values.len() >= self.max_entries
    }

    /// Returns `true` once the pool has been sorted and sealed.
    pub fn is_sealed(&self) -> bool {
        self.state.sealed
    }

    /// Appends `value` and returns `true`, or returns `false` without mutating
    /// the pool when it is full or sealed.
    ///
    /// Zero is refused as well; every value in the pool is nonzero.
    pub fn try_insert(&mut self, value: i32) -> bool {
        if value == 0 || self.is_full() {
            return false;
        }
        self.state.values.push(value);
        true
    }

    /// The current contents, in insertion order until the pool is sealed.
    pub fn values(&self) -> &[i32] {
        &self.state.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread::scope;

    #[test]
    fn refuses_insertions_past_capacity() {
        let pool = SharedPool::new(3);
        assert!(pool.try_insert(1));
        assert!(pool.try_insert(2));
        assert!(pool.try_insert(-3));
        assert!(!pool.try_insert(5));
        assert_eq!(pool.snapshot(), [1, 2, -3]);
    }

    #[test]
    fn refuses_zero() {
        let pool = SharedPool::new(4);
        assert!(!pool.try_insert(0));
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let pool = SharedPool::new(0);
        assert!(pool.lock().is_full());
        assert!(!pool.try_insert(1));
    }

    #[test]
    fn sort_seals_the_pool() {
        let pool = SharedPool::new(10);
        for v in [9, -2, 4, -11, 1] {
            assert!(pool.try_insert(v));
        }
        pool.sort_ascending().unwrap();

        assert!(pool.is_sealed());
        assert_eq!(pool.snapshot(), [-11, -2, 1, 4, 9]);
        assert!(!pool.try_insert(3));
        assert!(pool.lock().is_full());
        assert!(matches!(pool.sort_ascending(), Err(Error::PoolSealed)));
        assert_eq!(pool.size(), 5);
    }

    #[test]
    fn cap_holds_under_contention() {
        const THREADS: usize = 8;
        const CAP: usize = 1_000;

        let pool = Arc::new(SharedPool::new(CAP));

        scope(|s| {
            for t in 0..THREADS {
                let pool = Arc::clone(&pool);
                s.spawn(move || {
                    let mut accepted = 0;
                    for i in 1..=CAP {
                        let value = (t * CAP + i) as i32;
                        if pool.try_insert(value) {
                            accepted += 1;
                        }
                        assert!(pool.size() <= CAP);
                    }
                    accepted
                });
            }
        });

        assert_eq!(pool.size(), CAP);
    }

    #[test]
    fn guard_checks_and_inserts_in_one_critical_section() {
        let pool = SharedPool::new(2);
        {
            let mut guard = pool.lock();
            assert!(guard.is_empty());
            assert!(!guard.is_full());
            assert!(guard.try_insert(7));
            assert!(guard.try_insert(8));
            assert!(guard.is_full());
            assert!(!guard.try_insert(9));
            assert_eq!(guard.values(), [7, 8]);
        }
        assert_eq!(pool.size(), 2);
    }
}
