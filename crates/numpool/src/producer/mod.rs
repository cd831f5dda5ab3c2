//! Concurrent producers that feed the shared pool.
//!
//! Each producer owns one selection rule ([`Producer::draw`]) and is driven by
//! the same loop ([`run_producer`]): take the pool lock, re-check the stop
//! signal and capacity, attempt one insertion, release the lock, back off.
//!
//! - [`OddProducer`]: random positive odd values.
//! - [`EvenProducer`]: random positive even values.
//! - [`PrimeProducer`]: `-2, -3, -5, -7, ...` from a private counter.

mod even;
mod interface;
mod odd;
mod prime;
mod runner;

pub use even::*;
pub use interface::*;
pub use odd::*;
pub use prime::*;
pub use runner::*;

#[cfg(test)]
pub(crate) mod mock {
    use crate::RandSource;
    use core::cell::Cell;

    /// Replays a fixed list of draws, wrapping around at the end.
    pub(crate) struct CyclingRand {
        values: Vec<i32>,
        index: Cell<usize>,
    }

    impl CyclingRand {
        pub(crate) fn new(values: impl Into<Vec<i32>>) -> Self {
            Self {
                values: values.into(),
                index: Cell::new(0),
            }
        }
    }

    impl RandSource<i32> for CyclingRand {
        fn rand(&self) -> i32 {
            let i = self.index.get();
            self.index.set(i + 1);
            self.values[i % self.values.len()]
        }
    }
}
