use crate::RandSource;
use rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// Each OS thread has its own RNG instance, so producers running on different
/// runtime workers never contend on it. This type does **not** store the RNG
/// itself; it simply accesses the thread-local generator on each call, which
/// keeps it `Send` and lets producer futures move between worker threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<i32> for ThreadRandom {
    fn rand(&self) -> i32 {
        rng().random_range(1..=i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_positive_range() {
        let source = ThreadRandom;
        for _ in 0..10_000 {
            let value = source.rand();
            assert!(value >= 1, "{value} below range");
        }
    }

    #[test]
    fn draws_produce_both_parities() {
        let source = ThreadRandom;
        let (mut odd, mut even) = (false, false);
        for _ in 0..1_000 {
            if source.rand() % 2 == 0 {
                even = true;
            } else {
                odd = true;
            }
        }
        assert!(odd && even);
    }
}
