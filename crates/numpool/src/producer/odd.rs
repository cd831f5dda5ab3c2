use crate::{Draw, Producer, ProducerKind, RandSource, Result, ThreadRandom};

/// Draws uniformly random values in `[1, i32::MAX]` and keeps the odd ones.
#[derive(Debug, Default, Clone)]
pub struct OddProducer<R = ThreadRandom> {
    rand: R,
}

impl OddProducer {
    /// Creates an odd producer backed by the thread-local RNG.
    pub const fn new() -> Self {
        Self { rand: ThreadRandom }
    }
}

impl<R> OddProducer<R>
where
    R: RandSource<i32>,
{
    /// Creates an odd producer backed by a custom [`RandSource`].
    pub const fn with_rand(rand: R) -> Self {
        Self { rand }
    }
}

impl<R> Producer for OddProducer<R>
where
    R: RandSource<i32> + Send + 'static,
{
    fn kind(&self) -> ProducerKind {
        ProducerKind::Odd
    }

    fn draw(&mut self) -> Result<Draw> {
        let value = self.rand.rand();
        if value % 2 != 0 {
            Ok(Draw::Accepted(value))
        } else {
            Ok(Draw::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::mock::CyclingRand;

    #[test]
    fn keeps_only_odd_values() {
        let mut producer = OddProducer::with_rand(CyclingRand::new([3, 4, i32::MAX, 2, 1]));

        assert_eq!(producer.draw().unwrap(), Draw::Accepted(3));
        assert_eq!(producer.draw().unwrap(), Draw::Rejected);
        assert_eq!(producer.draw().unwrap(), Draw::Accepted(i32::MAX));
        assert_eq!(producer.draw().unwrap(), Draw::Rejected);
        assert_eq!(producer.draw().unwrap(), Draw::Accepted(1));
    }

    #[test]
    fn thread_random_draws_are_positive_and_odd() {
        let mut producer = OddProducer::new();
        assert_eq!(producer.kind(), ProducerKind::Odd);
        for _ in 0..1_000 {
            if let Draw::Accepted(value) = producer.draw().unwrap() {
                assert!(value > 0 && value % 2 == 1, "{value}");
            }
        }
    }
}
