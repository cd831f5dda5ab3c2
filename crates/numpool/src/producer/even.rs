use crate::{Draw, Producer, ProducerKind, RandSource, Result, ThreadRandom};

/// Draws uniformly random values in `[1, i32::MAX]` and keeps the even ones.
///
/// The coordinator may launch several instances over one run (see
/// [`EvenActivation`]); each instance runs the same loop independently.
///
/// [`EvenActivation`]: crate::EvenActivation
#[derive(Debug, Default, Clone)]
pub struct EvenProducer<R = ThreadRandom> {
    rand: R,
}

impl EvenProducer {
    /// Creates an even producer backed by the thread-local RNG.
    pub const fn new() -> Self {
        Self { rand: ThreadRandom }
    }
}

impl<R> EvenProducer<R>
where
    R: RandSource<i32>,
{
    /// Creates an even producer backed by a custom [`RandSource`].
    pub const fn with_rand(rand: R) -> Self {
        Self { rand }
    }
}

impl<R> Producer for EvenProducer<R>
where
    R: RandSource<i32> + Send + 'static,
{
    fn kind(&self) -> ProducerKind {
        ProducerKind::Even
    }

    fn draw(&mut self) -> Result<Draw> {
        let value = self.rand.rand();
        if value % 2 == 0 {
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
    fn keeps_only_even_values() {
        let mut producer = EvenProducer::with_rand(CyclingRand::new([3, 4, i32::MAX, 2]));

        assert_eq!(producer.draw().unwrap(), Draw::Rejected);
        assert_eq!(producer.draw().unwrap(), Draw::Accepted(4));
        assert_eq!(producer.draw().unwrap(), Draw::Rejected);
        assert_eq!(producer.draw().unwrap(), Draw::Accepted(2));
    }

    #[test]
    fn thread_random_draws_are_positive_and_even() {
        let mut producer = EvenProducer::new();
        assert_eq!(producer.kind(), ProducerKind::Even);
        for _ in 0..1_000 {
            if let Draw::Accepted(value) = producer.draw().unwrap() {
                assert!(value > 0 && value % 2 == 0, "{value}");
            }
        }
    }
}
