use crate::{Draw, Error, Producer, ProducerKind, Result, is_prime};

/// Walks the integers upward from 2 and emits each prime negated.
///
/// No randomness is involved: every candidate is tested exactly once, in
/// order, and the counter advances once per iteration whether or not the
/// candidate was prime. Over a run the producer therefore inserts
/// `-2, -3, -5, -7, -11, ...` with no gaps.
///
/// Once `i32::MAX` has been tested the next draw fails with
/// [`Error::CandidateOverflow`].
#[derive(Debug, Clone)]
pub struct PrimeProducer {
    next: Option<i32>,
}

impl PrimeProducer {
    /// Creates a prime producer whose first candidate is 2.
    pub const fn new() -> Self {
        Self::starting_at(2)
    }

    /// Creates a prime producer whose first candidate is `candidate`.
    pub const fn starting_at(candidate: i32) -> Self {
        Self {
            next: Some(candidate),
        }
    }

    /// The candidate the next draw will test, or `None` once the range is
    /// exhausted.
    pub const fn next_candidate(&self) -> Option<i32> {
        self.next
    }
}

impl Default for PrimeProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for PrimeProducer {
    fn kind(&self) -> ProducerKind {
        ProducerKind::Prime
    }

    fn draw(&mut self) -> Result<Draw> {
        let candidate = self.next.ok_or(Error::CandidateOverflow {
            kind: ProducerKind::Prime,
        })?;
        self.next = candidate.checked_add(1);

        if is_prime(candidate as i64) {
            Ok(Draw::Accepted(-candidate))
        } else {
            Ok(Draw::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_negated_primes_in_order() {
        let mut producer = PrimeProducer::new();
        let accepted: Vec<i32> = (0..30)
            .filter_map(|_| match producer.draw().unwrap() {
                Draw::Accepted(value) => Some(value),
                Draw::Rejected => None,
            })
            .collect();

        assert_eq!(accepted, [-2, -3, -5, -7, -11, -13, -17, -19, -23, -29, -31]);
        assert_eq!(producer.next_candidate(), Some(32));
    }

    #[test]
    fn advances_once_per_draw() {
        let mut producer = PrimeProducer::new();
        assert_eq!(producer.draw().unwrap().unwrap_accepted(), -2);
        assert_eq!(producer.next_candidate(), Some(3));
        assert_eq!(producer.draw().unwrap().unwrap_accepted(), -3);
        assert_eq!(producer.draw().unwrap(), Draw::Rejected);
        assert_eq!(producer.next_candidate(), Some(5));
    }

    #[test]
    fn faults_after_the_last_candidate() {
        let mut producer = PrimeProducer::starting_at(i32::MAX);
        assert_eq!(producer.draw().unwrap(), Draw::Accepted(-i32::MAX));
        assert_eq!(producer.next_candidate(), None);

        let err = producer.draw().unwrap_err();
        assert!(matches!(
            err,
            Error::CandidateOverflow {
                kind: ProducerKind::Prime
            }
        ));
        assert!(err.is_producer_fault());
    }
}
