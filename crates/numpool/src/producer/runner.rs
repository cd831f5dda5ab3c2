use crate::{Draw, Producer, ProducerKind, Result, SharedPool, SleepProvider};
use core::time::Duration;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What a producer did before it exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProducerReport {
    /// The producer's selection rule.
    pub kind: ProducerKind,
    /// Loop iterations that reached a draw.
    pub attempts: u64,
    /// Draws that were accepted and inserted.
    pub inserted: u64,
}

impl ProducerReport {
    pub const fn new(kind: ProducerKind) -> Self {
        Self {
            kind,
            attempts: 0,
            inserted: 0,
        }
    }
}

/// Drives `producer` against `pool` until `stop` is cancelled or the pool is
/// full.
///
/// Each iteration takes the pool lock, re-checks the stop signal and the
/// capacity, performs one [`Producer::draw`] and inserts an accepted value,
/// then releases the lock and suspends for `interval` through `S`. Because
/// the checks run under the same lock as the insertion, no producer can push
/// the pool past its cap, and every producer observes a stop within one
/// iteration.
///
/// This function is designed to be spawned as a Tokio task.
///
/// # Errors
///
/// Returns the producer's error if a draw fails. The pool is not touched on
/// that iteration.
pub async fn run_producer<P, S>(
    mut producer: P,
    pool: Arc<SharedPool>,
    stop: CancellationToken,
    interval: Duration,
) -> Result<ProducerReport>
where
    P: Producer,
    S: SleepProvider,
{
    let mut report = ProducerReport::new(producer.kind());

    #[cfg(feature = "tracing")]
    tracing::trace!("{} producer started", report.kind);

    loop {
        // The guard must not live across the sleep below.
        let done = {
            let mut guard = pool.lock();
            if stop.is_cancelled() || guard.is_full() {
                true
            } else {
                report.attempts += 1;
                if let Draw::Accepted(value) = producer.draw()? {
                    if guard.try_insert(value) {
                        report.inserted += 1;
                    }
                }
                false
            }
        };

        if done {
            break;
        }

        S::sleep_for(interval).await;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        attempts = report.attempts,
        inserted = report.inserted,
        "{} producer stopped",
        report.kind
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error, EvenProducer, OddProducer, PrimeProducer, TokioYield, is_prime,
        producer::mock::CyclingRand,
    };

    const INTERVAL: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn stops_when_the_pool_is_full() {
        let pool = Arc::new(SharedPool::new(25));
        let report = run_producer::<_, TokioYield>(
            OddProducer::new(),
            Arc::clone(&pool),
            CancellationToken::new(),
            INTERVAL,
        )
        .await
        .unwrap();

        assert_eq!(pool.size(), 25);
        assert_eq!(report.kind, ProducerKind::Odd);
        assert_eq!(report.inserted, 25);
        assert!(report.attempts >= report.inserted);
        assert!(pool.snapshot().iter().all(|v| *v > 0 && v % 2 != 0));
    }

    #[tokio::test]
    async fn never_draws_after_stop() {
        let pool = Arc::new(SharedPool::new(100));
        let stop = CancellationToken::new();
        stop.cancel();

        let report = run_producer::<_, TokioYield>(
            EvenProducer::new(),
            Arc::clone(&pool),
            stop,
            INTERVAL,
        )
        .await
        .unwrap();

        assert_eq!(report.attempts, 0);
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn rejected_draws_are_counted_but_not_inserted() {
        let pool = Arc::new(SharedPool::new(3));
        let report = run_producer::<_, TokioYield>(
            EvenProducer::with_rand(CyclingRand::new([1, 3, 8])),
            Arc::clone(&pool),
            CancellationToken::new(),
            INTERVAL,
        )
        .await
        .unwrap();

        assert_eq!(pool.snapshot(), [8, 8, 8]);
        assert_eq!(report.inserted, 3);
        assert_eq!(report.attempts, 9);
    }

    #[tokio::test]
    async fn prime_sequence_has_no_gaps() {
        let pool = Arc::new(SharedPool::new(50));
        let report = run_producer::<_, TokioYield>(
            PrimeProducer::new(),
            Arc::clone(&pool),
            CancellationToken::new(),
            INTERVAL,
        )
        .await
        .unwrap();

        let expected: Vec<i32> = (2..)
            .filter(|&n| is_prime(n as i64))
            .take(50)
            .map(|n: i32| -n)
            .collect();
        assert_eq!(pool.snapshot(), expected);
        // Candidates 2..=229 were each tested once; 229 is the 50th prime.
        assert_eq!(report.attempts, 228);
    }

    #[tokio::test]
    async fn draw_errors_end_the_producer() {
        let pool = Arc::new(SharedPool::new(10));
        let err = run_producer::<_, TokioYield>(
            PrimeProducer::starting_at(i32::MAX),
            Arc::clone(&pool),
            CancellationToken::new(),
            INTERVAL,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::CandidateOverflow { .. }));
        assert_eq!(pool.snapshot(), [-i32::MAX]);
    }
}
