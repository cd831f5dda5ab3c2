use super::state::StateCell;
use crate::{
    EngineConfig, EngineState, Error, EvenActivation, PoolCounts, Producer, ProducerFactory,
    ProducerFault, ProducerKind, ProducerReport, Result, RunSummary, SharedPool, SleepProvider,
    StopCause, run_producer,
};
use core::marker::PhantomData;
use futures::future::join_all;
use std::sync::Arc;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval, sleep_until},
};
use tokio_util::sync::CancellationToken;

struct ProducerTask {
    kind: ProducerKind,
    handle: JoinHandle<Result<ProducerReport>>,
}

/// Supervises the producers of a single run.
///
/// Launches the odd and prime producers (and, under
/// [`EvenActivation::Eager`], one even producer), then polls the pool on a
/// fixed interval: it (re)activates the even producer once the threshold is
/// crossed, and ends production when the cap is reached, the deadline
/// elapses, an external stop arrives, or every producer has exited. It then
/// drains every task it ever launched and sorts the pool exactly once.
pub(crate) struct Coordinator<'a, F, S> {
    config: &'a EngineConfig,
    factory: &'a F,
    pool: Arc<SharedPool>,
    stop: CancellationToken,
    tasks: Vec<ProducerTask>,
    latest_even: Option<usize>,
    even_launches: usize,
    _sleep: PhantomData<fn() -> S>,
}

impl<'a, F, S> Coordinator<'a, F, S>
where
    F: ProducerFactory,
    S: SleepProvider + Send + 'static,
{
    pub(crate) fn new(
        config: &'a EngineConfig,
        factory: &'a F,
        pool: Arc<SharedPool>,
        stop: CancellationToken,
    ) -> Self {
        Self {
            config,
            factory,
            pool,
            stop,
            tasks: Vec::with_capacity(4),
            latest_even: None,
            even_launches: 0,
            _sleep: PhantomData,
        }
    }

    /// Runs production to completion and returns the summary.
    ///
    /// `state` must already be [`EngineState::Running`].
    pub(crate) async fn run(mut self, state: &StateCell) -> RunSummary {
        let started = Instant::now();

        #[cfg(feature = "tracing")]
        tracing::info!(
            max_entries = self.pool.max_entries(),
            even_threshold = self.config.even_activation_threshold,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Starting number generation"
        );

        let factory = self.factory;
        self.launch(factory.odd());
        self.launch(factory.prime());
        if self.config.even_activation == EvenActivation::Eager {
            self.launch_even(0);
        }

        // A timeout too large to represent never elapses.
        let cause = self.supervise(started.checked_add(self.config.timeout)).await;
        self.stop.cancel();

        state.set(EngineState::Draining);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Stop signalled ({cause}), draining {} producers",
            self.tasks.len()
        );
        let (reports, faults) = self.drain().await;

        if let Err(_e) = self.pool.sort_ascending() {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to sort pool: {_e}");
        }
        let counts = self.pool.with_values(PoolCounts::from_values);
        let elapsed = started.elapsed();
        state.set(EngineState::Terminal);

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Processing completed. Total: {}, Odd: {}, Even: {}",
            counts.total,
            counts.odd,
            counts.even
        );

        RunSummary {
            cause,
            elapsed,
            counts,
            even_launches: self.even_launches,
            reports,
            faults,
        }
    }

    async fn supervise(&mut self, deadline: Option<Instant>) -> StopCause {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let timeout = async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => core::future::pending::<()>().await,
            }
        };
        tokio::pin!(timeout);
        let stop = self.stop.clone();

        loop {
            tokio::select! {
                biased;
                () = stop.cancelled() => return StopCause::Stopped,
                () = &mut timeout => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Processing stopped due to timeout");
                    return StopCause::TimedOut;
                }
                _ = ticker.tick() => {
                    if let Some(cause) = self.poll() {
                        return cause;
                    }
                }
            }
        }
    }

    /// One polling tick. Returns a cause once production should stop.
    fn poll(&mut self) -> Option<StopCause> {
        let size = self.pool.size();
        if size >= self.pool.max_entries() {
            return Some(StopCause::CapacityReached);
        }

        if size >= self.config.even_activation_threshold && self.even_due() {
            self.launch_even(size);
        }

        if self.tasks.iter().all(|task| task.handle.is_finished()) {
            #[cfg(feature = "tracing")]
            tracing::warn!("All producers exited at {size} entries");
            return Some(StopCause::ProducersExhausted);
        }

        None
    }

    /// An even producer is due if none has launched yet or the latest one has
    /// exited.
    fn even_due(&self) -> bool {
        self.latest_even
            .is_none_or(|index| self.tasks[index].handle.is_finished())
    }

    fn launch_even(&mut self, _size: usize) {
        let producer = self.factory.even();
        self.launch(producer);
        self.latest_even = Some(self.tasks.len() - 1);
        self.even_launches += 1;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Launching even producer #{} at {_size} entries",
            self.even_launches
        );
    }

    fn launch<P: Producer>(&mut self, producer: P) {
        let kind = producer.kind();
        let handle = tokio::spawn(run_producer::<P, S>(
            producer,
            Arc::clone(&self.pool),
            self.stop.clone(),
            self.config.producer_interval,
        ));
        self.tasks.push(ProducerTask { kind, handle });
    }

    /// Waits for every launched producer, converting errors and panics into
    /// faults.
    async fn drain(&mut self) -> (Vec<ProducerReport>, Vec<ProducerFault>) {
        let tasks = core::mem::take(&mut self.tasks);
        self.latest_even = None;

        let results = join_all(
            tasks
                .into_iter()
                .map(|task| async move { (task.kind, task.handle.await) }),
        )
        .await;

        let mut reports = Vec::with_capacity(results.len());
        let mut faults = Vec::new();
        for (kind, result) in results {
            let message = match result {
                Ok(Ok(report)) => {
                    reports.push(report);
                    continue;
                }
                Ok(Err(err)) => err.to_string(),
                Err(join_err) if join_err.is_panic() => {
                    Error::ProducerPanicked { kind }.to_string()
                }
                Err(join_err) => join_err.to_string(),
            };

            #[cfg(feature = "tracing")]
            tracing::error!("Producer fault: {message}");
            faults.push(ProducerFault { kind, message });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Drained {} producers ({} faulted)",
            reports.len() + faults.len(),
            faults.len()
        );

        (reports, faults)
    }
}
