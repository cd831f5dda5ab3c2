use super::{state::StateCell, supervisor::Coordinator};
use crate::{
    DefaultProducers, EngineConfig, EngineState, Error, NewNumber, PersistenceSink,
    ProducerFactory, Query, Result, RunSummary, SharedPool, SleepProvider, TokioSleep,
};
use core::marker::PhantomData;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// The pool and stop signal of the current (or most recent) run.
struct RunHandle {
    pool: Arc<SharedPool>,
    stop: CancellationToken,
}

impl RunHandle {
    fn fresh(max_entries: usize) -> Self {
        Self {
            pool: Arc::new(SharedPool::new(max_entries)),
            stop: CancellationToken::new(),
        }
    }
}

/// Resets the engine if a run's future is dropped before it completes.
struct ActiveRun<'a> {
    state: &'a StateCell,
    stop: CancellationToken,
    completed: bool,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.stop.cancel();
            self.state.set(EngineState::Idle);
        }
    }
}

/// The number pool engine.
///
/// Owns the configuration and the current run. Each call to
/// [`Engine::start`] builds a fresh [`SharedPool`] and stop signal, launches
/// the producers, and resolves once the pool is sorted and immutable. The
/// presentation layer reads the pool through [`Engine::query`] at any time and
/// can end a run early with [`Engine::stop`].
///
/// `F` chooses the producers (see [`ProducerFactory`]) and `S` how they back
/// off between iterations (see [`SleepProvider`]).
///
/// # Example
/// ```
/// use core::time::Duration;
/// use numpool::{Engine, EngineConfig, MemorySink, StopCause};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> numpool::Result<()> {
/// let config = EngineConfig::default()
///     .with_max_entries(50)
///     .with_producer_interval(Duration::from_millis(1))
///     .with_poll_interval(Duration::from_millis(1));
/// let engine = Engine::new(config)?;
///
/// let summary = engine.start().await?;
/// assert_eq!(summary.cause, StopCause::CapacityReached);
/// assert_eq!(engine.query().total_count(), 50);
///
/// let mut sink = MemorySink::new();
/// assert_eq!(engine.save(&mut sink).await?, 50);
/// # Ok(())
/// # }
/// ```
pub struct Engine<F = DefaultProducers, S = TokioSleep> {
    config: EngineConfig,
    factory: F,
    state: StateCell,
    run: Mutex<RunHandle>,
    _sleep: PhantomData<fn() -> S>,
}

impl Engine {
    /// Creates an engine with the default producers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_producers(config, DefaultProducers)
    }
}

impl<F> Engine<F>
where
    F: ProducerFactory,
{
    /// Creates an engine whose runs use `factory` to build producers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` fails validation.
    pub fn with_producers(config: EngineConfig, factory: F) -> Result<Self> {
        Self::with_sleep(config, factory)
    }
}

impl<F, S> Engine<F, S>
where
    F: ProducerFactory,
    S: SleepProvider + Send + 'static,
{
    /// Creates an engine whose producers back off through `S` instead of
    /// [`TokioSleep`].
    ///
    /// # Example
    /// ```
    /// use numpool::{DefaultProducers, Engine, EngineConfig, TokioYield};
    ///
    /// let engine = Engine::<_, TokioYield>::with_sleep(EngineConfig::default(), DefaultProducers);
    /// assert!(engine.is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` fails validation.
    pub fn with_sleep(config: EngineConfig, factory: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            run: Mutex::new(RunHandle::fresh(config.max_entries)),
            config,
            factory,
            state: StateCell::new(),
            _sleep: PhantomData,
        })
    }

    /// Runs one production session to completion.
    ///
    /// Resolves once the pool is [`EngineState::Terminal`]. A timeout is not
    /// an error: it is reported as [`StopCause::TimedOut`]. Producer faults are
    /// contained and listed in [`RunSummary::faults`].
    ///
    /// Must be called from within a Tokio runtime. Dropping the returned
    /// future cancels the run's producers and returns the engine to
    /// [`EngineState::Idle`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRunning`] if another run is still in progress.
    ///
    /// [`StopCause::TimedOut`]: crate::StopCause::TimedOut
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub async fn start(&self) -> Result<RunSummary> {
        let (pool, stop) = {
            // `stop` takes the same lock, so it never cancels a stale signal
            // while a new run is being set up.
            let mut run = self.run.lock();
            if !self.state.try_begin() {
                return Err(Error::AlreadyRunning);
            }
            *run = RunHandle::fresh(self.config.max_entries);
            (Arc::clone(&run.pool), run.stop.clone())
        };

        let mut active = ActiveRun {
            state: &self.state,
            stop: stop.clone(),
            completed: false,
        };

        let summary = Coordinator::<F, S>::new(&self.config, &self.factory, pool, stop)
            .run(&self.state)
            .await;
        active.completed = true;

        Ok(summary)
    }

    /// Signals the current run to stop.
    ///
    /// Producers observe the signal within one iteration. Does nothing if no
    /// run is active.
    pub fn stop(&self) {
        let run = self.run.lock();
        if self.state.get() == EngineState::Running {
            #[cfg(feature = "tracing")]
            tracing::info!("Stop requested");
            run.stop.cancel();
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state.get()
    }

    /// Query facade over the current run's pool.
    ///
    /// Before the first run this is an empty pool, so every count is zero.
    pub fn query(&self) -> Query {
        Query::new(Arc::clone(&self.run.lock().pool))
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hands the finished pool to `sink` and returns how many records were
    /// saved.
    ///
    /// An empty pool is not sent to the sink at all.
    ///
    /// # Errors
    ///
    /// - Returns [`Error::NotTerminal`] unless the latest run is terminal.
    /// - Returns [`Error::Sink`] if the sink fails. The pool is unaffected.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub async fn save<K>(&self, sink: &mut K) -> Result<usize>
    where
        K: PersistenceSink,
    {
        if self.state.get() != EngineState::Terminal {
            return Err(Error::NotTerminal);
        }

        let records: Vec<NewNumber> = self
            .query()
            .all_values()
            .into_iter()
            .map(NewNumber::from_value)
            .collect();

        if records.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!("The pool is empty. Nothing to save.");
            return Ok(0);
        }

        let saved = records.len();
        #[cfg(feature = "tracing")]
        tracing::info!("Saving {saved} numbers");

        sink.persist(records).await.map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to save numbers: {err}");
            Error::Sink(Box::new(err))
        })?;

        #[cfg(feature = "tracing")]
        tracing::info!("Data saved successfully");
        Ok(saved)
    }
}
