use core::{pin::Pin, time::Duration};

/// A trait that abstracts over how a producer backs off between iterations.
///
/// Every producer suspends after each loop iteration so it does not monopolize
/// the pool lock. The provider decides whether that suspension is a real timer
/// or a bare scheduler yield.
pub trait SleepProvider {
    /// We require `Send` so that the future can be safely moved across threads
    type Sleep: Future<Output = ()> + Send;

    fn sleep_for(dur: Duration) -> Self::Sleep;
}

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider and matches the fixed back-off interval in
/// [`EngineConfig::producer_interval`].
///
/// [`EngineConfig::producer_interval`]: crate::EngineConfig::producer_interval
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    type Sleep = tokio::time::Sleep;

    fn sleep_for(dur: Duration) -> Self::Sleep {
        tokio::time::sleep(dur)
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// This strategy ignores the configured interval and yields to the scheduler
/// immediately. Producers fill the pool far faster, at the cost of much
/// tighter contention on the pool lock and higher CPU usage.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    /// Tokio's `yield_now()` returns a private future type, so we must use a
    /// boxed `dyn Future` to abstract over it.
    type Sleep = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn sleep_for(_dur: Duration) -> Self::Sleep {
        Box::pin(tokio::task::yield_now())
    }
}
