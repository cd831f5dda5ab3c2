use crate::NewNumber;
use core::future::Future;

/// A durable destination for a finished pool.
///
/// The engine only calls [`PersistenceSink::persist`] with a sorted snapshot of
/// a terminal pool, and never mutates the pool on the way. A sink that fails
/// must leave its own storage consistent; the engine propagates the error to
/// the caller of [`Engine::save`] unchanged.
///
/// # Example
/// ```
/// use numpool::{NewNumber, PersistenceSink};
///
/// #[derive(Default)]
/// struct CountingSink(usize);
///
/// impl PersistenceSink for CountingSink {
///     type Err = core::convert::Infallible;
///
///     async fn persist(&mut self, records: Vec<NewNumber>) -> Result<(), Self::Err> {
///         self.0 += records.len();
///         Ok(())
///     }
/// }
/// ```
///
/// [`Engine::save`]: crate::Engine::save
pub trait PersistenceSink {
    type Err: core::error::Error + Send + Sync + 'static;

    /// Commits `records` durably, in order.
    fn persist(&mut self, records: Vec<NewNumber>) -> impl Future<Output = Result<(), Self::Err>>;
}
