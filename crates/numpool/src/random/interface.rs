/// A trait for random sources that feed the random-draw producers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// For `i32`, implementations must return a value in `[1, i32::MAX]`, the
/// draw range of the odd and even producers.
///
/// # Example
/// ```
/// use numpool::RandSource;
///
/// struct FixedRand;
/// impl RandSource<i32> for FixedRand {
///     fn rand(&self) -> i32 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}
