pub(crate) use parking_lot::{Mutex, MutexGuard};

#[cfg(feature = "cache-padded")]
pub(crate) type PaddedMutex<T> = crossbeam_utils::CachePadded<Mutex<T>>;
#[cfg(not(feature = "cache-padded"))]
pub(crate) type PaddedMutex<T> = Mutex<T>;

#[inline]
pub(crate) fn padded_mutex<T>(value: T) -> PaddedMutex<T> {
    #[cfg(feature = "cache-padded")]
    {
        crossbeam_utils::CachePadded::new(Mutex::new(value))
    }
    #[cfg(not(feature = "cache-padded"))]
    {
        Mutex::new(value)
    }
}
