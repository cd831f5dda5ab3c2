use crate::Result;
use core::fmt;

/// Identifies which selection rule a producer follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ProducerKind {
    /// Random positive odd values.
    Odd,
    /// Random positive even values.
    Even,
    /// Negated primes in increasing magnitude.
    Prime,
}

impl ProducerKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Odd => "odd",
            Self::Even => "even",
            Self::Prime => "prime",
        }
    }
}

impl fmt::Display for ProducerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The outcome of one producer iteration.
///
/// - [`Draw::Accepted`] carries a value that satisfies the producer's rule and
///   should be inserted.
/// - [`Draw::Rejected`] means the candidate did not qualify. The iteration is
///   spent and the loop moves on; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// A qualifying value, ready to insert.
    Accepted(i32),
    /// The candidate was discarded.
    Rejected,
}

impl Draw {
    /// Returns the accepted value, panicking on [`Draw::Rejected`].
    #[cfg(test)]
    pub(crate) fn unwrap_accepted(self) -> i32 {
        match self {
            Self::Accepted(value) => value,
            Self::Rejected => panic!("draw was rejected"),
        }
    }
}

/// A selection rule for values entering the pool.
///
/// `draw` is called exactly once per loop iteration while the pool lock is
/// held, after the stop signal and capacity have been re-checked. It must not
/// block.
pub trait Producer: Send + 'static {
    /// Which rule this producer implements.
    fn kind(&self) -> ProducerKind;

    /// Draws one candidate and decides whether it qualifies.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer can no longer make progress (e.g. its
    /// candidate counter would overflow). The error ends this producer only.
    fn draw(&mut self) -> Result<Draw>;
}
