/// Returns `true` if `n` is prime, using trial division.
///
/// Values below 2 are never prime. Otherwise `n` is prime when no `i` in
/// `[2, floor(sqrt(n))]` divides it, which makes 2 and 3 prime without
/// entering the loop at all.
///
/// # Example
/// ```
/// use numpool::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(7919));
/// assert!(!is_prime(1));
/// assert!(!is_prime(-7));
/// ```
pub const fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    // `i <= n / i` is `i * i <= n` without the overflow.
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns `true` if the magnitude of a pool value is prime.
///
/// Catches both the negated primes inserted by the prime producer and any
/// positive values that happen to be prime.
#[inline]
pub const fn is_prime_magnitude(value: i32) -> bool {
    is_prime(value.unsigned_abs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_values_below_two() {
        for n in [i64::MIN, -3, -2, -1, 0, 1] {
            assert!(!is_prime(n), "{n} must not be prime");
        }
    }

    #[test]
    fn accepts_boundary_primes() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(5));
    }

    #[test]
    fn matches_first_primes() {
        let primes: Vec<i64> = (0..60).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59]
        );
    }

    #[test]
    fn rejects_squares_of_primes() {
        for p in [2_i64, 3, 5, 7, 11, 46_337] {
            assert!(!is_prime(p * p), "{} is composite", p * p);
        }
    }

    #[test]
    fn handles_large_inputs() {
        assert!(is_prime(i32::MAX as i64));
        assert!(!is_prime(i32::MAX as i64 - 1));
        assert!(is_prime(2_147_483_629));
    }

    #[test]
    fn magnitude_ignores_sign() {
        assert!(is_prime_magnitude(-2));
        assert!(is_prime_magnitude(-7919));
        assert!(is_prime_magnitude(13));
        assert!(!is_prime_magnitude(-1));
        assert!(!is_prime_magnitude(-9));
        assert!(!is_prime_magnitude(i32::MIN));
    }
}
