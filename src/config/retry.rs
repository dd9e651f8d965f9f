//! Retry policy for transient request failures.

use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Exponential backoff policy.
///
/// A request is attempted up to `1 + max_retries` times. Attempt `k`
/// (1-based, `k >= 2`) waits `base_delay * 2^(k-2)` before it is sent, so
/// the first retry waits `base_delay`, the second `2 * base_delay`, and so on.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use trendyol_api::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(500));
/// assert_eq!(policy.max_attempts(), 4);
/// assert_eq!(policy.delay_before(1), None);
/// assert_eq!(policy.delay_before(3), Some(Duration::from_secs(1)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy.
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn no_retries() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Returns the number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the base backoff delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the total number of attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Returns the sleep before the given 1-based attempt, or `None` for the
    /// first attempt.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt <= 1 {
            return None;
        }
        let factor = 1u32.checked_shl(attempt - 2).unwrap_or(u32::MAX);
        Some(self.base_delay.saturating_mul(factor))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.base_delay(), Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_first_attempt_has_no_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(0), None);
        assert_eq!(policy.delay_before(1), None);
    }

    #[test]
    fn test_delay_doubles_per_attempt() {
        let base = Duration::from_millis(250);
        let policy = RetryPolicy::new(5, base);

        for attempt in 2..=6u32 {
            let expected = base * 2u32.pow(attempt - 2);
            assert_eq!(policy.delay_before(attempt), Some(expected), "attempt {attempt}");
        }
    }

    #[test]
    fn test_delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert!(policy.delay_before(200).is_some());
        assert_eq!(policy.max_attempts(), u32::MAX);
    }

    #[test]
    fn test_no_retries_policy() {
        let policy = RetryPolicy::no_retries();
        assert_eq!(policy.max_attempts(), 1);
    }
}
