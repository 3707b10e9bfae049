//! Retry policy for scheduled tasks

use std::time::Duration;

/// How often, and how long apart, a failed task is tried again.
///
/// `retries` counts re-runs after the first attempt, so a task runs at most
/// `retries + 1` times per scheduled run.
///
/// # Example
///
/// ```
/// use userform_worker::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::fixed(1, Duration::from_secs(300));
/// assert_eq!(policy.max_attempts(), 2);
/// assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failure
    pub retries: u32,

    /// Delay before each retry
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryPolicy {
    /// Run once, never retry
    pub fn no_retry() -> Self {
        Self::fixed(0, Duration::ZERO)
    }

    /// Retry `retries` times, waiting `delay` before each retry
    pub fn fixed(retries: u32, delay: Duration) -> Self {
        Self {
            retries,
            retry_delay: delay,
        }
    }

    /// Total attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Delay to wait before the given attempt (1-based). The first attempt
    /// never waits.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.retry_delay
        }
    }

    /// Whether another attempt is allowed after `current_attempt` failed
    pub fn has_attempts_remaining(&self, current_attempt: u32) -> bool {
        current_attempt < self.max_attempts()
    }
}
