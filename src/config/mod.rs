use crate::strategies::Backoff;
use std::time::Duration;

/// Configuration for retrying operations.
///
/// A policy is borrowed for the whole retry sequence, so its values stay fixed from the
/// first attempt to the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// The number of retries after the initial attempt.
    ///
    /// If `max_retries` is set to 3, the operation is attempted up to 4 times
    /// (1 initial attempt + 3 retries). With 0 the operation runs exactly once.
    pub max_retries: usize,

    /// The wait before the first retry.
    ///
    /// Every following wait is 1.5 times the previous one.
    pub initial_interval: Duration,
}

impl Default for RetryPolicy {
    /// Provides the default policy:
    /// - `max_retries`: 3
    /// - `initial_interval`: 500 milliseconds
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            initial_interval: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Creates a new `RetryPolicy` with the specified retry budget and initial interval.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use retry_proxy::config::RetryPolicy;
    /// let policy = RetryPolicy::new(2, Duration::from_millis(100));
    /// assert_eq!(policy.max_attempts(), 3);
    /// ```
    pub fn new(max_retries: usize, initial_interval: Duration) -> Self {
        RetryPolicy {
            max_retries,
            initial_interval,
        }
    }

    /// Builder-style setter for `max_retries`.
    ///
    /// # Examples
    /// ```
    /// use retry_proxy::config::RetryPolicy;
    /// let policy = RetryPolicy::default().with_max_retries(0);
    /// assert_eq!(policy.max_retries, 0);
    /// ```
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builder-style setter for `initial_interval`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use retry_proxy::config::RetryPolicy;
    /// let policy = RetryPolicy::default().with_initial_interval(Duration::from_millis(50));
    /// assert_eq!(policy.initial_interval, Duration::from_millis(50));
    /// ```
    pub fn with_initial_interval(mut self, initial_interval: Duration) -> Self {
        self.initial_interval = initial_interval;
        self
    }

    /// Total number of attempts a failing operation gets, the initial one included.
    pub fn max_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    /// Returns the waits this policy inserts between attempts, starting with
    /// `initial_interval`.
    ///
    /// The iterator is unbounded; the executor takes at most `max_retries` items from it.
    pub fn schedule(&self) -> Backoff {
        Backoff::new(self.initial_interval)
    }
}
