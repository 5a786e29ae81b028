use std::time::Duration;

/// The wait schedule between retry attempts.
///
/// Each delay is 1.5 times the previous one, starting from a base interval. There is no
/// jitter and no upper cap, so with a base of 500ms the waits are 500ms, 750ms, 1125ms,
/// 1687.5ms and so on.
///
/// The growth is computed on whole nanoseconds (`delay + delay / 2`) and saturates at
/// `Duration::MAX` rather than overflowing.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retry_proxy::strategies::Backoff;
///
/// let mut backoff = Backoff::new(Duration::from_millis(100));
/// assert_eq!(backoff.next(), Some(Duration::from_millis(100)));
/// assert_eq!(backoff.next(), Some(Duration::from_millis(150)));
/// assert_eq!(backoff.next(), Some(Duration::from_millis(225)));
/// ```
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
}

impl Backoff {
    pub fn new(initial_interval: Duration) -> Self {
        Backoff {
            current: initial_interval,
        }
    }

    /// The delay the next call to `next` will yield.
    pub fn peek(&self) -> Duration {
        self.current
    }

    /// Calculates the delay that follows `delay` in the schedule.
    pub(crate) fn grow(delay: Duration) -> Duration {
        delay.saturating_add(delay / 2)
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.current;
        self.current = Self::grow(delay);
        Some(delay)
    }
}
