/// The `asynchronous` module provides the retry executor for async operations.
/// It owns the retry loop, waits between attempts without blocking a thread and
/// reports failed attempts to an optional observer.
pub mod asynchronous;

/// The `config` module provides the retry policy: how many times an operation is
/// retried and how long the first wait lasts.
pub mod config;

/// The `observer` module defines the sink that gets notified of every failed attempt,
/// along with a ready-made observer that forwards to the `log` facade.
pub mod observer;

/// The `strategies` module defines the backoff schedule used between attempts.
pub mod strategies;

pub use asynchronous::{RetryProxy, retry};
pub use config::RetryPolicy;
pub use observer::{LogObserver, Observation, Observer};
pub use strategies::Backoff;
