use crate::config::RetryPolicy;
use crate::observer::{LogObserver, Observation, Observer};
use crate::strategies::Backoff;
use log::{info, warn};
use std::fmt::Display;
use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::sleep;

/// Retries an asynchronous operation with multiplicative backoff and optionally reports
/// every failed attempt to an [`Observer`].
///
/// A `RetryProxy` holds no per-call state: each call runs its own retry sequence, so one
/// proxy can be cloned or shared between tasks freely.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use retry_proxy::asynchronous::RetryProxy;
/// use retry_proxy::config::RetryPolicy;
///
/// async fn fetch_quote(symbol: &str) -> Result<f64, String> {
///     Err(format!("quote service unavailable for {symbol}"))
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let proxy = RetryProxy::with_observer(
///         |severity: &str, message: &str| eprintln!("[{severity}] {message}"),
///         "warn",
///     );
///     let policy = RetryPolicy::new(1, Duration::from_millis(10));
///
///     let result = proxy.call_with(|symbol| fetch_quote(symbol), "ACME", &policy).await;
///     assert_eq!(result, Err("quote service unavailable for ACME".to_string()));
/// }
/// ```
///
/// # Notes
/// - The error of the last attempt is returned as is. A sequence that ran out of retries
///   and a single failed attempt with `max_retries = 0` look the same to the caller.
/// - Dropping the returned future cancels the sequence at its current await point. No
///   further attempt is made and nothing is observed for the cancellation.
#[derive(Debug, Clone, Default)]
pub struct RetryProxy {
    observation: Option<Observation>,
}

impl RetryProxy {
    /// Creates a proxy that reports nothing.
    pub fn new() -> Self {
        RetryProxy { observation: None }
    }

    /// Creates a proxy that calls `observer` with `severity` on every failed attempt.
    pub fn with_observer(observer: impl Observer + 'static, severity: impl Into<String>) -> Self {
        RetryProxy {
            observation: Some(Observation::new(observer, severity)),
        }
    }

    /// Creates a proxy from separately supplied observer parts.
    ///
    /// `callback` is bound to `target` and called as `callback(&target, severity, message)`.
    /// Observation is installed only when all three parts are `Some`; otherwise the proxy
    /// silently reports nothing.
    ///
    /// # Example
    /// ```
    /// use retry_proxy::asynchronous::RetryProxy;
    ///
    /// struct AuditLog;
    /// impl AuditLog {
    ///     fn write(&self, severity: &str, message: &str) {
    ///         println!("{severity}: {message}");
    ///     }
    /// }
    ///
    /// let observed = RetryProxy::from_parts(Some(AuditLog), Some(AuditLog::write), Some("warn"));
    /// assert!(observed.is_observed());
    ///
    /// let silent = RetryProxy::from_parts(Some(AuditLog), Some(AuditLog::write), None::<String>);
    /// assert!(!silent.is_observed());
    /// ```
    pub fn from_parts<X, F, S>(target: Option<X>, callback: Option<F>, severity: Option<S>) -> Self
    where
        X: Send + Sync + 'static,
        F: Fn(&X, &str, &str) + Send + Sync + 'static,
        S: Into<String>,
    {
        RetryProxy {
            observation: Observation::from_parts(target, callback, severity),
        }
    }

    /// Creates a proxy that sends every failed attempt to the `log` facade under `target`.
    pub fn with_log_target(target: impl Into<String>, level: log::Level) -> Self {
        Self::with_observer(LogObserver::new(target), level.as_str())
    }

    /// Whether failed attempts are reported to an observer.
    pub fn is_observed(&self) -> bool {
        self.observation.is_some()
    }

    /// Runs `operation` until it succeeds or `policy.max_retries` retries are used up.
    ///
    /// The operation is attempted at most `max_retries + 1` times. Between attempts the
    /// proxy waits `initial_interval`, then 1.5 times longer after every further failure.
    pub async fn call<F, Fut, T, E>(&self, operation: F, policy: &RetryPolicy) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        run(operation, policy, |retries_left, err: &E| {
            if let Some(observation) = &self.observation {
                observation.notify(retries_left, err);
            }
        })
        .await
    }

    /// Like [`RetryProxy::call`], handing a clone of `args` to every attempt.
    ///
    /// Pass `()` when the operation takes no input.
    pub async fn call_with<A, F, Fut, T, E>(
        &self,
        mut operation: F,
        args: A,
        policy: &RetryPolicy,
    ) -> Result<T, E>
    where
        A: Clone,
        F: FnMut(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.call(|| operation(args.clone()), policy).await
    }
}

/// Retries a given asynchronous operation based on the specified retry policy, without
/// reporting failures to an observer.
///
/// # Arguments
/// * `operation` - A closure that returns a `Future` resolving to a `Result<T, E>`.
/// * `policy` - A reference to `RetryPolicy` specifying the retry budget and initial interval.
///
/// # Returns
/// * `Ok(T)` if the operation succeeds within the allowed attempts.
/// * `Err(E)` with the last attempt's error once the retries are used up.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use retry_proxy::asynchronous::retry;
/// use retry_proxy::config::RetryPolicy;
///
/// async fn my_operation() -> Result<(), &'static str> {
///     Err("Some error")
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let policy = RetryPolicy::new(2, Duration::from_millis(10));
///     let result = retry(my_operation, &policy).await;
///     assert_eq!(result, Err("Some error"));
/// }
/// ```
pub async fn retry<F, Fut, T, E>(operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    run(operation, policy, |_, _| {}).await
}

async fn run<F, Fut, T, E, H>(
    mut operation: F,
    policy: &RetryPolicy,
    mut on_failure: H,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    H: FnMut(usize, &E),
{
    let mut attempts = 0;
    let mut retries_left = policy.max_retries;
    let mut delay = policy.initial_interval;

    loop {
        attempts += 1;

        match operation().await {
            Ok(output) => {
                info!("Operation succeeded after {} attempts", attempts);
                return Ok(output);
            }
            Err(err) => {
                on_failure(retries_left, &err);

                if retries_left == 0 {
                    warn!("Operation failed after {} attempts, giving up.", attempts);
                    return Err(err);
                }

                warn!(
                    "Operation failed (attempt {}/{}), retrying after {:?}...",
                    attempts,
                    policy.max_attempts(),
                    delay
                );
            }
        }

        wait(delay).await;
        retries_left -= 1;
        delay = Backoff::grow(delay);
    }
}

/// Suspends the current task for `delay`. A zero delay still yields to the scheduler once.
async fn wait(delay: Duration) {
    if delay.is_zero() {
        yield_now().await;
    } else {
        sleep(delay).await;
    }
}
