use log::{Level, log};
use std::fmt;
use std::sync::Arc;

/// A sink that gets notified of every failed attempt.
///
/// `observe` receives the severity bound at construction time and a message of the form
/// `RetryError - Attempts left: {n} - {error}`. It returns nothing, so an observer can
/// never change the outcome of a retry sequence. Implementations should not panic.
///
/// Any `Fn(&str, &str) + Send + Sync` closure is an observer:
/// ```
/// use retry_proxy::observer::Observer;
///
/// let observer = |severity: &str, message: &str| println!("[{severity}] {message}");
/// observer.observe("warn", "RetryError - Attempts left: 2 - timed out");
/// ```
pub trait Observer: Send + Sync {
    fn observe(&self, severity: &str, message: &str);
}

impl<F> Observer for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn observe(&self, severity: &str, message: &str) {
        self(severity, message)
    }
}

/// An installed observer together with the severity it is called with.
///
/// The executor holds an `Option<Observation>`, so an observer without a severity (or the
/// other way around) cannot be expressed.
#[derive(Clone)]
pub struct Observation {
    sink: Arc<dyn Observer>,
    severity: String,
}

impl Observation {
    pub fn new(observer: impl Observer + 'static, severity: impl Into<String>) -> Self {
        Observation {
            sink: Arc::new(observer),
            severity: severity.into(),
        }
    }

    /// Builds an observation only when all three parts are supplied.
    ///
    /// The callback is bound to `target`, which it receives on every call. If any part is
    /// missing the result is `None`.
    pub fn from_parts<X, F, S>(
        target: Option<X>,
        callback: Option<F>,
        severity: Option<S>,
    ) -> Option<Self>
    where
        X: Send + Sync + 'static,
        F: Fn(&X, &str, &str) + Send + Sync + 'static,
        S: Into<String>,
    {
        match (target, callback, severity) {
            (Some(target), Some(callback), Some(severity)) => Some(Observation::new(
                move |level: &str, message: &str| callback(&target, level, message),
                severity,
            )),
            _ => None,
        }
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    /// Reports one failed attempt.
    pub(crate) fn notify(&self, retries_left: usize, error: &dyn fmt::Display) {
        self.sink
            .observe(&self.severity, &failure_message(retries_left, error));
    }
}

impl fmt::Debug for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

pub(crate) fn failure_message(retries_left: usize, error: &dyn fmt::Display) -> String {
    format!("RetryError - Attempts left: {} - {}", retries_left, error)
}

/// An observer that forwards every observation to the `log` facade under a fixed target.
///
/// The severity is parsed as a [`log::Level`] (`"error"`, `"warn"`, `"info"`, `"debug"` or
/// `"trace"`, case-insensitive). Anything else is logged at `Warn`.
///
/// # Example
/// ```
/// use retry_proxy::observer::{LogObserver, Observer};
///
/// let observer = LogObserver::new("billing::client");
/// assert_eq!(observer.target(), "billing::client");
/// observer.observe("info", "RetryError - Attempts left: 0 - connection reset");
/// ```
#[derive(Debug, Clone)]
pub struct LogObserver {
    target: String,
}

impl LogObserver {
    pub fn new(target: impl Into<String>) -> Self {
        LogObserver {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

pub(crate) fn parse_level(severity: &str) -> Level {
    severity.trim().parse().unwrap_or(Level::Warn)
}

impl Observer for LogObserver {
    fn observe(&self, severity: &str, message: &str) {
        log!(target: self.target.as_str(), parse_level(severity), "{}", message);
    }
}
