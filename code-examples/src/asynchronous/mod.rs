use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use rand::{Rng, rng};
use tokio::time::sleep;

use retry_proxy::asynchronous::{RetryProxy, retry};
use retry_proxy::config::RetryPolicy;

#[derive(Debug)]
pub struct ServiceError(String);

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ServiceError {}

// Fails about half of the time.
async fn unreliable_lookup(user_id: u32) -> Result<String, ServiceError> {
    sleep(Duration::from_millis(20)).await;
    let failed = rng().random_bool(0.5);
    if failed {
        return Err(ServiceError(format!("lookup of user {user_id} timed out")));
    }
    Ok(format!("user-{user_id}"))
}

// Example 1: Simple retry without an observer
pub async fn example_simple_retry() {
    let policy = RetryPolicy::default();

    let result = retry(|| unreliable_lookup(1), &policy).await;

    match result {
        Ok(user) => println!("Success: {}", user),
        Err(error) => println!("Failed: {}", error),
    }
}

// Example 2: Closure observer with arguments handed to every attempt
pub async fn example_observed_retry() {
    let proxy = RetryProxy::with_observer(
        |severity: &str, message: &str| println!("  [{}] {}", severity, message),
        "warn",
    );
    let policy = RetryPolicy::new(4, Duration::from_millis(100));

    let result = proxy.call_with(unreliable_lookup, 42, &policy).await;

    match result {
        Ok(user) => println!("Success: {}", user),
        Err(error) => println!("Failed: {}", error),
    }
}

// A collaborator that owns its own reporting method.
struct FailureCounter {
    name: &'static str,
    failures: AtomicUsize,
}

impl FailureCounter {
    fn record(&self, severity: &str, message: &str) {
        let n = self.failures.fetch_add(1, Ordering::SeqCst) + 1;
        println!("  {} #{} ({}): {}", self.name, n, severity, message);
    }
}

// Example 3: Observer assembled from a target, a method and a severity
pub async fn example_bound_observer() {
    let counter = Arc::new(FailureCounter {
        name: "inventory",
        failures: AtomicUsize::new(0),
    });

    let proxy = RetryProxy::from_parts(
        Some(counter.clone()),
        Some(|counter: &Arc<FailureCounter>, severity: &str, message: &str| {
            counter.record(severity, message)
        }),
        Some("error"),
    );
    let policy = RetryPolicy::new(2, Duration::from_millis(50));

    let result = proxy.call(|| unreliable_lookup(7), &policy).await;
    println!(
        "Result: {:?}, failures reported: {}",
        result.map_err(|e| e.to_string()),
        counter.failures.load(Ordering::SeqCst)
    );
}

// Example 4: Independent sequences running side by side
pub async fn example_concurrent_sequences() {
    let proxy = RetryProxy::with_observer(
        |_: &str, message: &str| println!("  {}", message),
        "info",
    );
    let policy = RetryPolicy::new(3, Duration::from_millis(100));

    let lookups = (1..=4).map(|user_id| proxy.call_with(unreliable_lookup, user_id, &policy));
    for (user_id, result) in (1..=4).zip(join_all(lookups).await) {
        match result {
            Ok(user) => println!("User {} resolved to {}", user_id, user),
            Err(error) => println!("User {} failed: {}", user_id, error),
        }
    }
}
