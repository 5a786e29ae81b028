use crate::asynchronous::{
    example_bound_observer, example_concurrent_sequences, example_observed_retry,
    example_simple_retry,
};

mod asynchronous;

#[tokio::main]
async fn main() {
    println!("Running simple retry example:");
    example_simple_retry().await;

    println!("\nRunning observed retry example:");
    example_observed_retry().await;

    println!("\nRunning bound observer example:");
    example_bound_observer().await;

    println!("\nRunning concurrent sequences example:");
    example_concurrent_sequences().await;
}
