//! Utilities shared across database implementations

pub mod retry;

pub use retry::{retry, retry_with_backoff, RetryConfig};
