//! Retry and backoff for page downloads.
//!
//! Classifies fetch failures (timeouts, throttling, connection errors, 5xx)
//! and decides exponential backoff. The config fetch does not go through
//! here: a failed config fetch ends the run.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
