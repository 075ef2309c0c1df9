//! Retry loop.

use super::classify::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::error::FetchError;

/// Calls `f` until it succeeds or `policy` says stop, sleeping between attempts.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(url = e.url(), attempt, delay_ms = d.as_millis() as u64, "retrying: {e}");
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    fn status(code: u32) -> FetchError {
        FetchError::Remote {
            url: "http://x/1.jpg".into(),
            status: code,
        }
    }

    #[test]
    fn retries_transient_until_success() {
        let mut calls = 0;
        let out = run_with_retry(&fast(3), || {
            calls += 1;
            if calls < 3 {
                Err(status(503))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(out.unwrap(), 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let out: Result<(), _> = run_with_retry(&fast(2), || {
            calls += 1;
            Err(status(500))
        });
        assert!(out.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn does_not_retry_not_found() {
        let mut calls = 0;
        let out: Result<(), _> = run_with_retry(&fast(5), || {
            calls += 1;
            Err(status(404))
        });
        assert!(matches!(out, Err(FetchError::Remote { status: 404, .. })));
        assert_eq!(calls, 1);
    }
}
