use std::time::Duration;

/// Coarse failure category used for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or transfer deadline hit.
    Timeout,
    /// Server asked us to slow down (429, 503).
    Throttled,
    /// DNS, refused, reset, or empty reply.
    Connection,
    /// Other 5xx.
    Http5xx(u16),
    /// Everything else (4xx, TLS, malformed URL). Never retried.
    Other,
}

impl ErrorKind {
    pub fn is_transient(self) -> bool {
        !matches!(self, ErrorKind::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Capped exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per request, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no backoff.
    pub fn never() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// `attempt` is 1-based. Delay is `base * 2^(attempt-1)`, capped at `max_delay`.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts || !kind.is_transient() {
            return RetryDecision::NoRetry;
        }
        let factor = 1u32 << attempt.saturating_sub(1).min(8);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}
