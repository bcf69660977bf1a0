use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;

/// Upper bound on the random jitter, as a fraction of the base delay.
pub const MAX_JITTER_FRACTION: f64 = 0.1;

/// Retry configuration for one logical request.
///
/// A policy is immutable and carries no per-call state; the wrapper in
/// [`crate::ApiClient`] tracks the attempt counter itself. The total number
/// of attempts is always `max_retries + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base multiplier for the exponential backoff, in seconds.
    pub backoff_factor: f64,
    /// Ceiling on the computed backoff, in seconds (before jitter).
    pub max_backoff: f64,
    /// Status codes that signal a transient condition worth retrying.
    pub retryable_statuses: Vec<u16>,
}

impl RetryPolicy {
    /// Default policy: 429 and transient 5xx, tuned for single requests.
    pub fn standard() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 2.0,
            max_backoff: 30.0,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Lenient policy for bulk operations, which hit rate limits more often.
    pub fn bulk() -> Self {
        Self {
            max_retries: 8,
            backoff_factor: 3.0,
            max_backoff: 60.0,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Whether a response with this status should be retried.
    pub fn retries(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status.as_u16())
    }

    /// Capped exponential delay before the retry following attempt
    /// `attempt` (0-indexed), without jitter.
    pub fn base_delay(&self, attempt: u32) -> f64 {
        let exp = attempt.min(16) as i32;
        (self.backoff_factor * f64::powi(2.0, exp)).min(self.max_backoff)
    }

    /// Delay before the next retry: capped exponential backoff plus up to
    /// 10% uniform jitter to desynchronize concurrent retrying clients.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        let jitter = base * MAX_JITTER_FRACTION * rand::thread_rng().gen::<f64>();
        Duration::from_secs_f64(base + jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
