use std::time::Duration;

use crate::RetryPolicy;

/// Configures the per-attempt timeout and the retry policies a client uses.
///
/// The policies are selected per call: `bulk_mode` requests use
/// [`ClientOptions::bulk_retry`], everything else uses
/// [`ClientOptions::standard_retry`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt socket timeout. There is no timeout across the whole
    /// retry sequence.
    pub timeout: Duration,
    /// Policy applied to ordinary requests.
    pub standard_retry: RetryPolicy,
    /// Policy applied when `bulk_mode` is requested.
    pub bulk_retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            standard_retry: RetryPolicy::standard(),
            bulk_retry: RetryPolicy::bulk(),
        }
    }
}
