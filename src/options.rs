/// Configures HTTP timeout and retry behavior.
///
/// Defaults are tuned for a cold-start backend: a dormant service can take
/// tens of seconds to boot, so attempts get a long deadline and failures are
/// retried with exponential backoff.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds. The deadline applies to each
    /// attempt independently, never to the logical call as a whole.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry backoff in milliseconds; the delay before attempt `k + 1`
    /// is `retry_backoff_ms * 2^k`.
    pub retry_backoff_ms: u64,
    /// Timeout in milliseconds for the single warm-up attempt.
    pub warm_up_timeout_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 90_000,
            max_retries: 4,
            retry_backoff_ms: 1_500,
            warm_up_timeout_ms: 20_000,
        }
    }
}
