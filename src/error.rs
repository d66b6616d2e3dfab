use std::time::Duration;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum LcaError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The attempt's deadline elapsed before a response arrived.
    #[error("attempt timed out after {timeout:?}")]
    AttemptTimeout {
        /// Per-attempt timeout that was exceeded.
        timeout: Duration,
    },
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Status { status: u16, body: String },
    /// All attempts of one logical call failed.
    #[error("retry budget exhausted after {attempts} attempts: {cause}")]
    RetryBudgetExhausted {
        /// Total number of attempts made, including the first.
        attempts: usize,
        /// Failure of the final attempt.
        #[source]
        cause: Box<LcaError>,
    },
    /// Wire JSON did not match the expected shape: a success response could
    /// not be parsed, or a request body could not be encoded.
    ///
    /// Not retried: a shape mismatch indicates a contract or version
    /// mismatch with the service, not a transient fault.
    #[error("decode error: {0}")]
    Decode(String),
}

impl LcaError {
    /// Whether another attempt of the same logical call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LcaError::Transport(_) | LcaError::AttemptTimeout { .. } | LcaError::Status { .. }
        )
    }
}
