use std::time::Duration;

use reqwest::{header, Method};
use tokio::time::sleep;

use crate::{CalcRequest, CalcResult, ClientOptions, EpdSummary, LcaError, Result};

/// Base URL used by [`LcaClient::from_env`] when `LCA_API_BASE` is unset,
/// matching a local development deployment of the service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Joins the base URL with an endpoint path.
///
/// Example: `("https://lca.example.com/", "/calculate")` →
/// `"https://lca.example.com/calculate"`
fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Immutable description of one logical call.
///
/// The body, when present, is serialized exactly once; every retry of the
/// same logical call sends the identical bytes.
struct RequestDescriptor {
    method: Method,
    url: String,
    body: Option<String>,
}

/// Retry parameters captured at the start of one logical call.
struct RetryPlan {
    max_retries: usize,
    timeout: Duration,
    base_backoff_ms: u64,
}

impl RetryPlan {
    fn from_options(options: &ClientOptions) -> Self {
        Self {
            max_retries: options.max_retries,
            timeout: Duration::from_millis(options.timeout_ms),
            base_backoff_ms: options.retry_backoff_ms,
        }
    }

    /// Warm-up plan: a single attempt with the generous warm-up timeout.
    fn warm_up(options: &ClientOptions) -> Self {
        Self {
            max_retries: 0,
            timeout: Duration::from_millis(options.warm_up_timeout_ms),
            base_backoff_ms: options.retry_backoff_ms,
        }
    }
}

/// HTTP client for the LCA A1–A3 calculation API.
///
/// The service is expected to run on a cold-start host: it may be dormant,
/// slow to answer, or transiently failing. Every call therefore runs through
/// a retrying transport with independent per-attempt timeouts, and
/// [`LcaClient::warm_up`] can be fired at startup to get the backend booting
/// before the user asks for a calculation.
#[derive(Clone, Debug)]
pub struct LcaClient {
    http: reqwest::Client,
    base_url: String,
    options: ClientOptions,
}

impl LcaClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// `base_url` is taken as-is apart from trailing-slash trimming; no
    /// discovery is performed.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from the `LCA_API_BASE` environment variable.
    ///
    /// Falls back to [`DEFAULT_BASE_URL`] when the variable is unset or
    /// empty, mirroring the service's local development default.
    pub fn from_env() -> Self {
        let base = std::env::var("LCA_API_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self::new(base)
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Probes the service root to trigger a cold-start boot.
    ///
    /// Best effort: a single attempt with a generous timeout, and every
    /// possible failure (timeout, refused connection, error status) is
    /// swallowed. Callers can fire this at startup without awaiting or
    /// inspecting the outcome.
    pub async fn warm_up(&self) {
        let descriptor = RequestDescriptor {
            method: Method::GET,
            url: endpoint_url(&self.base_url, "/"),
            body: None,
        };
        let plan = RetryPlan::warm_up(&self.options);

        match self.send_with_retry(&descriptor, &plan).await {
            Ok(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("warm-up probe reached the service");
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("warm-up probe failed: {_err}");
            }
        }
    }

    /// Submits material lines for calculation and returns the A1–A3 totals.
    ///
    /// The request body is encoded once before the first attempt; transient
    /// failures (transport errors, per-attempt timeouts, non-success
    /// statuses) are retried with exponential backoff up to the configured
    /// budget. The caller observes either the parsed result or a single
    /// terminal [`LcaError`] — never a partial response.
    pub async fn calculate(&self, request: &CalcRequest) -> Result<CalcResult> {
        let payload = serde_json::to_string(request)
            .map_err(|err| LcaError::Decode(format!("request body could not be encoded: {err}")))?;
        let descriptor = RequestDescriptor {
            method: Method::POST,
            url: endpoint_url(&self.base_url, "/calculate"),
            body: Some(payload),
        };
        let plan = RetryPlan::from_options(&self.options);

        let body = self.send_with_retry(&descriptor, &plan).await?;
        serde_json::from_str::<CalcResult>(&body).map_err(|err| {
            LcaError::Decode(format!("invalid calculation response JSON: {err}; body: {body}"))
        })
    }

    /// Fetches the service's EPD catalogue.
    pub async fn list_epds(&self) -> Result<Vec<EpdSummary>> {
        let descriptor = RequestDescriptor {
            method: Method::GET,
            url: endpoint_url(&self.base_url, "/epd"),
            body: None,
        };
        let plan = RetryPlan::from_options(&self.options);

        let body = self.send_with_retry(&descriptor, &plan).await?;
        serde_json::from_str::<Vec<EpdSummary>>(&body).map_err(|err| {
            LcaError::Decode(format!("invalid EPD catalogue JSON: {err}; body: {body}"))
        })
    }

    /// Runs one logical call: sequential attempts with backoff in between.
    ///
    /// Attempts are strictly sequential; no two sends of the same logical
    /// call are ever in flight at once, and no retry state outlives the
    /// call. The terminal failure wraps the cause of the *last* attempt,
    /// which carries the most relevant diagnostics.
    async fn send_with_retry(
        &self,
        descriptor: &RequestDescriptor,
        plan: &RetryPlan,
    ) -> Result<String> {
        let mut failed = 0usize;
        loop {
            match self.send_once(descriptor, plan.timeout).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() && failed < plan.max_retries => {
                    Self::wait_before_retry(plan.base_backoff_ms, failed).await;
                    failed += 1;
                }
                Err(err) => {
                    return Err(LcaError::RetryBudgetExhausted {
                        attempts: failed + 1,
                        cause: Box::new(err),
                    });
                }
            }
        }
    }

    /// Performs a single attempt, bounded by its own timeout.
    async fn send_once(&self, descriptor: &RequestDescriptor, timeout: Duration) -> Result<String> {
        let mut request = self
            .http
            .request(descriptor.method.clone(), &descriptor.url)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(timeout);
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return Err(LcaError::AttemptTimeout { timeout }),
            Err(err) => return Err(LcaError::Transport(err)),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) if err.is_timeout() => return Err(LcaError::AttemptTimeout { timeout }),
            Err(err) => return Err(LcaError::Transport(err)),
        };

        if !status.is_success() {
            return Err(LcaError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Waits out the exponential backoff after the `failed`-th failure
    /// (0-based): `base * 2^failed` milliseconds.
    async fn wait_before_retry(base_backoff_ms: u64, failed: usize) {
        let exp = failed.min(16) as u32;
        let multiplier = 1u64 << exp;
        let delay_ms = base_backoff_ms.saturating_mul(multiplier);

        #[cfg(feature = "tracing")]
        tracing::debug!("retrying request after {} ms", delay_ms);

        sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::{endpoint_url, RetryPlan};
    use crate::ClientOptions;
    use std::time::Duration;

    #[test]
    fn endpoint_url_trims_trailing_slash() {
        assert_eq!(
            endpoint_url("https://lca.example.com/", "/calculate"),
            "https://lca.example.com/calculate"
        );
        assert_eq!(
            endpoint_url("https://lca.example.com", "/"),
            "https://lca.example.com/"
        );
    }

    #[test]
    fn endpoint_url_keeps_empty_base_relative() {
        assert_eq!(endpoint_url("", "/calculate"), "/calculate");
    }

    #[test]
    fn default_options_match_cold_start_policy() {
        let opts = ClientOptions::default();
        assert_eq!(opts.timeout_ms, 90_000);
        assert_eq!(opts.max_retries, 4);
        assert_eq!(opts.retry_backoff_ms, 1_500);
        assert_eq!(opts.warm_up_timeout_ms, 20_000);
    }

    #[test]
    fn warm_up_plan_has_no_retries_and_its_own_timeout() {
        let opts = ClientOptions::default();
        let plan = RetryPlan::warm_up(&opts);
        assert_eq!(plan.max_retries, 0);
        assert_eq!(plan.timeout, Duration::from_secs(20));
    }
}
