//! Retry and backoff policy for image fetches.
//!
//! The capture core never retries (a missed response is just not captured);
//! retry belongs to the image fetcher. This module classifies fetch errors
//! (timeouts, throttling, connection failures) and makes exponential backoff
//! decisions so the downloader applies one consistent policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;

use crate::config::RetryConfig;

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: std::time::Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            max_delay: std::time::Duration::from_secs(cfg.max_delay_secs),
        }
    }
}
