//! Fetch error type for retry classification.

use thiserror::Error;

/// Error returned by a single HTTP fetch (curl failure or HTTP error status).
/// Kept as an enum so we can classify and decide retries before converting
/// to anyhow at the call site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}
