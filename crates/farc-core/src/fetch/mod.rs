//! Buffered HTTP GET over curl.
//!
//! Feed pages and images are small, so responses are buffered whole in
//! memory. Buffering is also what lets the interceptor observe a body
//! without consuming anything the caller still needs.

use std::collections::HashMap;
use std::time::Duration;

use crate::retry::FetchError;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u32,
    /// Complete response body.
    pub body: Vec<u8>,
}

impl Response {
    /// True for 2xx (transport-success) statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Timeouts for a single fetch; values come from `FarcConfig`.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Performs a GET and buffers the whole body.
///
/// Follows redirects. A non-2xx status is still `Ok` (the caller decides how
/// to treat it); `Err` means curl-level failure (DNS, connect, timeout).
pub fn fetch_bytes(
    url: &str,
    custom_headers: &HashMap<String, String>,
    opts: FetchOptions,
) -> Result<Response, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(FetchError::Curl)?;
    easy.timeout(opts.timeout).map_err(FetchError::Curl)?;

    let mut list = curl::easy::List::new();
    for (k, v) in custom_headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(FetchError::Curl)?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list).map_err(FetchError::Curl)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(FetchError::Curl)?;
        transfer.perform().map_err(FetchError::Curl)?;
    }

    let status = easy.response_code().map_err(FetchError::Curl)?;
    Ok(Response { status, body })
}
