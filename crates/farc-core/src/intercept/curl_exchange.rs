//! Production exchange backed by curl.

use crate::fetch::{fetch_bytes, FetchOptions, Response};
use crate::retry::FetchError;

use super::{HttpExchange, Request};

/// `HttpExchange` over a curl Easy handle. Stateless; one handle per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlExchange {
    opts: FetchOptions,
}

impl CurlExchange {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl HttpExchange for CurlExchange {
    fn execute(&self, req: &Request) -> Result<Response, FetchError> {
        fetch_bytes(&req.url, &req.headers, self.opts)
    }
}
