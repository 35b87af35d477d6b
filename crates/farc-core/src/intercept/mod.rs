//! Response interception as an explicit middleware layer.
//!
//! `FeedTap` wraps any [`HttpExchange`] and delegates every request
//! unchanged. When a response matches the feed endpoint, a parsed copy of the
//! body is handed to the recorder. The caller always receives the original
//! response; bodies are fully buffered, so observing is a borrow, never a
//! consuming read.

mod curl_exchange;

pub use curl_exchange::CurlExchange;

use std::collections::HashMap;

use serde_json::Value;

use crate::capture::FeedRecorder;
use crate::feed::CapturedResponse;
use crate::fetch::Response;
use crate::retry::FetchError;

/// An outbound HTTP request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }
}

/// Completion callback for the callback-style calling convention.
pub type OnComplete<'a> = Box<dyn FnOnce(Result<Response, FetchError>) + 'a>;

/// The two calling conventions a host exposes for an HTTP exchange: a direct
/// (promise-like) call and a callback-based one. Implementations must treat
/// both identically; the default callback form completes through `execute`.
pub trait HttpExchange {
    fn execute(&self, req: &Request) -> Result<Response, FetchError>;

    fn execute_with(&self, req: &Request, on_complete: OnComplete<'_>) {
        on_complete(self.execute(req));
    }
}

/// Middleware decorator that observes feed responses passing through an
/// exchange. Transparent to the caller: return values and callback invocation
/// are those of the inner exchange, captured or not.
pub struct FeedTap<E> {
    inner: E,
    recorder: FeedRecorder,
    marker: String,
}

impl<E: HttpExchange> FeedTap<E> {
    /// Wraps `inner`; responses whose request URL contains `marker` are
    /// candidates for capture into `recorder`.
    pub fn new(inner: E, recorder: FeedRecorder, marker: impl Into<String>) -> Self {
        Self {
            inner,
            recorder,
            marker: marker.into(),
        }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: HttpExchange> HttpExchange for FeedTap<E> {
    fn execute(&self, req: &Request) -> Result<Response, FetchError> {
        let resp = self.inner.execute(req)?;
        observe(&self.recorder, &self.marker, &req.url, &resp);
        Ok(resp)
    }

    fn execute_with(&self, req: &Request, on_complete: OnComplete<'_>) {
        let recorder = self.recorder.clone();
        let marker = self.marker.clone();
        let url = req.url.clone();
        self.inner.execute_with(
            req,
            Box::new(move |result| {
                if let Ok(resp) = &result {
                    observe(&recorder, &marker, &url, resp);
                }
                on_complete(result);
            }),
        );
    }
}

/// Capture decision for one completed exchange. Never fails: a body that is
/// not JSON, or JSON without a non-empty `feedItems` array, is simply not
/// logged.
fn observe(recorder: &FeedRecorder, marker: &str, url: &str, resp: &Response) {
    if !url.contains(marker) || !resp.is_success() {
        return;
    }
    if !recorder.is_active() {
        // Still worth knowing a matching response went by uncaptured.
        tracing::debug!(%url, "feed response seen while capture inactive");
        return;
    }
    let payload: Value = match serde_json::from_slice(&resp.body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%url, "feed response body did not parse: {}", e);
            return;
        }
    };
    if let Some(captured) = CapturedResponse::from_payload(url, payload) {
        recorder.record(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Test exchange handing out queued responses.
    struct MockExchange {
        responses: RefCell<VecDeque<Response>>,
    }

    impl MockExchange {
        fn new(responses: Vec<Response>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
            }
        }
    }

    impl HttpExchange for MockExchange {
        fn execute(&self, _req: &Request) -> Result<Response, FetchError> {
            Ok(self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("mock exhausted"))
        }
    }

    fn json_body(s: &str) -> Response {
        Response {
            status: 200,
            body: s.as_bytes().to_vec(),
        }
    }

    fn tap_with(responses: Vec<Response>) -> (FeedTap<MockExchange>, FeedRecorder) {
        let recorder = FeedRecorder::new();
        recorder.start();
        let tap = FeedTap::new(MockExchange::new(responses), recorder.clone(), "/api/feed/feed");
        (tap, recorder)
    }

    #[test]
    fn matching_response_captured_and_passed_through() {
        let body = r#"{"feedItems":[{"feedItemId":"a"}]}"#;
        let (tap, recorder) = tap_with(vec![json_body(body)]);

        let resp = tap.execute(&Request::get("https://x/api/feed/feed?older")).unwrap();
        assert_eq!(resp.body, body.as_bytes());

        let log = recorder.snapshot();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].url, "https://x/api/feed/feed?older");
        assert_eq!(log[0].item_count(), 1);
    }

    #[test]
    fn non_matching_url_not_captured() {
        let (tap, recorder) = tap_with(vec![json_body(r#"{"feedItems":[{"feedItemId":"a"}]}"#)]);
        tap.execute(&Request::get("https://x/api/me")).unwrap();
        assert_eq!(recorder.status(5).responses, 0);
    }

    #[test]
    fn missing_or_empty_feed_items_not_captured() {
        let (tap, recorder) = tap_with(vec![
            json_body(r#"{"messages":[]}"#),
            json_body(r#"{"feedItems":[]}"#),
        ]);
        tap.execute(&Request::get("https://x/api/feed/feed")).unwrap();
        tap.execute(&Request::get("https://x/api/feed/feed")).unwrap();
        assert_eq!(recorder.status(5).responses, 0);
        assert_eq!(recorder.status(5).items, 0);
    }

    #[test]
    fn malformed_body_swallowed_and_passed_through() {
        let (tap, recorder) = tap_with(vec![json_body("not json {{")]);
        let resp = tap.execute(&Request::get("https://x/api/feed/feed")).unwrap();
        assert_eq!(resp.body, b"not json {{");
        assert_eq!(recorder.status(5).responses, 0);
    }

    #[test]
    fn non_success_status_not_captured() {
        let (tap, recorder) = tap_with(vec![Response {
            status: 500,
            body: br#"{"feedItems":[{"feedItemId":"a"}]}"#.to_vec(),
        }]);
        tap.execute(&Request::get("https://x/api/feed/feed")).unwrap();
        assert_eq!(recorder.status(5).responses, 0);
    }

    #[test]
    fn inactive_recorder_gates_capture_but_not_passthrough() {
        let body = r#"{"feedItems":[{"feedItemId":"a"}]}"#;
        let (tap, recorder) = tap_with(vec![json_body(body)]);
        recorder.stop();
        let resp = tap.execute(&Request::get("https://x/api/feed/feed")).unwrap();
        assert_eq!(resp.body, body.as_bytes());
        assert_eq!(recorder.status(5).responses, 0);
    }

    #[test]
    fn callback_convention_captures_and_delivers_original() {
        let body = r#"{"feedItems":[{"feedItemId":"a"},{"feedItemId":"b"}]}"#;
        let (tap, recorder) = tap_with(vec![json_body(body)]);

        let mut delivered: Option<Vec<u8>> = None;
        tap.execute_with(
            &Request::get("https://x/api/feed/feed"),
            Box::new(|result| {
                delivered = Some(result.unwrap().body);
            }),
        );

        assert_eq!(delivered.as_deref(), Some(body.as_bytes()));
        let status = recorder.status(5);
        assert_eq!(status.responses, 1);
        assert_eq!(status.items, 2);
    }
}
