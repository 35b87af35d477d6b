//! Capture session state: the response log and the active flag.
//!
//! One `FeedRecorder` owns all mutable capture state. Handles are cheap
//! clones sharing the same log, so the interceptor and the control surface
//! can hold it concurrently; all access goes through one mutex (this code
//! runs on a multi-threaded runtime, unlike the single event loop the
//! original browser capture relied on).

use std::sync::{Arc, Mutex};

use crate::feed::CapturedResponse;

/// Snapshot of the recorder state for `status` reporting.
#[derive(Debug, Clone)]
pub struct CaptureStatus {
    /// True while capture is active.
    pub active: bool,
    /// Number of responses in the log.
    pub responses: usize,
    /// Total items across the log, before dedup.
    pub items: usize,
    /// URLs of the most recently captured responses, newest last.
    pub recent_urls: Vec<String>,
}

#[derive(Debug, Default)]
struct RecorderState {
    active: bool,
    log: Vec<CapturedResponse>,
}

/// Shared capture log and active flag. All operations are idempotent.
#[derive(Debug, Clone, Default)]
pub struct FeedRecorder {
    inner: Arc<Mutex<RecorderState>>,
}

impl FeedRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate capture and clear the log. Prior captures in this session are
    /// discarded; cross-session merging happens on exported bundles instead.
    pub fn start(&self) {
        let mut st = self.inner.lock().unwrap();
        st.active = true;
        st.log.clear();
        tracing::info!("capture started, log cleared");
    }

    /// Deactivate capture. The log is left intact so a later export still
    /// sees everything captured so far.
    pub fn stop(&self) {
        let mut st = self.inner.lock().unwrap();
        st.active = false;
        tracing::info!("capture stopped, {} responses in log", st.log.len());
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().unwrap().active
    }

    /// Append a response iff capture is active. Returns whether it was logged.
    pub fn record(&self, resp: CapturedResponse) -> bool {
        let mut st = self.inner.lock().unwrap();
        if !st.active {
            return false;
        }
        tracing::debug!(url = %resp.url, items = resp.item_count(), "captured feed response");
        st.log.push(resp);
        true
    }

    /// Non-consuming copy of the log, in completion order.
    pub fn snapshot(&self) -> Vec<CapturedResponse> {
        self.inner.lock().unwrap().log.clone()
    }

    /// Current state with up to `recent` recently captured URLs.
    pub fn status(&self, recent: usize) -> CaptureStatus {
        let st = self.inner.lock().unwrap();
        let items = st.log.iter().map(|r| r.item_count()).sum();
        let skip = st.log.len().saturating_sub(recent);
        CaptureStatus {
            active: st.active,
            responses: st.log.len(),
            items,
            recent_urls: st.log.iter().skip(skip).map(|r| r.url.clone()).collect(),
        }
    }
}
