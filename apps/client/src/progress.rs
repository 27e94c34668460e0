//! Debounced progress reporting.
//!
//! A report is scheduled every time the cursor settles on an item and only
//! sent once the cursor has stayed there for the debounce delay. Scheduling a
//! new report cancels the pending one, so fast paging sends a single report
//! for the item the user stopped on.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use review_core::types::{ItemKey, ProgressEvent};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Destination for progress records.
pub trait ProgressSink: Send + Sync + 'static {
    fn track(&self, event: ProgressEvent) -> impl Future<Output = ()> + Send;
}

struct Pending {
    key: ItemKey,
    timer: JoinHandle<()>,
}

/// Cancellable deferred report keyed by the focused item.
pub struct ProgressReporter<S> {
    sink: Arc<S>,
    delay: Duration,
    runtime: Option<Handle>,
    pending: Option<Pending>,
}

impl<S: ProgressSink> ProgressReporter<S> {
    /// Timers run on the runtime current at construction, or on the first
    /// runtime seen by [`schedule`](Self::schedule).
    pub fn new(sink: Arc<S>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            runtime: Handle::try_current().ok(),
            pending: None,
        }
    }

    /// Replace any pending report with one for `key`.
    ///
    /// Without a tokio runtime the report is skipped.
    pub fn schedule(&mut self, key: ItemKey, event: ProgressEvent) {
        self.cancel();

        if self.runtime.is_none() {
            self.runtime = Handle::try_current().ok();
        }
        let Some(runtime) = self.runtime.as_ref() else {
            warn!(outer = %key.outer, inner = %key.inner, "no async runtime, progress report skipped");
            return;
        };

        debug!(outer = %key.outer, inner = %key.inner, "progress report scheduled");
        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        let timer = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: cancelling after this point leaves the request alone.
            tokio::spawn(async move { sink.track(event).await });
        });

        self.pending = Some(Pending { key, timer });
    }

    /// Drop the pending report if its timer has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            if !pending.timer.is_finished() {
                debug!(outer = %pending.key.outer, inner = %pending.key.inner, "progress report cancelled");
            }
            pending.timer.abort();
        }
    }

    /// Item whose report is still waiting on its timer.
    pub fn pending_key(&self) -> Option<&ItemKey> {
        self.pending
            .as_ref()
            .filter(|p| !p.timer.is_finished())
            .map(|p| &p.key)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<S> Drop for ProgressReporter<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.timer.abort();
        }
    }
}
