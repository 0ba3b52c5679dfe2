//! One-shot section loading with fallback records.
//!
//! A [`SectionLoader`] is mounted once per page render. Mounting spawns a
//! single fetch task and hands back a [`LoadHandle`] whose state starts at
//! [`LoadState::Pending`] and moves exactly once to `Ready` or `Failed`.
//! A fetch that panics settles as `Failed` like any other error.
//! Cancelling the mount's token (or dropping the handle) stops the task
//! before it can publish anything, so a render that has been abandoned
//! never sees a late update.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::content::{fallback, ContentQuery, ContentRecord, ContentSource};

/// Progress of one section's fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    /// Remote records in remote order. May be empty.
    Ready(Vec<ContentRecord>),
    /// The fetch failed; `fallback` holds the built-in records to show.
    Failed {
        reason: String,
        fallback: Vec<ContentRecord>,
    },
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Records to display, if the load has settled.
    pub fn records(&self) -> Option<&[ContentRecord]> {
        match self {
            Self::Pending => None,
            Self::Ready(records) => Some(records),
            Self::Failed { fallback, .. } => Some(fallback),
        }
    }
}

/// A fetch operation bound to its fallback records.
#[derive(Clone)]
pub struct SectionLoader {
    source: Arc<dyn ContentSource>,
    query: ContentQuery,
    fallback: Vec<ContentRecord>,
}

impl SectionLoader {
    /// Loader for `query` using the built-in fallback set of its kind.
    pub fn new(source: Arc<dyn ContentSource>, query: ContentQuery) -> Self {
        let fallback = fallback::fallback_records(query.kind);
        Self::with_fallback(source, query, fallback)
    }

    pub fn with_fallback(
        source: Arc<dyn ContentSource>,
        query: ContentQuery,
        fallback: Vec<ContentRecord>,
    ) -> Self {
        Self {
            source,
            query,
            fallback,
        }
    }

    /// Start the fetch. `cancel` is the mount's lifetime: once cancelled,
    /// the task exits without publishing. The handle owns a child token, so
    /// dropping one handle never cancels its siblings.
    pub fn mount(self, cancel: CancellationToken) -> LoadHandle {
        let (tx, rx) = watch::channel(LoadState::Pending);
        let kind = self.query.kind;
        let cancel = cancel.child_token();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            // A panicking source must still settle the mount.
            let fetch = AssertUnwindSafe(self.source.fetch(&self.query)).catch_unwind();
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(%kind, "section unmounted before fetch resolved");
                    return;
                }
                outcome = fetch => outcome,
            };

            let next = match outcome {
                Ok(Ok(records)) => {
                    debug!(%kind, count = records.len(), "section ready");
                    LoadState::Ready(records)
                }
                Ok(Err(err)) => {
                    warn!(%kind, error = %err, "section fetch failed, using fallback records");
                    LoadState::Failed {
                        reason: err.to_string(),
                        fallback: self.fallback,
                    }
                }
                Err(panic) => {
                    let reason = format!("content fetch panicked: {}", panic_message(&*panic));
                    error!(%kind, %reason, "section fetch panicked, using fallback records");
                    LoadState::Failed {
                        reason,
                        fallback: self.fallback,
                    }
                }
            };

            if token.is_cancelled() {
                return;
            }
            // Receiver may already be gone; nothing left to update then.
            let _ = tx.send(next);
        });

        LoadHandle {
            rx,
            cancel,
            task,
        }
    }
}

/// The mounted side of a [`SectionLoader`].
pub struct LoadHandle {
    rx: watch::Receiver<LoadState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl LoadHandle {
    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.rx.borrow().clone()
    }

    /// Wait until the state leaves `Pending`.
    ///
    /// Returns `Pending` if the mount was cancelled first.
    pub async fn settled(&mut self) -> LoadState {
        match self.rx.wait_for(|state| !state.is_pending()).await {
            Ok(state) => state.clone(),
            Err(_) => LoadState::Pending,
        }
    }

    /// Tear down the mount. Any in-flight fetch result is discarded.
    pub fn unmount(self) {
        drop(self);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic")
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if !self.task.is_finished() {
            self.task.abort();
        }
    }
}
