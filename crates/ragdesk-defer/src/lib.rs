//! One-shot cancellable deferred tasks for ragdesk.
//!
//! The session layer has exactly two timed behaviors, and both are
//! "run this once, a little later, unless something newer happened":
//!
//! - the delayed redirect to the login page after an OAuth error
//! - the single re-check of login state after a storage write
//!
//! [`Deferred`] is that primitive: a closure scheduled on the Tokio timer
//! that fires at most once and is aborted when the handle is cancelled or
//! dropped. [`DeferredSlot`] holds at most one of them, so scheduling a new
//! task supersedes the pending one.
//!
//! # Not a retry loop
//!
//! Nothing here repeats. A deferred task either fires once or never; a
//! caller that wants another attempt has to schedule it explicitly.
//!
//! # Runtime
//!
//! Scheduling calls [`tokio::spawn`], so it must happen inside a Tokio
//! runtime. The console runs on a current-thread runtime, which matches
//! the single-threaded, turn-based model of the UI it drives:
//!
//! ```ignore
//! let mut slot = DeferredSlot::new("login-recheck");
//! slot.schedule(Duration::from_millis(50), move || watch.evaluate());
//! // later, on teardown:
//! slot.cancel();
//! ```

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// Deferred
// ---------------------------------------------------------------------------

/// A closure that runs once after a delay, unless cancelled first.
///
/// Dropping the handle cancels the task, so a `Deferred` owned by a
/// component can never fire after the component is gone.
#[derive(Debug)]
pub struct Deferred {
    label: &'static str,
    delay: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Deferred {
    /// Schedules `task` to run once after `delay`.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn after<F>(label: &'static str, delay: Duration, task: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        trace!(label, delay_ms = delay.as_millis() as u64, "deferred task scheduled");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(label, "deferred task firing");
            task();
        });
        Self {
            label,
            delay,
            handle: Some(handle),
        }
    }

    /// Cancels the task if it hasn't fired. Returns `true` if a pending
    /// task was actually cancelled.
    ///
    /// Safe to call multiple times.
    pub fn cancel(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        if handle.is_finished() {
            return false;
        }
        handle.abort();
        debug!(label = self.label, "deferred task cancelled");
        true
    }

    /// `true` while the task is scheduled but hasn't run.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// DeferredSlot
// ---------------------------------------------------------------------------

/// Holds at most one [`Deferred`]. Scheduling replaces (and cancels) the
/// previous task.
#[derive(Debug)]
pub struct DeferredSlot {
    label: &'static str,
    current: Option<Deferred>,
}

impl DeferredSlot {
    /// An empty slot. `label` names the task in logs.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            current: None,
        }
    }

    /// Schedules `task`, superseding anything still pending.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.current = Some(Deferred::after(self.label, delay, task));
    }

    /// Cancels the pending task, if any. Returns `true` if one was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some_and(|mut d| d.cancel())
    }

    pub fn is_pending(&self) -> bool {
        self.current.as_ref().is_some_and(Deferred::is_pending)
    }
}
