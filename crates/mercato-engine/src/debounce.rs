//! # Search Debouncer
//!
//! Converts rapid raw-text-input changes into a stable committed query by
//! delaying reaction until input quiesces.
//!
//! ## Timer Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Debounce Timeline (800ms quiet)                     │
//! │                                                                         │
//! │  keystrokes:   "a"      "an"       "ana"                               │
//! │                 │        │          │                                   │
//! │  timers:        ├──✕     ├──✕       ├────────800ms────────┐            │
//! │                 (aborted) (aborted)                        ▼            │
//! │                                                     commit "ana"        │
//! │                                                     → ONE reset fetch   │
//! │                                                                         │
//! │  Each keystroke aborts the pending timer and starts a fresh one.        │
//! │  Explicit submit aborts the timer and commits immediately; a timer      │
//! │  that would later fire with the same text commits nothing (the Query    │
//! │  commit-if-changed rule suppresses the duplicate).                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Debounce timers are the only cancellable timed resource in the engine;
//! they are always aborted before replacement and on drop. In-flight
//! network calls are never cancelled, only discarded by generation.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// One restartable quiet-interval timer.
pub struct SearchDebouncer {
    /// Quiet interval between the last keystroke and the commit.
    quiet: Duration,

    /// Pending timer task, if any. std Mutex: held only to swap the handle.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchDebouncer {
    /// Creates a debouncer with the given quiet interval.
    pub fn new(quiet: Duration) -> Self {
        SearchDebouncer {
            quiet,
            pending: Mutex::new(None),
        }
    }

    /// Restarts the timer: aborts any pending one and schedules `commit`
    /// to run after the quiet interval passes uninterrupted.
    pub fn schedule<F>(&self, commit: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet = self.quiet;
        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            commit.await;
        });
        self.replace(Some(task));
    }

    /// Aborts the pending timer, if any. Called on explicit submit and on
    /// disposal.
    pub fn cancel(&self) {
        self.replace(None);
    }

    fn replace(&self, next: Option<JoinHandle<()>>) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = next;
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
