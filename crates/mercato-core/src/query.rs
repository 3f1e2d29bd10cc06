//! # Query
//!
//! The two-level search query: raw keystrokes versus the committed value
//! fetches are issued for.
//!
//! `raw_input` changes on every keystroke; `committed` only changes when the
//! debounce timer quiesces or the user explicitly submits. Commit-if-changed
//! is what guarantees a submit followed by a late timer fire cannot issue a
//! second fetch for the same text.

use serde::{Deserialize, Serialize};

/// Search query state for one list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Latest raw text from the input field
    pub raw_input: String,

    /// The value the current list contents were fetched for
    pub committed: String,
}

impl Query {
    /// Records a keystroke. Does not touch `committed`.
    pub fn set_raw_input(&mut self, text: impl Into<String>) {
        self.raw_input = text.into();
    }

    /// Commits the raw input if it differs from the committed value.
    ///
    /// Returns true when the committed value actually changed, i.e. when a
    /// reset fetch is warranted. Called when the debounce timer fires.
    pub fn commit_if_changed(&mut self) -> bool {
        if self.raw_input == self.committed {
            return false;
        }
        self.committed = self.raw_input.clone();
        true
    }

    /// Explicit submit: commits unconditionally and returns the query text.
    ///
    /// Synchronizing `committed` to `raw_input` here is what suppresses the
    /// duplicate fetch when the pending debounce timer would later fire with
    /// the same value.
    pub fn submit(&mut self) -> String {
        self.committed = self.raw_input.clone();
        self.committed.clone()
    }
}
