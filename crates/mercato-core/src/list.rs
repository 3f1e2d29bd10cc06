//! # List State
//!
//! The canonical per-screen state of one synchronized list, plus the pure
//! transition functions the async engine drives.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ListState Transitions                              │
//! │                                                                         │
//! │   IDLE ──reset──► LOADING_INITIAL ──ok──► READY                        │
//! │                        │                                                │
//! │                        └──fail──► ERROR (items cleared)                 │
//! │                                                                         │
//! │   READY ──load_more──► LOADING_MORE ──ok──► READY (appended)           │
//! │                             │                                           │
//! │                             └──fail──► READY + transient error          │
//! │                                        (items, has_more unchanged)      │
//! │                                                                         │
//! │   Any state ──reset trigger──► LOADING_INITIAL                         │
//! │                                                                         │
//! │   STALENESS: every admitted load gets a fresh generation. A response    │
//! │   whose generation is no longer current is discarded wholesale; it      │
//! │   may not merge items, flip flags, or clear markers owned by a newer    │
//! │   load.                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `items` order is the concatenation of server page orders; never
//!   deduplicated (the server's deterministic paging contract owns that)
//! - `has_more` is false until the first successful response is applied,
//!   then equals `!is_last_page` of the most recently applied response
//! - `page_index` is the index of the most recently applied response
//! - At most one load is in flight and able to mutate state; continuations
//!   arriving while one is in flight are dropped, resets supersede

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::page::PageResponse;

// =============================================================================
// Load Ticket
// =============================================================================

/// Proof of admission for one load, carrying its generation.
///
/// The engine captures a ticket when `admit` accepts a load and presents it
/// back with the outcome. Every application site checks the ticket against
/// the current generation first; a stale ticket is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Generation this load was admitted under.
    pub generation: u64,

    /// Whether this load replaces (reset) or appends (continuation).
    pub is_reset: bool,
}

// =============================================================================
// Page Merge
// =============================================================================

/// Replace-or-append merge of a fetched page into the item collection.
///
/// Reset replaces wholesale; continuation appends preserving order. No
/// deduplication in either case.
pub fn merge_page<T>(items: &mut Vec<T>, content: Vec<T>, is_reset: bool) {
    if is_reset {
        *items = content;
    } else {
        items.extend(content);
    }
}

// =============================================================================
// List State
// =============================================================================

/// State of one synchronized, paginated list.
///
/// Mutated only through the transition methods below; the async engine owns
/// scheduling, this type owns correctness.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    /// Records in server sort order (concatenated pages, no dedup)
    items: Vec<T>,

    /// Page index of the most recently applied successful response
    page_index: u32,

    /// Whether another page exists. False until the first success applies.
    has_more: bool,

    /// True while a reset load is in flight
    is_initial_loading: bool,

    /// True while a continuation load is in flight
    is_loading_more: bool,

    /// Blocking error from a failed reset load (items were cleared)
    error: Option<FetchError>,

    /// Transient error from a failed continuation load (items kept)
    transient_error: Option<FetchError>,

    /// Monotonically increasing load generation
    generation: u64,

    /// True while an admitted load has not yet finished
    in_flight: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState {
            items: Vec::new(),
            page_index: 0,
            has_more: false,
            is_initial_loading: false,
            is_loading_more: false,
            error: None,
            transient_error: None,
            generation: 0,
            in_flight: false,
        }
    }
}

impl<T> ListState<T> {
    /// Fresh, idle state. `has_more` starts false: before the first
    /// successful response there is nothing to continue from.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Records currently held, in server sort order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Page index of the most recently applied response.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Whether a continuation load could yield more records.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// True while a reset load is in flight.
    pub fn is_initial_loading(&self) -> bool {
        self.is_initial_loading
    }

    /// True while a continuation load is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// Blocking error from the last failed reset load, if any.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Transient error from the last failed continuation load, if any.
    pub fn transient_error(&self) -> Option<&FetchError> {
        self.transient_error.as_ref()
    }

    /// Current load generation. Mostly useful to tests.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while an admitted load has not finished.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the given ticket still owns the state.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Admission guard: decides whether a load may proceed.
    ///
    /// Rules:
    /// - a continuation while any load is in flight is dropped
    /// - a continuation when `has_more` is false is dropped
    /// - a reset is always admitted and supersedes whatever is in flight
    ///
    /// On admission the generation advances, loading flags are set, and a
    /// reset clears the blocking error so the retry affordance disappears
    /// immediately.
    pub fn admit(&mut self, is_reset: bool) -> Option<LoadTicket> {
        if !is_reset && self.in_flight {
            if self.is_initial_loading {
                // A reset owns the in-flight slot; a footer spinner here is
                // spurious and would outlive the reset. Clear it.
                self.is_loading_more = false;
            }
            return None;
        }
        if !is_reset && !self.has_more {
            self.is_loading_more = false;
            return None;
        }

        self.generation += 1;
        self.in_flight = true;

        if is_reset {
            self.is_initial_loading = true;
            self.error = None;
            self.transient_error = None;
        } else {
            self.is_loading_more = true;
        }

        Some(LoadTicket {
            generation: self.generation,
            is_reset,
        })
    }

    /// Applies a successful response, unless the ticket was superseded.
    ///
    /// Returns true when the response was actually applied.
    pub fn apply_success(&mut self, ticket: &LoadTicket, response: PageResponse<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        merge_page(&mut self.items, response.content, ticket.is_reset);
        self.page_index = response.page_index;
        self.has_more = !response.is_last_page;
        self.error = None;
        self.transient_error = None;
        true
    }

    /// Applies a classified failure, unless the ticket was superseded.
    ///
    /// Reset failures clear the items and populate the blocking error;
    /// continuation failures keep items and `has_more` untouched and only
    /// set the transient indicator. Unauthorized never reaches either error
    /// slot; the session-expiry observer owns it.
    ///
    /// Returns true when the failure was actually applied.
    pub fn apply_failure(&mut self, ticket: &LoadTicket, error: FetchError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        if ticket.is_reset {
            self.items.clear();
            self.has_more = false;
            if !error.is_unauthorized() {
                self.error = Some(error);
            }
        } else if !error.is_unauthorized() {
            self.transient_error = Some(error);
        }
        true
    }

    /// Finalizer: clears loading flags and the in-flight marker, but only
    /// for the load that still owns them. A superseded load must not clear
    /// flags set by a newer one.
    pub fn finish(&mut self, ticket: &LoadTicket) {
        if !self.is_current(ticket) {
            return;
        }
        self.is_initial_loading = false;
        self.is_loading_more = false;
        self.in_flight = false;
    }

    /// Dismisses the transient (footer) error indicator.
    pub fn dismiss_transient_error(&mut self) {
        self.transient_error = None;
    }
}

// =============================================================================
// Snapshot (engine-to-view read model)
// =============================================================================

/// Owned copy of everything the view layer renders from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot<T> {
    /// Records in server sort order
    pub items: Vec<T>,

    /// Page index of the most recently applied response
    pub page_index: u32,

    /// Whether `load_more` could yield more records
    pub has_more: bool,

    /// True while a reset load is in flight (full-view spinner)
    pub is_initial_loading: bool,

    /// True while a continuation load is in flight (footer spinner)
    pub is_loading_more: bool,

    /// Blocking error (full-view retry affordance)
    pub error: Option<FetchError>,

    /// Transient error (dismissible footer indicator)
    pub transient_error: Option<FetchError>,
}

impl<T: Clone> ListState<T> {
    /// Clones the renderable state out of the list.
    pub fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            items: self.items.clone(),
            page_index: self.page_index,
            has_more: self.has_more,
            is_initial_loading: self.is_initial_loading,
            is_loading_more: self.is_loading_more,
            error: self.error.clone(),
            transient_error: self.transient_error.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
