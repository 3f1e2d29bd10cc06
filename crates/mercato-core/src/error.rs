//! # Fetch Error Taxonomy
//!
//! Classified errors for the list synchronization engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Fetch Error Categories                            │
//! │                                                                         │
//! │  Unauthorized (401/403)  ──►  session-expiry observer, NEVER shown      │
//! │                               as list error state                       │
//! │  Network                 ──►  no response received (connect/timeout)    │
//! │  Server { message }      ──►  other 4xx/5xx, server text when present   │
//! │  Unknown                 ──►  non-HTTP failure (decode, panic-adjacent) │
//! │                                                                         │
//! │  Reset failure        → items cleared, error populated (full-view       │
//! │                         retry affordance)                               │
//! │  Continuation failure → items kept, transient footer indicator only     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never bare Strings
//! 3. `Clone + PartialEq` so errors can live inside `ListState` snapshots
//!    and be asserted on in tests

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Fetch Error
// =============================================================================

/// Classified failure of a single fetch or write against the backend.
///
/// The classification drives three different handling paths:
/// - `Unauthorized` is routed to the session-expiry observer and must not
///   populate the list's user-facing error state
/// - everything else populates either the blocking error (reset loads) or
///   the transient error (continuation loads)
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum FetchError {
    /// 401/403 from the backend. Session is expired or the token is invalid.
    #[error("Session expired or token invalid")]
    Unauthorized,

    /// No response received at all (connect failure, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// Any other 4xx/5xx. Carries the server-provided message when the body
    /// had one, otherwise the caller supplies a generic fallback.
    #[error("Server error: {message}")]
    Server { message: String },

    /// Non-HTTP failure (body decode, unexpected shape).
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Returns true if this is a 401/403 session problem.
    ///
    /// Unauthorized errors bypass the list error state entirely; the
    /// session-expiry handler owns them.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized)
    }

    /// Returns true if this error came from the transport, not the server.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    /// The message to show the user, already classified.
    ///
    /// `Unauthorized` intentionally has no list-level message; callers that
    /// reach here with it get the session text as a last resort.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

// =============================================================================
// Unit Tests
// =============================================================================
