//! # mercato-core: Pure List-State Logic for Mercato
//!
//! This crate is the **heart** of the Mercato list engine. It contains the
//! state machine of a paginated, searchable, incrementally-loaded list as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mercato Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  View Layer (out of scope)                      │   │
//! │  │    List UI ──► Search box ──► Pull-to-refresh ──► Scroll       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots + actions                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mercato-engine                               │   │
//! │  │    SearchDebouncer, ListEngine, MutationResync, Pickers        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mercato-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   page    │  │   list    │  │   query   │  │   │
//! │  │   │ Customer  │  │PageRequest│  │ ListState │  │   Query   │  │   │
//! │  │   │ Product.. │  │ Sort      │  │ LoadTicket│  │  commit   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE TRANSITIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mercato-client (HTTP layer)                  │   │
//! │  │         reqwest sources, wire envelopes, token injection        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: admission, merge, failure, staleness checks are
//!    deterministic functions on `ListState` - no mocks needed to test them
//! 2. **No I/O**: network, timers, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: the fetch taxonomy is typed, never strings

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod list;
pub mod page;
pub mod query;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mercato_core::ListState` instead of
// `use mercato_core::list::ListState`

pub use error::{FetchError, FetchResult};
pub use list::{merge_page, ListSnapshot, ListState, LoadTicket};
pub use page::{PageRequest, PageResponse, Sort, SortDirection};
pub use query::Query;
pub use types::{Customer, Product, Sale, SaleItem, Supplier};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default records per page.
///
/// ## Why 10?
/// Matches the backend's page slicing and keeps the first paint of a mobile
/// list under one screenful. Overridable through the engine config.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default quiet interval before a search keystroke burst commits, in ms.
///
/// ## Why 800?
/// Long enough that a person typing a word produces exactly one fetch,
/// short enough that the list reacts as soon as they pause.
pub const DEFAULT_DEBOUNCE_MS: u64 = 800;
