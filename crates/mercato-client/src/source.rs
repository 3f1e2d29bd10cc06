//! # Source Traits
//!
//! The collaborator contracts between the data layer and the list engine.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   RemoteListSource Contract                             │
//! │                                                                         │
//! │  fetch_page(request)                                                    │
//! │  • 0-based page index, fixed page size                                  │
//! │  • deterministic multi-field sort (stable tiebreak server-side)         │
//! │  • optional substring filter on one text field                          │
//! │  • GUARANTEE: pages for the same parameters never overlap, and          │
//! │    is_last_page is accurate                                             │
//! │                                                                         │
//! │  fetch_all()                                                            │
//! │  • single unpaged call returning the full candidate set                 │
//! │  • used by pickers that filter client-side                              │
//! │                                                                         │
//! │  EntityWriter: conventional create / update / remove; the engine        │
//! │  resyncs page 0 after any success and forwards failures untouched.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine only ever sees these traits; tests drive it with scripted
//! in-memory implementations and production wires in the HTTP sources from
//! [`crate::sources`].

use async_trait::async_trait;

use mercato_core::{FetchResult, PageRequest, PageResponse};

/// One backend paginated endpoint for one entity type.
#[async_trait]
pub trait RemoteListSource: Send + Sync {
    /// Record type this source serves.
    type Item: Send;

    /// Fetches one page under the deterministic paging contract.
    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Self::Item>>;

    /// Fetches the full, unpaged candidate set.
    async fn fetch_all(&self) -> FetchResult<Vec<Self::Item>>;
}

/// Conventional per-entity write endpoints.
#[async_trait]
pub trait EntityWriter: Send + Sync {
    /// Payload accepted by the create/update endpoints.
    type Draft: Send + Sync;

    /// Creates a new record.
    async fn create(&self, draft: &Self::Draft) -> FetchResult<()>;

    /// Replaces the record with the given id.
    async fn update(&self, id: &str, draft: &Self::Draft) -> FetchResult<()>;

    /// Deletes the record with the given id.
    async fn remove(&self, id: &str) -> FetchResult<()>;
}
