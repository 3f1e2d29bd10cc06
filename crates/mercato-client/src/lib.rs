//! # mercato-client: REST Data Layer for Mercato
//!
//! This crate provides HTTP access to the business backend. It is the only
//! place in the workspace that knows about URLs, wire envelopes, bearer
//! tokens, or status codes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mercato Data Flow                                  │
//! │                                                                         │
//! │  ListEngine.load(page, query, reset)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   mercato-client (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ApiClient   │    │    Sources    │    │     Wire     │  │   │
//! │  │   │ bearer token  │◄───│ one per       │    │ PageEnvelope │  │   │
//! │  │   │ status checks │    │ entity        │    │ ErrorBody    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Paginated REST backend                                                 │
//! │  GET  /customers?page=0&size=10&sort=name,asc&name=ana                  │
//! │  POST /customers   PUT /customers/{id}   DELETE /customers/{id}         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`api`] - shared reqwest wrapper + TokenProvider collaborator
//! - [`source`] - RemoteListSource / EntityWriter contracts
//! - [`sources`] - per-entity HTTP sources
//! - [`wire`] - backend envelope and error body shapes
//! - [`error`] - construction errors and fetch classification
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mercato_client::{ApiClient, CustomerSource, StaticToken};
//!
//! let api = ApiClient::new("http://192.168.1.5:8080", Arc::new(StaticToken::new(token)))?;
//! let customers = CustomerSource::new(api.clone());
//! let page = customers.fetch_page(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod error;
pub mod source;
pub mod sources;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{ApiClient, StaticToken, TokenProvider};
pub use error::ClientError;
pub use source::{EntityWriter, RemoteListSource};

// Source re-exports for convenience
pub use sources::customer::{CustomerDraft, CustomerSource};
pub use sources::product::{ProductDraft, ProductSource};
pub use sources::sale::{SaleDraft, SaleItemDraft, SaleSource};
pub use sources::supplier::{SupplierDraft, SupplierSource};
