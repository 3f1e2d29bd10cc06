//! # Entity Sources
//!
//! HTTP source implementations, one per entity.
//!
//! ## Source Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Source Pattern Explained                             │
//! │                                                                         │
//! │  Each entity gets one small struct wrapping the shared ApiClient.       │
//! │                                                                         │
//! │  ListEngine.load(...)                                                   │
//! │       │                                                                 │
//! │       │  source.fetch_page(request)                                     │
//! │       ▼                                                                 │
//! │  CustomerSource                                                         │
//! │  ├── fetch_page  → GET /customers?page&size&sort&name                   │
//! │  ├── fetch_all   → GET /customers                                       │
//! │  ├── create      → POST /customers                                      │
//! │  ├── update      → PUT /customers/{id}                                  │
//! │  └── remove      → DELETE /customers/{id}                               │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Paths, filter params, sorts and fallback messages live in ONE place  │
//! │  • The engine stays entity-agnostic behind RemoteListSource             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Sources
//!
//! - [`customer::CustomerSource`] - customers, name-filtered
//! - [`supplier::SupplierSource`] - suppliers, name-filtered
//! - [`product::ProductSource`] - inventory items, name-filtered
//! - [`sale::SaleSource`] - sales history, newest-first, no text filter

pub mod customer;
pub mod product;
pub mod sale;
pub mod supplier;
