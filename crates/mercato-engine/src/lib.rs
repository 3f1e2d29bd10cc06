//! # mercato-engine: List Synchronization Engine for Mercato
//!
//! This crate turns the pure list transitions of `mercato-core` into a
//! running engine: debounce timers, admission-guarded fetches, mutation
//! resync and picker lists, wired to the HTTP sources of `mercato-client`.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       List Engine Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  ListEngine (per screen/list)                    │  │
//! │  │                                                                  │  │
//! │  │  Holds one ListState + one Query + one debounce timer            │  │
//! │  │  View reads snapshots, fires actions; nothing else is shared     │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ SearchDebouncer│  │  ListState     │  │  RemoteListSource      │    │
//! │  │                │  │  (core crate)  │  │  (client crate)        │    │
//! │  │ 800ms quiet    │  │ admit / merge  │  │ paginated REST, one    │    │
//! │  │ window, abort  │  │ generation     │  │ source per entity      │    │
//! │  │ and restart    │  │ staleness      │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ MutationResync │  │  PickerList    │  │  Mercato (bindings)    │    │
//! │  │                │  │                │  │                        │    │
//! │  │ write then     │  │ fetch-all +    │  │ customers, suppliers,  │    │
//! │  │ page-0 reload  │  │ local filter   │  │ products, sales        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  DIAGNOSTICS (to the host app via DiagnosticsSink):                    │
//! │  • fetch_failed / write_failed - per-entity failure observation        │
//! │  • session_expired - credential rejection, for the logout flow         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`store`] - `ListEngine`, the per-screen list orchestrator
//! - [`debounce`] - quiet-window search timer
//! - [`resync`] - write facade that reloads the owning list
//! - [`picker`] - unpaged fetch-all selection lists
//! - [`bindings`] - per-entity wiring with fixed sort/search parameters
//! - [`config`] - engine configuration (page size, debounce interval)
//! - [`diag`] - host-app failure observation
//! - [`telemetry`] - tracing subscriber setup for host binaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mercato_client::{ApiClient, StaticToken};
//! use mercato_engine::{EngineConfig, Mercato, NoOpSink};
//!
//! let api = ApiClient::new("https://api.example.com", Arc::new(StaticToken::new("token")))?;
//! let app = Mercato::new(api, EngineConfig::load()?, Arc::new(NoOpSink));
//!
//! let customers = app.customers();
//! customers.list().refresh().await;          // mount: one reset fetch
//! customers.list().set_raw_input("ana");     // debounced search
//! customers.list().load_more().await;        // infinite scroll
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bindings;
pub mod config;
pub mod debounce;
pub mod diag;
pub mod picker;
pub mod resync;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use bindings::{
    CustomerBinding, Mercato, ProductBinding, SaleBinding, SupplierBinding,
};
pub use config::{ConfigError, EngineConfig};
pub use debounce::SearchDebouncer;
pub use diag::{DiagnosticsSink, NoOpSink};
pub use picker::{PickerList, PickerSnapshot};
pub use resync::MutationResync;
pub use store::ListEngine;
pub use telemetry::init_tracing;
