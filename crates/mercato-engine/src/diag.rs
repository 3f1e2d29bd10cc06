//! # Diagnostics Sink
//!
//! Observer trait for classified failures. The host application routes
//! these to crash reporting and to its session-expiry handling; the engine
//! never renders them itself.

use mercato_core::FetchError;

/// Trait for forwarding classified errors (implemented by the host app).
pub trait DiagnosticsSink: Send + Sync {
    /// A read fetch failed for the named entity list.
    fn fetch_failed(&self, entity: &str, error: &FetchError);

    /// A create/update/remove failed for the named entity.
    fn write_failed(&self, entity: &str, error: &FetchError);

    /// A 401/403 was observed. The session collaborator should re-login;
    /// the engine has already kept this out of its user-facing error state.
    fn session_expired(&self);
}

/// No-op sink for testing.
pub struct NoOpSink;

impl DiagnosticsSink for NoOpSink {
    fn fetch_failed(&self, _entity: &str, _error: &FetchError) {}
    fn write_failed(&self, _entity: &str, _error: &FetchError) {}
    fn session_expired(&self) {}
}
