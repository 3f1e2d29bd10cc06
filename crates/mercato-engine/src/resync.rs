//! # Mutation Resync
//!
//! Couples an entity's write endpoints to its list engine: after any
//! successful create, update or remove the owning list refetches page 0
//! with its current committed query, so the view reflects the server's
//! ordering rather than a local guess.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mutation Resync Flow                              │
//! │                                                                         │
//! │  create/update/remove ──► writer ──► Ok ──► list.refresh() ──► Ok(())   │
//! │                                 └──► Err ─► diagnostics      ─► Err(e)  │
//! │                                                                         │
//! │  A failed write never touches the list: items, paging and errors        │
//! │  stay exactly as they were. The caller receives the error and the       │
//! │  form screen renders it.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use mercato_client::{EntityWriter, RemoteListSource};
use mercato_core::{FetchError, FetchResult};

use crate::diag::DiagnosticsSink;
use crate::store::ListEngine;

/// Write facade for one entity, bound to the list it invalidates.
pub struct MutationResync<S, W>
where
    S: RemoteListSource,
    W: EntityWriter,
{
    entity: &'static str,
    list: ListEngine<S>,
    writer: W,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl<S, W> MutationResync<S, W>
where
    S: RemoteListSource + 'static,
    S::Item: Send,
    W: EntityWriter,
{
    pub fn new(
        entity: &'static str,
        list: ListEngine<S>,
        writer: W,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        MutationResync {
            entity,
            list,
            writer,
            diagnostics,
        }
    }

    /// The list this facade resyncs. Useful when the screen holding the
    /// form also renders the list.
    pub fn list(&self) -> &ListEngine<S> {
        &self.list
    }

    /// Creates a record, then resyncs the list from page 0.
    pub async fn create(&self, draft: &W::Draft) -> FetchResult<()> {
        match self.writer.create(draft).await {
            Ok(()) => self.resync("create").await,
            Err(error) => self.fail("create", error),
        }
    }

    /// Replaces a record, then resyncs the list from page 0.
    pub async fn update(&self, id: &str, draft: &W::Draft) -> FetchResult<()> {
        match self.writer.update(id, draft).await {
            Ok(()) => self.resync("update").await,
            Err(error) => self.fail("update", error),
        }
    }

    /// Deletes a record, then resyncs the list from page 0.
    pub async fn remove(&self, id: &str) -> FetchResult<()> {
        match self.writer.remove(id).await {
            Ok(()) => self.resync("remove").await,
            Err(error) => self.fail("remove", error),
        }
    }

    async fn resync(&self, op: &'static str) -> FetchResult<()> {
        debug!(entity = self.entity, op, "write succeeded, resyncing list");
        self.list.refresh().await;
        Ok(())
    }

    fn fail(&self, op: &'static str, error: FetchError) -> FetchResult<()> {
        warn!(entity = self.entity, op, %error, "write failed");
        self.diagnostics.write_failed(self.entity, &error);
        if error.is_unauthorized() {
            self.diagnostics.session_expired();
        }
        Err(error)
    }
}
