//! # Picker Lists
//!
//! The modal-selection variant of a list: one unpaged fetch of the full
//! candidate set on open, then purely local filtering per keystroke. Used
//! by the sale form to pick a customer and to pick products.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Picker Lifecycle                               │
//! │                                                                         │
//! │  open()          ──► fetch_all ──► items replaced, error cleared        │
//! │  set_filter(txt) ──► local only: lowercase substring on the name        │
//! │  visible()       ──► eligibility gate ∧ filter match                    │
//! │  retry()         ──► open() again                                       │
//! │                                                                         │
//! │  No paging, no debounce. Reopening refetches; a reopen while a fetch    │
//! │  is in flight supersedes it and the older result is discarded.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use mercato_client::RemoteListSource;
use mercato_core::FetchError;

use crate::diag::DiagnosticsSink;

// =============================================================================
// Picker State
// =============================================================================

struct PickerState<T> {
    items: Vec<T>,
    filter: String,
    is_loading: bool,
    error: Option<FetchError>,
    generation: u64,
}

impl<T> Default for PickerState<T> {
    fn default() -> Self {
        PickerState {
            items: Vec::new(),
            filter: String::new(),
            is_loading: false,
            error: None,
            generation: 0,
        }
    }
}

/// Renderable picker state.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSnapshot<T> {
    /// Candidates passing the eligibility gate and the current filter.
    pub visible: Vec<T>,
    pub filter: String,
    pub is_loading: bool,
    pub error: Option<FetchError>,
}

// =============================================================================
// Picker List
// =============================================================================

struct PickerInner<S: RemoteListSource> {
    entity: &'static str,
    source: S,
    state: AsyncMutex<PickerState<S::Item>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    /// Extracts the text the filter matches against.
    name_of: fn(&S::Item) -> &str,
    /// Gate applied before the filter. The product picker hides items
    /// with no stock; other pickers admit everything.
    eligible: fn(&S::Item) -> bool,
}

/// Fetch-all selection list for modal pickers.
pub struct PickerList<S: RemoteListSource> {
    inner: Arc<PickerInner<S>>,
}

impl<S: RemoteListSource> Clone for PickerList<S> {
    fn clone(&self) -> Self {
        PickerList {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> PickerList<S>
where
    S: RemoteListSource,
    S::Item: Send,
{
    pub fn new(
        entity: &'static str,
        source: S,
        diagnostics: Arc<dyn DiagnosticsSink>,
        name_of: fn(&S::Item) -> &str,
    ) -> Self {
        Self::with_eligibility(entity, source, diagnostics, name_of, |_| true)
    }

    /// Picker whose candidates must also pass `eligible`.
    pub fn with_eligibility(
        entity: &'static str,
        source: S,
        diagnostics: Arc<dyn DiagnosticsSink>,
        name_of: fn(&S::Item) -> &str,
        eligible: fn(&S::Item) -> bool,
    ) -> Self {
        PickerList {
            inner: Arc::new(PickerInner {
                entity,
                source,
                state: AsyncMutex::new(PickerState::default()),
                diagnostics,
                name_of,
                eligible,
            }),
        }
    }

    /// Fetches the full candidate set. Called on modal open and on retry.
    pub async fn open(&self) {
        let generation = {
            let mut state = self.inner.state.lock().await;
            state.generation += 1;
            state.is_loading = true;
            state.error = None;
            state.filter.clear();
            state.generation
        };

        debug!(entity = self.inner.entity, generation, "picker fetching all");
        let result = self.inner.source.fetch_all().await;

        let mut state = self.inner.state.lock().await;
        if state.generation != generation {
            debug!(
                entity = self.inner.entity,
                generation, "superseded picker fetch discarded"
            );
            return;
        }
        state.is_loading = false;
        match result {
            Ok(items) => {
                debug!(
                    entity = self.inner.entity,
                    count = items.len(),
                    "picker candidates loaded"
                );
                state.items = items;
            }
            Err(error) => {
                warn!(entity = self.inner.entity, %error, "picker fetch failed");
                self.inner.diagnostics.fetch_failed(self.inner.entity, &error);
                state.items.clear();
                if error.is_unauthorized() {
                    self.inner.diagnostics.session_expired();
                } else {
                    state.error = Some(error);
                }
            }
        }
    }

    /// Same fetch as `open`; separate name for the retry affordance.
    pub async fn retry(&self) {
        self.open().await;
    }

    /// Updates the local filter. No network, no debounce.
    pub async fn set_filter(&self, text: impl Into<String>) {
        self.inner.state.lock().await.filter = text.into();
    }

    /// Current renderable state, filter already applied.
    pub async fn snapshot(&self) -> PickerSnapshot<S::Item>
    where
        S::Item: Clone,
    {
        let state = self.inner.state.lock().await;
        let needle = state.filter.trim().to_lowercase();
        let visible = state
            .items
            .iter()
            .filter(|item| (self.inner.eligible)(item))
            .filter(|item| {
                needle.is_empty() || (self.inner.name_of)(item).to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        PickerSnapshot {
            visible,
            filter: state.filter.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::diag::NoOpSink;
    use mercato_core::{FetchResult, PageRequest, PageResponse, Product};

    #[derive(Clone)]
    struct FixedProducts(Vec<Product>);

    #[async_trait]
    impl RemoteListSource for FixedProducts {
        type Item = Product;

        async fn fetch_page(&self, _request: &PageRequest) -> FetchResult<PageResponse<Product>> {
            unreachable!("pickers never page")
        }

        async fn fetch_all(&self) -> FetchResult<Vec<Product>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RemoteListSource for FailingSource {
        type Item = Product;

        async fn fetch_page(&self, _request: &PageRequest) -> FetchResult<PageResponse<Product>> {
            unreachable!("pickers never page")
        }

        async fn fetch_all(&self) -> FetchResult<Vec<Product>> {
            Err(FetchError::Network("timed out".into()))
        }
    }

    fn product(name: &str, stock: i64) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            price_cents: 1000,
            stock,
            supplier_id: None,
        }
    }

    fn product_picker(source: FixedProducts) -> PickerList<FixedProducts> {
        PickerList::with_eligibility(
            "products",
            source,
            Arc::new(NoOpSink),
            |p| &p.name,
            Product::is_sellable,
        )
    }

    #[tokio::test]
    async fn test_open_loads_and_gates_out_of_stock() {
        let picker = product_picker(FixedProducts(vec![
            product("Caneta", 5),
            product("Caderno", 0),
            product("Borracha", 2),
        ]));
        picker.open().await;

        let snapshot = picker.snapshot().await;
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
        let names: Vec<_> = snapshot.visible.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Caneta", "Borracha"]);
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive_substring() {
        let picker = product_picker(FixedProducts(vec![
            product("Caneta Azul", 5),
            product("Caneta Preta", 5),
            product("Borracha", 2),
        ]));
        picker.open().await;

        picker.set_filter("CANETA").await;
        let snapshot = picker.snapshot().await;
        assert_eq!(snapshot.visible.len(), 2);

        picker.set_filter("preta").await;
        let snapshot = picker.snapshot().await;
        assert_eq!(snapshot.visible.len(), 1);
        assert_eq!(snapshot.visible[0].name, "Caneta Preta");

        // Blank filter shows every eligible candidate again.
        picker.set_filter("  ").await;
        assert_eq!(picker.snapshot().await.visible.len(), 3);
    }

    #[tokio::test]
    async fn test_open_failure_sets_error_and_clears_items() {
        let picker = PickerList::new(
            "customers",
            FailingSource,
            Arc::new(NoOpSink),
            |p: &Product| &p.name,
        );
        picker.open().await;

        let snapshot = picker.snapshot().await;
        assert!(snapshot.visible.is_empty());
        assert_eq!(snapshot.error, Some(FetchError::Network("timed out".into())));
    }

    #[tokio::test]
    async fn test_reopen_resets_filter() {
        let picker = product_picker(FixedProducts(vec![product("Caneta", 5)]));
        picker.open().await;
        picker.set_filter("xyz").await;
        assert!(picker.snapshot().await.visible.is_empty());

        picker.open().await;
        let snapshot = picker.snapshot().await;
        assert_eq!(snapshot.filter, "");
        assert_eq!(snapshot.visible.len(), 1);
    }
}
