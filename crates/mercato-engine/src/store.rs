//! # List Engine
//!
//! The per-screen list store: owns one `ListState`, one `Query`, one
//! debounce timer and one remote source, and exposes the engine-to-view
//! contract (snapshot reads + trigger actions).
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ListEngine Control Flow                          │
//! │                                                                         │
//! │  Trigger                         Call                                   │
//! │  ───────                         ────                                   │
//! │  debounced query commit   ────►  load(page 0, committed, reset)         │
//! │  screen focus / mount     ────►  load(page 0, committed, reset)         │
//! │  pull-to-refresh          ────►  load(page 0, committed, reset)         │
//! │  scroll near end          ────►  load(page+1, committed, append)        │
//! │  explicit search submit   ────►  load(page 0, raw,       reset)         │
//! │  create/update/remove ok  ────►  load(page 0, committed, reset)         │
//! │  manual retry             ────►  load(page 0, committed, reset)         │
//! │                                                                         │
//! │  load() admission/staleness is delegated to ListState (mercato-core):   │
//! │  admit → fetch → apply-if-current → finish-if-current.                  │
//! │                                                                         │
//! │  CONCURRENCY: single logical flow per list. The state mutex is held     │
//! │  only across pure transitions, never across the network await. A        │
//! │  superseded fetch resolves into a generation mismatch and is            │
//! │  discarded; the network call itself is never aborted.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use mercato_client::RemoteListSource;
use mercato_core::{ListSnapshot, ListState, PageRequest, Query, Sort};

use crate::config::EngineConfig;
use crate::debounce::SearchDebouncer;
use crate::diag::DiagnosticsSink;

// =============================================================================
// Load Kind
// =============================================================================

/// What a load does to the current items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    /// Discard previous results and fetch page 0.
    Reset,

    /// Append the page after the most recently applied one.
    NextPage,
}

// =============================================================================
// Engine Inner
// =============================================================================

/// Shared state behind one list engine handle.
struct EngineInner<S: RemoteListSource> {
    /// Entity label for logs and diagnostics ("customers", "sales", ...)
    entity: &'static str,

    /// The backend endpoint for this entity
    source: S,

    /// Deterministic server-side sort for this list
    sort: Sort,

    /// Records per page
    page_size: u32,

    /// Whether this list has a search box. The sales list does not; its
    /// loads never carry a filter and keystrokes are ignored.
    searchable: bool,

    /// The canonical list state. Async mutex: load() re-locks it after the
    /// network await to apply the outcome.
    state: AsyncMutex<ListState<S::Item>>,

    /// Raw/committed search query
    query: std::sync::Mutex<Query>,

    /// Quiet-interval timer for search keystrokes
    debounce: SearchDebouncer,

    /// Failure observer
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl<S> EngineInner<S>
where
    S: RemoteListSource + 'static,
    S::Item: Send,
{
    fn query_mut(&self) -> std::sync::MutexGuard<'_, Query> {
        match self.query.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// One admission-guarded fetch.
    ///
    /// The admission decision, the page index and the request parameters
    /// are computed under a single lock so a continuation can never target
    /// a page computed from state another load has since replaced.
    async fn load(&self, kind: LoadKind, query_text: String) {
        let (ticket, request) = {
            let mut state = self.state.lock().await;
            let (is_reset, page_index) = match kind {
                LoadKind::Reset => (true, 0),
                LoadKind::NextPage => (false, state.page_index() + 1),
            };

            let Some(ticket) = state.admit(is_reset) else {
                debug!(entity = self.entity, "load dropped by admission guard");
                return;
            };

            let filter = self.searchable.then_some(query_text.as_str());
            let request = PageRequest::new(page_index, self.page_size, self.sort.clone(), filter);
            (ticket, request)
        };

        debug!(
            entity = self.entity,
            page = request.page_index,
            reset = ticket.is_reset,
            generation = ticket.generation,
            query = request.filter_text.as_deref().unwrap_or(""),
            "loading page"
        );

        // Suspension point: the state lock is NOT held here.
        let result = self.source.fetch_page(&request).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(page) => {
                if state.apply_success(&ticket, page) {
                    debug!(
                        entity = self.entity,
                        total = state.items().len(),
                        has_more = state.has_more(),
                        "page applied"
                    );
                } else {
                    debug!(
                        entity = self.entity,
                        generation = ticket.generation,
                        "superseded response discarded"
                    );
                }
            }
            Err(error) => {
                warn!(entity = self.entity, %error, "fetch failed");
                self.diagnostics.fetch_failed(self.entity, &error);
                if error.is_unauthorized() {
                    self.diagnostics.session_expired();
                }
                if !state.apply_failure(&ticket, error) {
                    debug!(
                        entity = self.entity,
                        generation = ticket.generation,
                        "superseded failure discarded"
                    );
                }
            }
        }
        state.finish(&ticket);
    }

    /// Debounce timer fired: commit the raw input and reload if it changed.
    async fn commit_from_debounce(&self) {
        let committed = {
            let mut query = self.query_mut();
            query.commit_if_changed().then(|| query.committed.clone())
        };

        if let Some(text) = committed {
            debug!(entity = self.entity, query = %text, "debounced query committed");
            self.load(LoadKind::Reset, text).await;
        }
    }
}

// =============================================================================
// List Engine
// =============================================================================

/// One list engine instance per screen/entity binding.
///
/// Cloning produces another handle to the same list; all handles share the
/// same state, query and debounce timer. Dropping the last handle aborts
/// the pending debounce timer; an in-flight fetch is left to resolve and
/// its result is discarded by the generation check.
pub struct ListEngine<S: RemoteListSource> {
    inner: Arc<EngineInner<S>>,
}

impl<S: RemoteListSource> Clone for ListEngine<S> {
    fn clone(&self) -> Self {
        ListEngine {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> ListEngine<S>
where
    S: RemoteListSource + 'static,
    S::Item: Send,
{
    /// Creates a searchable list engine.
    pub fn new(
        entity: &'static str,
        source: S,
        sort: Sort,
        config: &EngineConfig,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self::build(entity, source, sort, config, diagnostics, true)
    }

    /// Creates a list engine without text search (the sales history).
    pub fn without_search(
        entity: &'static str,
        source: S,
        sort: Sort,
        config: &EngineConfig,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self::build(entity, source, sort, config, diagnostics, false)
    }

    fn build(
        entity: &'static str,
        source: S,
        sort: Sort,
        config: &EngineConfig,
        diagnostics: Arc<dyn DiagnosticsSink>,
        searchable: bool,
    ) -> Self {
        ListEngine {
            inner: Arc::new(EngineInner {
                entity,
                source,
                sort,
                page_size: config.page_size,
                searchable,
                state: AsyncMutex::new(ListState::new()),
                query: std::sync::Mutex::new(Query::default()),
                debounce: SearchDebouncer::new(config.debounce()),
                diagnostics,
            }),
        }
    }

    // =========================================================================
    // Reads (engine-to-view contract)
    // =========================================================================

    /// Current renderable state.
    pub async fn snapshot(&self) -> ListSnapshot<S::Item>
    where
        S::Item: Clone,
    {
        self.inner.state.lock().await.snapshot()
    }

    /// Current search query (raw + committed), for echoing in the view.
    pub fn query(&self) -> Query {
        self.inner.query_mut().clone()
    }

    // =========================================================================
    // Actions (engine-to-view contract)
    // =========================================================================

    /// Records a search keystroke and restarts the debounce timer.
    ///
    /// Non-searchable lists ignore keystrokes entirely.
    ///
    /// The scheduled commit holds only a weak reference: dropping the last
    /// engine handle destroys the debouncer (aborting the timer), and even
    /// a timer racing that teardown finds nothing to upgrade, so a
    /// disposed list can never fetch.
    pub fn set_raw_input(&self, text: impl Into<String>) {
        if !self.inner.searchable {
            return;
        }

        self.inner.query_mut().set_raw_input(text);

        let inner = Arc::downgrade(&self.inner);
        self.inner.debounce.schedule(async move {
            if let Some(inner) = inner.upgrade() {
                inner.commit_from_debounce().await;
            }
        });
    }

    /// Explicit search submit (enter key): cancels the debounce timer,
    /// commits the raw input and reloads immediately. The committed value
    /// is synchronized so a later timer fire cannot duplicate this fetch.
    pub async fn submit(&self) {
        self.inner.debounce.cancel();
        let text = self.inner.query_mut().submit();
        self.inner.load(LoadKind::Reset, text).await;
    }

    /// Reset load with the committed query. Used on first mount, on screen
    /// focus, and for the pull-to-refresh gesture.
    pub async fn refresh(&self) {
        let text = self.inner.query_mut().committed.clone();
        self.inner.load(LoadKind::Reset, text).await;
    }

    /// Continuation load for infinite scroll. A no-op while a fetch is in
    /// flight or when the last page has been reached.
    pub async fn load_more(&self) {
        let text = self.inner.query_mut().committed.clone();
        self.inner.load(LoadKind::NextPage, text).await;
    }

    /// Manual retry after a blocking error: same as a refresh. The error
    /// cleared on admission, so the retry affordance disappears at once.
    pub async fn retry(&self) {
        self.refresh().await;
    }

    /// Dismisses the transient (footer) error indicator.
    pub async fn dismiss_error(&self) {
        self.inner.state.lock().await.dismiss_transient_error();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use crate::diag::NoOpSink;
    use mercato_core::{FetchError, FetchResult, PageResponse};

    // =========================================================================
    // Scripted source
    // =========================================================================

    /// One scripted answer for a fetch_page call.
    enum Step {
        /// Resolve immediately.
        Ready(FetchResult<PageResponse<u32>>),
        /// Park until the test releases the gate.
        Gated(oneshot::Receiver<FetchResult<PageResponse<u32>>>),
    }

    #[derive(Default)]
    struct ScriptInner {
        requests: std::sync::Mutex<Vec<PageRequest>>,
        script: std::sync::Mutex<VecDeque<Step>>,
    }

    /// In-memory source driven by a test-provided script.
    #[derive(Clone, Default)]
    struct ScriptedSource(Arc<ScriptInner>);

    impl ScriptedSource {
        fn push_ready(&self, result: FetchResult<PageResponse<u32>>) {
            self.0.script.lock().unwrap().push_back(Step::Ready(result));
        }

        /// Queues a parked response and returns the release handle.
        fn push_gated(&self) -> oneshot::Sender<FetchResult<PageResponse<u32>>> {
            let (tx, rx) = oneshot::channel();
            self.0.script.lock().unwrap().push_back(Step::Gated(rx));
            tx
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.0.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteListSource for ScriptedSource {
        type Item = u32;

        async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<u32>> {
            self.0.requests.lock().unwrap().push(request.clone());
            let step = self
                .0
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetch_page called with empty script");
            match step {
                Step::Ready(result) => result,
                Step::Gated(rx) => rx.await.expect("test dropped the gate"),
            }
        }

        async fn fetch_all(&self) -> FetchResult<Vec<u32>> {
            unreachable!("paginated tests never fetch_all")
        }
    }

    fn page(values: std::ops::Range<u32>, index: u32, last: bool) -> PageResponse<u32> {
        PageResponse {
            content: values.collect(),
            page_index: index,
            is_last_page: last,
        }
    }

    fn engine(source: ScriptedSource) -> ListEngine<ScriptedSource> {
        ListEngine::new(
            "customers",
            source,
            Sort::asc("name"),
            &EngineConfig::default(),
            Arc::new(NoOpSink),
        )
    }

    /// Lets spawned debounce/load tasks run to completion under paused time.
    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    #[tokio::test]
    async fn test_first_page_then_load_more() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..10, 0, false)));
        source.push_ready(Ok(page(10..15, 1, true)));

        let list = engine(source.clone());

        // Mount: exactly one reset fetch.
        list.refresh().await;
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items.len(), 10);
        assert!(snapshot.has_more);
        assert_eq!(snapshot.page_index, 0);

        list.load_more().await;
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items, (0..15).collect::<Vec<_>>());
        assert!(!snapshot.has_more);
        assert_eq!(snapshot.page_index, 1);

        // Exhausted: further load_more calls hit the network zero times.
        list.load_more().await;
        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].page_index, 0);
        assert_eq!(requests[1].page_index, 1);
        assert_eq!(requests[1].page_size, 10);
        assert_eq!(requests[1].sort.to_param(), "name,asc");
    }

    #[tokio::test]
    async fn test_refresh_replaces_items() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..10, 0, false)));
        source.push_ready(Ok(page(10..20, 1, false)));
        source.push_ready(Ok(page(50..55, 0, true)));

        let list = engine(source.clone());
        list.refresh().await;
        list.load_more().await;
        assert_eq!(list.snapshot().await.items.len(), 20);

        // Pull-to-refresh: full replace, back to page 0.
        list.refresh().await;
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items, (50..55).collect::<Vec<_>>());
        assert_eq!(snapshot.page_index, 0);
        assert!(!snapshot.has_more);
    }

    // =========================================================================
    // Debounced search
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_fetches_once() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..3, 0, true)));

        let list = engine(source.clone());

        // "a", "an", "ana" at 300ms intervals with an 800ms quiet window.
        for text in ["a", "an", "ana"] {
            list.set_raw_input(text);
            tokio::time::advance(Duration::from_millis(300)).await;
        }
        assert!(source.requests().is_empty());

        tokio::time::advance(Duration::from_millis(800)).await;
        settle().await;

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].filter_text.as_deref(), Some("ana"));
        assert_eq!(requests[0].page_index, 0);
        assert_eq!(list.query().committed, "ana");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_bypasses_debounce_without_duplicate() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..3, 0, true)));

        let list = engine(source.clone());
        list.set_raw_input("ana");

        // Enter pressed before the timer fires.
        list.submit().await;
        assert_eq!(source.requests().len(), 1);

        // Where the timer would have fired: no second fetch for "ana".
        tokio::time::advance(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_committed_query_skips_fetch() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..3, 0, true)));

        let list = engine(source.clone());
        list.set_raw_input("ana");
        list.submit().await;

        // Typing the same text again commits nothing new.
        list.set_raw_input("ana");
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_debounce() {
        let source = ScriptedSource::default();
        let list = engine(source.clone());

        // Keystroke arms the timer, then the screen unmounts and the view
        // drops its only handle before the quiet window elapses.
        list.set_raw_input("ana");
        drop(list);

        tokio::time::advance(Duration::from_millis(2000)).await;
        settle().await;

        // The disposed list must not fetch.
        assert!(source.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsearchable_list_ignores_keystrokes() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..5, 0, true)));

        let list = ListEngine::without_search(
            "sales",
            source.clone(),
            Sort::desc("soldAt"),
            &EngineConfig::default(),
            Arc::new(NoOpSink),
        );

        list.set_raw_input("ignored");
        tokio::time::advance(Duration::from_millis(2000)).await;
        settle().await;
        assert!(source.requests().is_empty());

        list.refresh().await;
        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].filter_text, None);
        assert_eq!(requests[0].sort.to_param(), "soldAt,desc");
    }

    // =========================================================================
    // Failures
    // =========================================================================

    #[tokio::test]
    async fn test_reset_failure_then_load_more_is_noop() {
        let source = ScriptedSource::default();
        source.push_ready(Err(FetchError::Network("connection refused".into())));

        let list = engine(source.clone());
        list.refresh().await;

        let snapshot = list.snapshot().await;
        assert!(snapshot.items.is_empty());
        assert!(snapshot.error.is_some());
        assert!(!snapshot.has_more);

        list.load_more().await;
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_continuation_failure_keeps_items() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..10, 0, false)));
        source.push_ready(Err(FetchError::Server {
            message: "boom".into(),
        }));

        let list = engine(source.clone());
        list.refresh().await;
        list.load_more().await;

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items.len(), 10);
        assert!(snapshot.has_more);
        assert!(snapshot.error.is_none());
        assert!(snapshot.transient_error.is_some());

        list.dismiss_error().await;
        assert!(list.snapshot().await.transient_error.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_routed_to_session_observer() {
        struct CountingSink {
            expired: AtomicUsize,
            fetch_failures: AtomicUsize,
        }
        impl DiagnosticsSink for CountingSink {
            fn fetch_failed(&self, _entity: &str, _error: &FetchError) {
                self.fetch_failures.fetch_add(1, Ordering::SeqCst);
            }
            fn write_failed(&self, _entity: &str, _error: &FetchError) {}
            fn session_expired(&self) {
                self.expired.fetch_add(1, Ordering::SeqCst);
            }
        }

        let sink = Arc::new(CountingSink {
            expired: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
        });

        let source = ScriptedSource::default();
        source.push_ready(Err(FetchError::Unauthorized));

        let list = ListEngine::new(
            "customers",
            source,
            Sort::asc("name"),
            &EngineConfig::default(),
            sink.clone(),
        );
        list.refresh().await;

        // The session observer hears about it; the list error state does not.
        assert_eq!(sink.expired.load(Ordering::SeqCst), 1);
        assert_eq!(sink.fetch_failures.load(Ordering::SeqCst), 1);
        assert!(list.snapshot().await.error.is_none());
    }

    // =========================================================================
    // Races
    // =========================================================================

    #[tokio::test]
    async fn test_concurrent_load_more_fetches_once() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..10, 0, false)));
        let gate = source.push_gated();

        let list = engine(source.clone());
        list.refresh().await;

        // First load_more parks on the gate.
        let parked = {
            let list = list.clone();
            tokio::spawn(async move { list.load_more().await })
        };
        tokio::task::yield_now().await;

        // N further attempts while in flight: all dropped.
        list.load_more().await;
        list.load_more().await;
        assert_eq!(source.requests().len(), 2);

        gate.send(Ok(page(10..15, 1, true))).unwrap();
        parked.await.unwrap();
        assert_eq!(list.snapshot().await.items.len(), 15);
    }

    #[tokio::test]
    async fn test_reset_supersedes_inflight_continuation() {
        let source = ScriptedSource::default();
        source.push_ready(Ok(page(0..10, 0, false)));
        let gate = source.push_gated();
        source.push_ready(Ok(page(90..91, 0, true)));

        let list = engine(source.clone());
        list.refresh().await;

        // Continuation parks on the gate...
        let parked = {
            let list = list.clone();
            tokio::spawn(async move { list.load_more().await })
        };
        tokio::task::yield_now().await;

        // ...and a new search commits meanwhile: the reset proceeds
        // immediately, bypassing the in-flight continuation guard.
        list.set_raw_input("zoe");
        list.submit().await;

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items, vec![90]);

        // The superseded continuation resolves afterwards: discarded,
        // items stay as the reset left them.
        gate.send(Ok(page(10..20, 1, false))).unwrap();
        parked.await.unwrap();

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items, vec![90]);
        assert!(!snapshot.has_more);
        assert_eq!(snapshot.page_index, 0);

        // And the stale finish did not clear the newer load's bookkeeping:
        // the list is idle and a fresh load_more is correctly a no-op
        // (exhausted), not a deadlock.
        list.load_more().await;
        assert_eq!(source.requests().len(), 3);
    }
}
