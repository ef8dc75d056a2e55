//! Remote list controller
//!
//! Owns the state of one paginated, searchable, sortable, selectable resource
//! list and reduces responses of an injected [`ListFetcher`] into it.
//!
//! # Example
//!
//! ```ignore
//! use campus_lib::model::School;
//! use campus_lib::table::ListController;
//!
//! let schools = ListController::builder(client.resource::<School>(Resource::SCHOOL))
//!     .columns(School::columns())
//!     .label("school")
//!     .build();
//!
//! schools.load();
//! schools.set_search_text("negeri");
//! let snapshot = schools.settled().await;
//! println!("{} rows", snapshot.rows().len());
//! ```

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use log::debug;
use log::warn;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::Column;
use super::FetchState;
use super::ListFetcher;
use super::Notifier;
use super::SelectionModel;
use super::SelectionPolicy;
use super::TableConfig;
use super::TableSnapshot;
use super::column::find_column;
use super::column::sorted_order;
use super::state::DEFAULT_PLACEHOLDER_ROWS;
use crate::error::Error;
use crate::error::FetchFailure;
use crate::error::TableError;
use crate::model::ListQuery;
use crate::model::PageData;
use crate::model::PageMeta;
use crate::model::Row;
use crate::model::SortOrder;

/// Controller for one remote entity table.
///
/// Cheap to clone; clones share state. Every operation is synchronous and
/// returns immediately; list requests and the search debounce run as Tokio
/// tasks, so the controller must be used from within a Tokio runtime.
///
/// Responses are applied in issuance order: each request carries a sequence
/// number and only the response to the latest request may change state.
/// Superseded responses are dropped on arrival.
pub struct ListController<T: Row> {
    inner: Arc<ControllerInner<T>>,
}

impl<T: Row> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<T: Row> {
    fetcher: Arc<dyn ListFetcher<T>>,
    columns: Vec<Column<T>>,
    config: TableConfig,
    label: String,
    notifier: Option<Arc<dyn Notifier>>,
    state: Mutex<ControllerState<T>>,
    snapshot: watch::Sender<TableSnapshot<T>>,
    shutdown: CancellationToken,
}

impl<T: Row> ControllerInner<T> {
    fn lock(&self) -> MutexGuard<'_, ControllerState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Row> Drop for ControllerInner<T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct ControllerState<T> {
    query: ListQuery,
    search_input: String,
    debounce: Option<CancellationToken>,
    seq: u64,
    fetch: FetchState<T>,
    page_meta: Option<PageMeta>,
    selection: SelectionModel,
    last_row_count: Option<usize>,
}

impl<T: Row> ListController<T> {
    /// Creates a builder around the list collaborator.
    pub fn builder(fetcher: Arc<dyn ListFetcher<T>>) -> ListControllerBuilder<T> {
        ListControllerBuilder::new(fetcher)
    }

    /// Issues the first list request.
    pub fn load(&self) {
        let mut state = self.inner.lock();
        self.issue_fetch(&mut state);
    }

    /// Re-issues the current query unconditionally.
    ///
    /// Used after mutations and as the retry affordance of the error state.
    pub fn refresh(&self) {
        let mut state = self.inner.lock();
        self.issue_fetch(&mut state);
    }

    /// Updates the search box text.
    ///
    /// The text is echoed immediately in [`TableSnapshot::search_input`], but
    /// only becomes part of the query once no further keystroke arrived for
    /// the configured debounce window. Settling resets the page to 1; settling
    /// on the text already in effect issues nothing.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let token = {
            let mut state = self.inner.lock();
            state.search_input = text.into();
            if let Some(previous) = state.debounce.take() {
                previous.cancel();
            }
            let token = self.inner.shutdown.child_token();
            state.debounce = Some(token.clone());
            self.publish(&state);
            token
        };

        let weak = Arc::downgrade(&self.inner);
        let delay = self.inner.config.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            if let Some(inner) = weak.upgrade() {
                ListController { inner }.commit_search(&token);
            }
        });
    }

    /// Moves to page `page`.
    ///
    /// Pages outside `[1, totalPage]` are rejected once the total is known;
    /// the query stays unchanged and nothing is requested.
    pub fn set_page(&self, page: u32) -> Result<(), TableError> {
        let mut state = self.inner.lock();
        let total = state.page_meta.map(|meta| meta.total_page.max(1));
        if page < 1 || total.is_some_and(|total| page > total) {
            warn!("{}: rejected page {} (total {:?})", self.inner.label, page, total);
            return Err(TableError::PageOutOfRange {
                requested: page,
                total: total.unwrap_or(0),
            });
        }
        state.query.page = page;
        self.issue_fetch(&mut state);
        Ok(())
    }

    /// Moves to the first page.
    pub fn first_page(&self) -> Result<(), TableError> {
        self.set_page(1)
    }

    /// Moves to the previous page.
    pub fn previous_page(&self) -> Result<(), TableError> {
        let current = self.inner.lock().query.page;
        self.set_page(current.saturating_sub(1))
    }

    /// Moves to the next page.
    pub fn next_page(&self) -> Result<(), TableError> {
        let current = self.inner.lock().query.page;
        self.set_page(current.saturating_add(1))
    }

    /// Moves to the last known page.
    ///
    /// Without page metadata this re-requests the current page.
    pub fn last_page(&self) -> Result<(), TableError> {
        let target = {
            let state = self.inner.lock();
            state
                .page_meta
                .map(|meta| meta.total_page.max(1))
                .unwrap_or(state.query.page)
        };
        self.set_page(target)
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&self, limit: u32) -> Result<(), TableError> {
        if limit == 0 {
            return Err(TableError::InvalidPageSize(limit));
        }
        let mut state = self.inner.lock();
        state.query.limit = limit;
        state.query.page = 1;
        self.issue_fetch(&mut state);
        Ok(())
    }

    /// Header click on column `key`.
    ///
    /// Cycles none -> ascending -> descending -> none; a different column
    /// replaces the current sort. The sort reorders the fetched page only and
    /// never issues a request, so ordering is page-local.
    pub fn set_sort(&self, key: &str) -> Result<(), TableError> {
        let column = find_column(&self.inner.columns, key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
        if !column.is_sortable() {
            return Err(TableError::NotSortable(key.to_string()));
        }
        let mut state = self.inner.lock();
        state.query.sort = SortOrder::cycle(state.query.sort.as_ref(), key);
        self.publish(&state);
        Ok(())
    }

    /// Flips selection of one row.
    pub fn toggle_row(&self, id: &str) {
        let mut state = self.inner.lock();
        state.selection.toggle(id);
        self.publish(&state);
    }

    /// Header checkbox click: selects the whole visible page, or deselects
    /// it if it was already fully selected.
    pub fn toggle_all(&self) {
        let mut guard = self.inner.lock();
        let state = &mut *guard;
        let ids: Vec<String> = state
            .fetch
            .page()
            .map(|page| page.rows().iter().map(|row| row.id().to_string()).collect())
            .unwrap_or_default();
        state.selection.toggle_all(ids.iter().map(String::as_str));
        self.publish(state);
    }

    /// Clears the selection ("select none").
    pub fn clear_selection(&self) {
        let mut state = self.inner.lock();
        state.selection.clear();
        self.publish(&state);
    }

    /// Narrows the selection to ids for which `keep` returns `true`.
    pub(crate) fn retain_selection(&self, keep: impl FnMut(&str) -> bool) {
        let mut state = self.inner.lock();
        state.selection.retain(keep);
        self.publish(&state);
    }

    /// Returns a copy of the current selection.
    pub fn selection(&self) -> SelectionModel {
        self.inner.lock().selection.clone()
    }

    /// Returns the current query.
    pub fn query(&self) -> ListQuery {
        self.inner.lock().query.clone()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> TableSnapshot<T> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<TableSnapshot<T>> {
        self.inner.snapshot.subscribe()
    }

    /// Waits until the latest request has completed and returns the snapshot.
    ///
    /// Returns the current snapshot as soon as the controller is shut down,
    /// since a cancelled request never completes.
    pub async fn settled(&self) -> TableSnapshot<T> {
        let mut rx = self.subscribe();
        tokio::select! {
            _ = self.inner.shutdown.cancelled() => self.snapshot(),
            settled = rx.wait_for(|snapshot| {
                matches!(snapshot.fetch, FetchState::Loaded(_) | FetchState::Failed(_))
            }) => settled
                .map(|snapshot| snapshot.clone())
                .unwrap_or_else(|_| self.snapshot()),
        }
    }

    /// Returns the column descriptors.
    pub fn columns(&self) -> &[Column<T>] {
        &self.inner.columns
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.inner.config
    }

    /// Returns the resource label used in notifications.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Tears the controller down.
    ///
    /// Cancels the debounce timer and stops applying in-flight responses.
    /// Dropping the last handle has the same effect.
    pub fn shutdown(&self) {
        debug!("{}: shutting down", self.inner.label);
        self.inner.shutdown.cancel();
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) was called.
    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    fn commit_search(&self, token: &CancellationToken) {
        let mut state = self.inner.lock();
        if token.is_cancelled() {
            return;
        }
        state.debounce = None;
        if state.search_input == state.query.search {
            debug!("{}: search settled unchanged", self.inner.label);
            return;
        }
        debug!("{}: search settled on {:?}", self.inner.label, state.search_input);
        state.query.search = state.search_input.clone();
        state.query.page = 1;
        self.issue_fetch(&mut state);
    }

    fn issue_fetch(&self, state: &mut ControllerState<T>) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        state.seq += 1;
        let seq = state.seq;
        let query = state.query.clone();
        if let Some(page) = state.fetch.page() {
            state.last_row_count = Some(page.len());
        }
        state.fetch = FetchState::Loading;
        if self.inner.config.selection_policy == SelectionPolicy::ClearOnRefetch {
            state.selection.clear();
        }
        debug!(
            "{}: request #{} (search={:?}, page={}, limit={})",
            self.inner.label, seq, query.search, query.page, query.limit
        );
        self.publish(state);

        let fetcher = Arc::clone(&self.inner.fetcher);
        let weak = Arc::downgrade(&self.inner);
        let cancel = self.inner.shutdown.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = fetcher.list(&query) => result,
            };
            if let Some(inner) = weak.upgrade() {
                ListController { inner }.apply_response(seq, result);
            }
        });
    }

    fn apply_response(&self, seq: u64, result: Result<PageData<T>, Error>) {
        let mut state = self.inner.lock();
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        if seq != state.seq {
            debug!(
                "{}: discarding stale response #{} (latest #{})",
                self.inner.label, seq, state.seq
            );
            return;
        }

        let notification = match result {
            Ok(page) => {
                let meta = *page.meta();
                state.page_meta = Some(meta);
                state.last_row_count = Some(page.len());
                let last = meta.total_page.max(1);
                if state.query.page > last {
                    debug!(
                        "{}: page {} beyond last page {}, clamping",
                        self.inner.label, state.query.page, last
                    );
                    state.query.page = last;
                    state.fetch = FetchState::Loaded(page);
                    self.issue_fetch(&mut state);
                    return;
                }
                state.fetch = FetchState::Loaded(page);
                None
            }
            Err(err) => {
                warn!("{}: request #{} failed: {}", self.inner.label, seq, err);
                state.fetch = FetchState::Failed(FetchFailure::from(&err));
                state.page_meta = None;
                state.last_row_count = None;
                Some(format!("Failed to load {} data", self.inner.label))
            }
        };
        self.publish(&state);
        drop(state);

        if let (Some(message), Some(notifier)) = (notification, &self.inner.notifier) {
            notifier.notify_error(&message);
        }
    }

    fn publish(&self, state: &ControllerState<T>) {
        let order = match state.fetch.page() {
            Some(page) => sorted_order(&self.inner.columns, page.rows(), state.query.sort.as_ref()),
            None => Vec::new(),
        };
        let placeholder_rows = state
            .last_row_count
            .filter(|&count| count > 0)
            .unwrap_or(DEFAULT_PLACEHOLDER_ROWS);
        self.inner.snapshot.send_replace(TableSnapshot {
            query: state.query.clone(),
            search_input: state.search_input.clone(),
            fetch: state.fetch.clone(),
            page_meta: state.page_meta,
            selection: state.selection.clone(),
            request_seq: state.seq,
            order,
            placeholder_rows,
        });
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for a [`ListController`].
pub struct ListControllerBuilder<T: Row> {
    fetcher: Arc<dyn ListFetcher<T>>,
    columns: Vec<Column<T>>,
    config: TableConfig,
    label: String,
    notifier: Option<Arc<dyn Notifier>>,
    query: Option<ListQuery>,
}

impl<T: Row> ListControllerBuilder<T> {
    fn new(fetcher: Arc<dyn ListFetcher<T>>) -> Self {
        Self {
            fetcher,
            columns: Vec::new(),
            config: TableConfig::default(),
            label: "record".to_string(),
            notifier: None,
            query: None,
        }
    }

    /// Sets the column descriptors (needed for sorting and rendering).
    pub fn columns(mut self, columns: Vec<Column<T>>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the table configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the resource label used in log lines and notifications.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the notifier told about failed list requests.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Sets the initial query.
    ///
    /// Defaults to an empty search on page 1 with the configured page size.
    pub fn query(mut self, query: ListQuery) -> Self {
        self.query = Some(query);
        self
    }

    /// Builds the controller in the `Idle` state.
    pub fn build(self) -> ListController<T> {
        let query = self
            .query
            .unwrap_or_else(|| ListQuery::new(self.config.page_size));
        let initial = TableSnapshot {
            query: query.clone(),
            search_input: query.search.clone(),
            ..TableSnapshot::default()
        };
        let (snapshot, _) = watch::channel(initial);

        ListController {
            inner: Arc::new(ControllerInner {
                fetcher: self.fetcher,
                columns: self.columns,
                config: self.config,
                label: self.label,
                notifier: self.notifier,
                state: Mutex::new(ControllerState {
                    search_input: query.search.clone(),
                    query,
                    debounce: None,
                    seq: 0,
                    fetch: FetchState::Idle,
                    page_meta: None,
                    selection: SelectionModel::default(),
                    last_row_count: None,
                }),
                snapshot,
                shutdown: CancellationToken::new(),
            }),
        }
    }
}
