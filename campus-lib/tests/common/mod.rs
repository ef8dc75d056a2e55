//! Shared test doubles for the table controller tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use campus_lib::error::ApiError;
use campus_lib::error::Error;
use campus_lib::model::ListQuery;
use campus_lib::model::PageData;
use campus_lib::model::PageMeta;
use campus_lib::model::Row;
use campus_lib::table::CellValue;
use campus_lib::table::Column;
use campus_lib::table::DeleteFetcher;
use campus_lib::table::ListFetcher;
use campus_lib::table::Notifier;
use tokio::sync::Notify;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub score: u32,
}

impl Row for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Items `item-1..=item-n`; scores are deliberately not in server order.
pub fn items(n: usize) -> Vec<Item> {
    (1..=n)
        .map(|i| Item {
            id: format!("item-{}", i),
            name: format!("Item {}", i),
            score: ((i * 7) % 10) as u32,
        })
        .collect()
}

pub fn columns() -> Vec<Column<Item>> {
    vec![
        Column::Select,
        Column::RowNumber,
        Column::field("name", "Name", |i: &Item| CellValue::text(&i.name)),
        Column::field("score", "Score", |i: &Item| CellValue::number(i.score)),
        Column::Actions,
    ]
}

/// Lets every runnable task finish before the test continues.
///
/// With a paused clock, the runtime only advances time once all tasks are
/// idle, so this never fires a debounce timer early.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

pub fn query(search: &str, page: u32, limit: u32) -> ListQuery {
    ListQuery::new(limit).with_search(search).with_page(page)
}

// =============================================================================
// In-memory backend
// =============================================================================

/// Answers list requests immediately from an in-memory table.
#[derive(Default)]
pub struct FakeBackend {
    rows: Mutex<Vec<Item>>,
    calls: Mutex<Vec<ListQuery>>,
    failing: AtomicBool,
}

impl FakeBackend {
    pub fn with_items(n: usize) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(items(n)),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<ListQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn truncate(&self, len: usize) {
        self.rows.lock().unwrap().truncate(len);
    }
}

#[async_trait]
impl ListFetcher<Item> for FakeBackend {
    async fn list(&self, query: &ListQuery) -> Result<PageData<Item>, Error> {
        self.calls.lock().unwrap().push(query.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::http(500, "internal error").into());
        }

        let needle = query.search.to_lowercase();
        let matching: Vec<Item> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let meta = PageMeta::from_total(query.page, query.limit, matching.len() as u32);
        let start = ((query.page - 1) * query.limit) as usize;
        let rows = matching
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .collect();
        Ok(PageData::new(rows, meta))
    }
}

// =============================================================================
// Gated fetcher
// =============================================================================

type Gate = oneshot::Sender<Result<PageData<Item>, Error>>;

/// Holds every list request until the test resolves it.
#[derive(Default)]
pub struct GatedFetcher {
    calls: Mutex<Vec<(ListQuery, Option<Gate>)>>,
}

impl GatedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ListQuery> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    /// Completes request number `index` (0-based, issuance order).
    pub fn resolve(&self, index: usize, result: Result<PageData<Item>, Error>) {
        let gate = self.calls.lock().unwrap()[index]
            .1
            .take()
            .expect("request already resolved");
        let _ = gate.send(result);
    }
}

#[async_trait]
impl ListFetcher<Item> for GatedFetcher {
    async fn list(&self, query: &ListQuery) -> Result<PageData<Item>, Error> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push((query.clone(), Some(tx)));
        let dropped = || {
            Err(ApiError::Rejected {
                message: "gate dropped".to_string(),
            }
            .into())
        };
        rx.await.unwrap_or_else(|_| dropped())
    }
}

/// A page of the given ids with explicit metadata.
pub fn page_of(ids: &[&str], meta: PageMeta) -> PageData<Item> {
    let rows = ids
        .iter()
        .map(|id| Item {
            id: id.to_string(),
            name: id.to_string(),
            score: 0,
        })
        .collect();
    PageData::new(rows, meta)
}

// =============================================================================
// Deleter
// =============================================================================

/// Records delete calls; ids can be made to fail or be rejected.
#[derive(Default)]
pub struct RecordingDeleter {
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    rejecting: Mutex<HashSet<String>>,
    hold: AtomicBool,
    release: Notify,
}

impl RecordingDeleter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn reject(&self, id: &str) {
        self.rejecting.lock().unwrap().insert(id.to_string());
    }

    /// Makes every delete wait until [`release`](Self::release).
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.release.notify_waiters();
    }
}

#[async_trait]
impl DeleteFetcher for RecordingDeleter {
    async fn delete_one(&self, id: &str) -> Result<bool, Error> {
        self.calls.lock().unwrap().push(id.to_string());
        if self.hold.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.failing.lock().unwrap().contains(id) {
            return Err(ApiError::http(500, "delete failed").into());
        }
        Ok(!self.rejecting.lock().unwrap().contains(id))
    }
}

// =============================================================================
// Notifier
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
}

#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((Level::Success, message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((Level::Error, message.to_string()));
    }

    fn notify_warning(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((Level::Warning, message.to_string()));
    }
}
