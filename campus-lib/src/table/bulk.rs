//! Bulk and single-row deletion.
//!
//! The coordinator drains the selection of a [`ListController`] through a
//! [`DeleteFetcher`], reports through a [`Notifier`] and refreshes the list
//! after anything was deleted. One busy flag guards every path so a second
//! click while a deletion is outstanding is ignored.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use log::info;
use log::warn;

use super::BulkMode;
use super::DeleteFetcher;
use super::ListController;
use super::Notifier;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Row;

/// One row that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    /// Row id.
    pub id: String,
    /// Reason reported by the collaborator.
    pub message: String,
}

/// Result of a delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Nothing was selected (or no delete was pending).
    Empty,
    /// Another deletion is still outstanding.
    Busy,
    /// Multi-row deletion is not available in [`BulkMode::SingleOnly`].
    Unsupported {
        /// Number of selected rows.
        count: usize,
    },
    /// Every requested row was deleted.
    Deleted {
        /// Deleted ids.
        ids: Vec<String>,
    },
    /// Some rows were deleted and some failed.
    Partial {
        /// Deleted ids.
        deleted: Vec<String>,
        /// Individual failures.
        failures: Vec<DeleteFailure>,
    },
    /// No row was deleted.
    Failed {
        /// Individual failures.
        failures: Vec<DeleteFailure>,
    },
}

/// Sequences deletions for one entity table.
#[derive(Clone)]
pub struct BulkActionCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    deleter: Arc<dyn DeleteFetcher>,
    notifier: Arc<dyn Notifier>,
    mode: BulkMode,
    label: String,
    busy: AtomicBool,
    pending: Mutex<Option<String>>,
}

/// Clears the busy flag when the deletion finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BulkActionCoordinator {
    /// Creates a coordinator in [`BulkMode::SingleOnly`].
    pub fn new(deleter: Arc<dyn DeleteFetcher>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_mode(deleter, notifier, BulkMode::default())
    }

    /// Creates a coordinator with an explicit bulk mode.
    pub fn with_mode(
        deleter: Arc<dyn DeleteFetcher>,
        notifier: Arc<dyn Notifier>,
        mode: BulkMode,
    ) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                deleter,
                notifier,
                mode,
                label: "record".to_string(),
                busy: AtomicBool::new(false),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Sets the resource label used in notifications.
    ///
    /// Must be called before the coordinator is cloned.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.label = label.into();
        }
        self
    }

    /// Returns the bulk mode.
    pub fn mode(&self) -> BulkMode {
        self.inner.mode
    }

    /// Returns `true` while a deletion is outstanding.
    pub fn is_busy(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    /// Deletes the rows selected in `controller`.
    ///
    /// - no selection: nothing happens
    /// - one row: delete it; on success notify, drop it from the selection
    ///   and refresh; on failure notify and keep the selection for a retry
    /// - more rows in [`BulkMode::SingleOnly`]: one warning, nothing deleted
    /// - more rows in [`BulkMode::Sequential`]: delete one by one, report
    ///   every failure, refresh if anything was deleted, and drop the
    ///   deleted rows from the selection
    ///
    /// Rows checked while the deletion runs stay selected.
    pub async fn delete_selected<T: Row>(&self, controller: &ListController<T>) -> BulkOutcome {
        let ids = controller.selection().to_vec();
        if ids.is_empty() {
            return BulkOutcome::Empty;
        }
        let Some(_guard) = self.try_begin() else {
            return BulkOutcome::Busy;
        };
        if ids.len() > 1 && self.inner.mode == BulkMode::SingleOnly {
            warn!("{}: bulk delete of {} rows is not supported", self.inner.label, ids.len());
            self.inner
                .notifier
                .notify_warning("Deleting multiple rows is not supported yet");
            return BulkOutcome::Unsupported { count: ids.len() };
        }

        let mut deleted = Vec::new();
        let mut failures = Vec::new();
        for id in ids {
            match self.delete_one(&id).await {
                Ok(()) => deleted.push(id),
                Err(message) => {
                    self.inner.notifier.notify_error(&format!(
                        "Failed to delete {} {}: {}",
                        self.inner.label, id, message
                    ));
                    failures.push(DeleteFailure { id, message });
                }
            }
        }

        if !deleted.is_empty() {
            self.inner.notifier.notify_success(&self.success_message(deleted.len()));
        }

        if deleted.is_empty() {
            return BulkOutcome::Failed { failures };
        }
        controller.retain_selection(|id| !deleted.iter().any(|d| d == id));
        controller.refresh();
        if failures.is_empty() {
            BulkOutcome::Deleted { ids: deleted }
        } else {
            BulkOutcome::Partial { deleted, failures }
        }
    }

    /// Opens the delete confirmation for one row.
    pub fn request_delete(&self, id: impl Into<String>) {
        *self.pending_slot() = Some(id.into());
    }

    /// Closes the delete confirmation without deleting.
    pub fn cancel_delete(&self) {
        self.pending_slot().take();
    }

    /// Returns the id awaiting confirmation, if the dialog is open.
    pub fn pending_delete(&self) -> Option<String> {
        self.pending_slot().clone()
    }

    /// Confirms the pending single-row delete.
    ///
    /// The dialog is closed whatever the result. The selection is not
    /// touched.
    pub async fn confirm_delete<T: Row>(&self, controller: &ListController<T>) -> BulkOutcome {
        let Some(_guard) = self.try_begin() else {
            return BulkOutcome::Busy;
        };
        let Some(id) = self.pending_slot().take() else {
            return BulkOutcome::Empty;
        };

        match self.delete_one(&id).await {
            Ok(()) => {
                self.inner.notifier.notify_success(&self.success_message(1));
                controller.refresh();
                BulkOutcome::Deleted { ids: vec![id] }
            }
            Err(message) => {
                self.inner.notifier.notify_error(&format!(
                    "Failed to delete {} {}: {}",
                    self.inner.label, id, message
                ));
                BulkOutcome::Failed {
                    failures: vec![DeleteFailure { id, message }],
                }
            }
        }
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.inner
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.inner.busy))
    }

    async fn delete_one(&self, id: &str) -> Result<(), String> {
        let result = match self.inner.deleter.delete_one(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::from(ApiError::Rejected {
                message: "server reported no success".to_string(),
            })),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                info!("{}: deleted {}", self.inner.label, id);
                Ok(())
            }
            Err(err) => {
                warn!("{}: delete of {} failed: {}", self.inner.label, id, err);
                Err(err.to_string())
            }
        }
    }

    fn success_message(&self, count: usize) -> String {
        if count == 1 {
            format!("Deleted {} data", self.inner.label)
        } else {
            format!("Deleted {} {} records", count, self.inner.label)
        }
    }

    fn pending_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
