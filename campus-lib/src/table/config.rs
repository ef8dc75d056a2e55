//! Table configuration

use std::time::Duration;

/// What happens to the row selection when a new list request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Keep selected ids across page, search and size changes.
    #[default]
    Preserve,
    /// Clear the selection every time a list request is issued.
    ClearOnRefetch,
}

/// How the bulk action bar deletes more than one selected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkMode {
    /// Only single-row deletion; larger selections get a warning.
    #[default]
    SingleOnly,
    /// Delete selected rows one by one and report each failure.
    Sequential,
}

/// Configuration for a [`ListController`](super::ListController).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use campus_lib::table::{SelectionPolicy, TableConfig};
///
/// let config = TableConfig::default()
///     .with_debounce(Duration::from_millis(300))
///     .with_page_size(20)
///     .with_selection_policy(SelectionPolicy::ClearOnRefetch);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Quiet period after the last search keystroke.
    ///
    /// Default: 500 ms
    pub debounce: Duration,

    /// Initial page size.
    ///
    /// Default: 10
    pub page_size: u32,

    /// Page sizes offered by the size selector.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<u32>,

    /// Selection behavior on refetch.
    ///
    /// Default: [`SelectionPolicy::Preserve`]
    pub selection_policy: SelectionPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
            selection_policy: SelectionPolicy::Preserve,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the page sizes offered by the size selector.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<u32>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Sets the selection policy.
    pub fn with_selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }
}
