//! Observable table state.

use crate::error::FetchFailure;
use crate::model::ListQuery;
use crate::model::PageData;
use crate::model::PageMeta;
use crate::model::Row;

use super::HeaderCheckbox;
use super::SelectionModel;

/// Placeholder rows shown while the very first page loads.
pub const DEFAULT_PLACEHOLDER_ROWS: usize = 5;

/// Lifecycle of the list request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// The latest request succeeded.
    Loaded(PageData<T>),
    /// The latest request failed; previous rows are discarded.
    Failed(FetchFailure),
}

impl<T> FetchState<T> {
    /// Returns `true` while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` if the latest request failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the loaded page, if any.
    pub fn page(&self) -> Option<&PageData<T>> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Navigation state of the pager below a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current page, 1 when unknown.
    pub current: u32,
    /// Total pages, 1 when unknown.
    pub total: u32,
    /// Total rows, 0 when unknown.
    pub total_data: u32,
    /// "First" and "Previous" are enabled.
    pub can_go_back: bool,
    /// "Next" and "Last" are enabled.
    pub can_go_forward: bool,
}

impl Pager {
    /// Builds the pager from known page metadata.
    pub fn new(meta: Option<&PageMeta>, loading: bool) -> Self {
        match meta {
            Some(meta) => Self {
                current: meta.current_page,
                total: meta.total_page,
                total_data: meta.total_data,
                can_go_back: !loading && meta.current_page > 1,
                can_go_forward: !loading && meta.current_page < meta.total_page,
            },
            None => Self {
                current: 1,
                total: 1,
                total_data: 0,
                can_go_back: false,
                can_go_forward: false,
            },
        }
    }

    /// Returns the `current/total` badge text.
    pub fn label(&self) -> String {
        format!("{}/{}", self.current, self.total)
    }
}

/// A consistent, cloneable view of one table for the render layer.
#[derive(Debug, Clone)]
pub struct TableSnapshot<T> {
    /// The effective query of the latest request.
    pub query: ListQuery,
    /// Text currently in the search box (may not be settled yet).
    pub search_input: String,
    /// Request lifecycle.
    pub fetch: FetchState<T>,
    /// Last known page metadata; kept while a new page loads.
    pub page_meta: Option<PageMeta>,
    /// Selected row ids.
    pub selection: SelectionModel,
    /// Sequence number of the latest issued request.
    pub request_seq: u64,
    pub(crate) order: Vec<usize>,
    pub(crate) placeholder_rows: usize,
}

impl<T> Default for TableSnapshot<T> {
    fn default() -> Self {
        Self {
            query: ListQuery::default(),
            search_input: String::new(),
            fetch: FetchState::Idle,
            page_meta: None,
            selection: SelectionModel::default(),
            request_seq: 0,
            order: Vec::new(),
            placeholder_rows: DEFAULT_PLACEHOLDER_ROWS,
        }
    }
}

impl<T: Row> TableSnapshot<T> {
    /// Returns `true` while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    /// Returns the fetched rows in server order.
    pub fn rows(&self) -> &[T] {
        self.fetch.page().map(PageData::rows).unwrap_or(&[])
    }

    /// Iterates the rows in display order, with their server index.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &T)> {
        let rows = self.rows();
        self.order
            .iter()
            .filter_map(move |&index| rows.get(index).map(|row| (index, row)))
    }

    /// Returns the ids of the visible page in display order.
    pub fn page_ids(&self) -> Vec<&str> {
        self.visible_rows().map(|(_, row)| row.id()).collect()
    }

    /// Returns the ordinal shown in the `#` column for a server index.
    pub fn row_number(&self, index: usize) -> u64 {
        match &self.page_meta {
            Some(meta) => meta.ordinal(index),
            None => index as u64 + 1,
        }
    }

    /// Returns the header checkbox state for the visible page.
    pub fn header_checkbox(&self) -> HeaderCheckbox {
        self.selection.header_state(self.rows().iter().map(Row::id))
    }

    /// Returns the visible rows that are selected.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.visible_rows()
            .map(|(_, row)| row)
            .filter(|row| self.selection.contains(row.id()))
            .collect()
    }

    /// Returns the number of selected rows.
    pub fn selection_count(&self) -> usize {
        self.selection.count()
    }

    /// Returns `true` if the bulk action bar should be shown.
    pub fn bulk_bar_visible(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Returns the pager state.
    pub fn pager(&self) -> Pager {
        Pager::new(self.page_meta.as_ref(), self.is_loading())
    }

    /// Returns how many placeholder rows to draw while loading.
    pub fn placeholder_rows(&self) -> usize {
        self.placeholder_rows
    }

    /// Returns `true` if the table should show its "no data" row.
    pub fn is_empty_result(&self) -> bool {
        matches!(self.fetch, FetchState::Loaded(ref page) if page.is_empty())
            || self.fetch.is_failed()
    }

    /// Returns `true` if a retry affordance should be offered.
    pub fn can_retry(&self) -> bool {
        self.fetch.is_failed()
    }
}
