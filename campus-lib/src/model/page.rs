//! Page types for paginated list results.

use serde::Deserialize;
use serde::Serialize;

/// Pagination information returned with every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page the server returned.
    pub current_page: u32,
    /// Number of pages available for the query.
    pub total_page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Total rows matching the query.
    pub total_data: u32,
}

impl PageMeta {
    /// Creates page metadata from explicit values.
    pub fn new(current_page: u32, total_page: u32, per_page: u32, total_data: u32) -> Self {
        Self {
            current_page,
            total_page,
            per_page,
            total_data,
        }
    }

    /// Derives page metadata from a total row count.
    pub fn from_total(current_page: u32, per_page: u32, total_data: u32) -> Self {
        let per_page = per_page.max(1);
        Self {
            current_page,
            total_page: total_data.div_ceil(per_page),
            per_page,
            total_data,
        }
    }

    /// Returns the 1-based ordinal of the row at `index` within this page.
    pub fn ordinal(&self, index: usize) -> u64 {
        let offset = u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page);
        offset + index as u64 + 1
    }

    /// Returns `true` if there is a page after the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_page
    }

    /// Returns `true` if there is a page before the current one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<T> {
    rows: Vec<T>,
    meta: PageMeta,
}

impl<T> PageData<T> {
    /// Creates a page from rows and metadata.
    pub fn new(rows: Vec<T>, meta: PageMeta) -> Self {
        Self { rows, meta }
    }

    /// Returns the rows in server order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns the pagination metadata.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
