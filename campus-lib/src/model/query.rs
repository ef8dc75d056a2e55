//! List query intent.

use super::SortOrder;

/// Default number of rows per page.
pub const DEFAULT_LIMIT: u32 = 10;

/// The list request a table currently wants.
///
/// `page` is 1-based. Changing `search` or `limit` resets `page` to 1.
/// `sort` is applied client-side and is never sent to the server.
///
/// # Example
///
/// ```
/// use campus_lib::model::ListQuery;
///
/// let query = ListQuery::default().with_page(3).with_search("smk");
/// assert_eq!(query.page, 1);
/// assert_eq!(query.search, "smk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Effective (debounced) search text.
    pub search: String,
    /// 1-based page index.
    pub page: u32,
    /// Page size, always positive.
    pub limit: u32,
    /// Client-side sort of the fetched page.
    pub sort: Option<SortOrder>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl ListQuery {
    /// Creates a first-page query with empty search.
    pub fn new(limit: u32) -> Self {
        Self {
            search: String::new(),
            page: 1,
            limit: limit.max(1),
            sort: None,
        }
    }

    /// Sets the search text and resets to the first page.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }

    /// Sets the page, clamped to at least 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size and resets to the first page.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self.page = 1;
        self
    }

    /// Returns the sorted column id, if any.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort.as_ref().map(|order| order.key.as_str())
    }
}
