//! Table controller error types

/// Local rejections of table operations.
///
/// These never involve the network: the controller refuses the input and
/// leaves its query untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Requested page lies outside `[1, total]`.
    #[error("Page {requested} is out of range (1..={total})")]
    PageOutOfRange {
        /// The page the caller asked for.
        requested: u32,
        /// The last page known from the server.
        total: u32,
    },

    /// Page size must be positive.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(u32),

    /// No column with this id exists.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but cannot be sorted.
    #[error("Column is not sortable: {0}")]
    NotSortable(String),
}
