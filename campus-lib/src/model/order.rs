//! Sort ordering types.

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the short marker used in rendered headers.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Asc => "^",
            Self::Desc => "v",
        }
    }
}

/// A single-column sort.
///
/// Only one column is sorted at a time; see
/// [`ListController::set_sort`](crate::table::ListController::set_sort).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// Column id.
    pub key: String,
    /// Direction.
    pub direction: Direction,
}

impl SortOrder {
    /// Creates an ascending order on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending order on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Advances the three-state sort cycle for a header click on `key`.
    ///
    /// none -> ascending -> descending -> none. Clicking a different column
    /// starts that column at ascending and drops the previous one.
    pub fn cycle(current: Option<&SortOrder>, key: &str) -> Option<SortOrder> {
        match current {
            Some(order) if order.key == key => match order.direction {
                Direction::Asc => Some(SortOrder::desc(key)),
                Direction::Desc => None,
            },
            _ => Some(SortOrder::asc(key)),
        }
    }
}
