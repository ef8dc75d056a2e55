//! Column descriptors.
//!
//! A table is described by a plain list of [`Column`]s. Field columns carry
//! an accessor that yields a [`CellValue`], which is used both for display
//! and for the client-side sort of the fetched page.

use std::cmp::Ordering;
use std::fmt;

/// The value a field column shows for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// A numeric value, sorted numerically.
    Number(f64),
    /// No value.
    Empty,
}

impl CellValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a numeric value.
    pub fn number(value: impl Into<f64>) -> Self {
        Self::Number(value.into())
    }

    /// Creates a text value, or [`CellValue::Empty`] for `None`.
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(text) => Self::Text(text.to_string()),
            None => Self::Empty,
        }
    }

    /// Compares two cells for sorting.
    ///
    /// Empty cells sort first, numbers before text, text case-insensitively
    /// with the raw text as tie-breaker.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Empty, _) => Ordering::Less,
            (_, Self::Empty) => Ordering::Greater,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Empty => Ok(()),
        }
    }
}

/// One column of an entity table.
pub enum Column<T> {
    /// Row checkbox, with the tri-state "select page" checkbox as header.
    Select,
    /// Ordinal number of the row across pages.
    RowNumber,
    /// A data field.
    Field {
        /// Column id, also the sort key.
        id: &'static str,
        /// Header text.
        header: &'static str,
        /// Accessor producing the cell value.
        value: fn(&T) -> CellValue,
        /// Whether header clicks sort the page by this column.
        sortable: bool,
    },
    /// Per-row view/edit/delete actions.
    Actions,
}

impl<T> Column<T> {
    /// Creates a sortable field column.
    pub fn field(id: &'static str, header: &'static str, value: fn(&T) -> CellValue) -> Self {
        Self::Field {
            id,
            header,
            value,
            sortable: true,
        }
    }

    /// Marks a field column as not sortable.
    pub fn unsortable(self) -> Self {
        match self {
            Self::Field {
                id, header, value, ..
            } => Self::Field {
                id,
                header,
                value,
                sortable: false,
            },
            other => other,
        }
    }

    /// Returns the column id.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::RowNumber => "row_number",
            Self::Field { id, .. } => *id,
            Self::Actions => "action",
        }
    }

    /// Returns the static header text.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Select | Self::Actions => "",
            Self::RowNumber => "#",
            Self::Field { header, .. } => *header,
        }
    }

    /// Returns `true` if the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        matches!(self, Self::Field { sortable: true, .. })
    }

    /// Returns the cell value for a field column.
    pub fn value(&self, row: &T) -> Option<CellValue> {
        match self {
            Self::Field { value, .. } => Some(value(row)),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id())
            .field("sortable", &self.is_sortable())
            .finish()
    }
}

/// Finds a column by id.
pub fn find_column<'a, T>(columns: &'a [Column<T>], id: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|column| column.id() == id)
}

/// Returns the visible order of `rows` under a single-column sort.
///
/// The sort is stable and only reorders the given page. Unknown or
/// unsortable keys leave the server order untouched.
pub fn sorted_order<T>(
    columns: &[Column<T>],
    rows: &[T],
    sort: Option<&crate::model::SortOrder>,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(sort) = sort else { return order };
    let Some(column) = find_column(columns, &sort.key).filter(|c| c.is_sortable()) else {
        return order;
    };

    let keys: Vec<CellValue> = rows
        .iter()
        .map(|row| column.value(row).unwrap_or(CellValue::Empty))
        .collect();

    order.sort_by(|&a, &b| {
        let ordering = keys[a].compare(&keys[b]);
        match sort.direction {
            crate::model::Direction::Asc => ordering,
            crate::model::Direction::Desc => ordering.reverse(),
        }
    });
    order
}
