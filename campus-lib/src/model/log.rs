//! Activity log records.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Row;
use crate::table::CellValue;
use crate::table::Column;

/// One audited dashboard action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LogEntry {
    /// Columns of the Activity table.
    pub fn columns() -> Vec<Column<LogEntry>> {
        vec![
            Column::Select,
            Column::RowNumber,
            Column::field("action", "Action", |l: &LogEntry| CellValue::text(&l.action)),
            Column::field("user", "User", |l: &LogEntry| CellValue::text(&l.user)),
            Column::field("createdAt", "Time", |l: &LogEntry| {
                CellValue::opt_text(l.created_at.map(|at| at.to_rfc3339()).as_deref())
            }),
        ]
    }
}

impl Row for LogEntry {
    fn id(&self) -> &str {
        &self.id
    }
}
