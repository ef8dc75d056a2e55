//! Game score records.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Row;
use crate::table::CellValue;
use crate::table::Column;

/// Points a student earned in one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub student: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub point: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Score {
    /// Columns of the Scores table.
    pub fn columns() -> Vec<Column<Score>> {
        vec![
            Column::Select,
            Column::RowNumber,
            Column::field("student", "Player", |s: &Score| CellValue::text(&s.student)),
            Column::field("game", "Game", |s: &Score| CellValue::text(&s.game)),
            Column::field("point", "Points", |s: &Score| CellValue::number(s.point as f64)),
            Column::field("createdAt", "Played at", |s: &Score| {
                CellValue::opt_text(
                    s.created_at
                        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                        .as_deref(),
                )
            }),
        ]
    }
}

impl Row for Score {
    fn id(&self) -> &str {
        &self.id
    }
}
