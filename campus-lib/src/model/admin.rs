//! Dashboard administrator records.

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use crate::table::CellValue;
use crate::table::Column;

/// A user who can access the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl Admin {
    /// Columns of the Admins table.
    pub fn columns() -> Vec<Column<Admin>> {
        vec![
            Column::Select,
            Column::RowNumber,
            Column::field("name", "Name", |a: &Admin| CellValue::text(&a.name)),
            Column::field("email", "Email", |a: &Admin| CellValue::text(&a.email)),
            Column::field("role", "Role", |a: &Admin| CellValue::text(&a.role)).unsortable(),
            Column::Actions,
        ]
    }
}

impl Row for Admin {
    fn id(&self) -> &str {
        &self.id
    }
}
