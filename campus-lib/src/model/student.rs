//! Student records.

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use crate::table::CellValue;
use crate::table::Column;

/// Reference from a student to their school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub school: Option<SchoolRef>,
}

impl Student {
    /// Columns of the Students table.
    pub fn columns() -> Vec<Column<Student>> {
        vec![
            Column::Select,
            Column::RowNumber,
            Column::field("name", "Full name", |s: &Student| CellValue::text(&s.name)),
            Column::field("email", "Email", |s: &Student| CellValue::text(&s.email)),
            Column::field("phoneNumber", "Phone", |s: &Student| {
                CellValue::text(&s.phone_number)
            }),
            Column::field("school", "School", |s: &Student| {
                CellValue::opt_text(s.school.as_ref().map(|school| school.name.as_str()))
            }),
            Column::Actions,
        ]
    }
}

impl Row for Student {
    fn id(&self) -> &str {
        &self.id
    }
}
