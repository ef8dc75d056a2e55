//! School records.

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use crate::table::CellValue;
use crate::table::Column;

/// An uploaded image attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Public link to the file.
    #[serde(default)]
    pub file_link: Option<String>,
}

/// A school as listed on the Schools screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub admins_count: u32,
    #[serde(default)]
    pub students_count: u32,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl School {
    /// Columns of the Schools table.
    pub fn columns() -> Vec<Column<School>> {
        vec![
            Column::Select,
            Column::RowNumber,
            Column::field("name", "Name", |s: &School| CellValue::text(&s.name)),
            Column::field("adminsCount", "Admins", |s: &School| {
                CellValue::number(s.admins_count)
            }),
            Column::field("studentsCount", "Students", |s: &School| {
                CellValue::number(s.students_count)
            }),
            Column::field("address", "Address", |s: &School| CellValue::text(&s.address)),
            Column::Actions,
        ]
    }

    /// Returns the first uploaded image, or a generated initials avatar.
    pub fn avatar_url(&self) -> String {
        self.images
            .iter()
            .find_map(|image| image.file_link.clone())
            .unwrap_or_else(|| {
                format!(
                    "https://ui-avatars.com/api/?name={}&background=6d5Acd&color=fff",
                    self.name.split_whitespace().collect::<Vec<_>>().join("+")
                )
            })
    }
}

impl Row for School {
    fn id(&self) -> &str {
        &self.id
    }
}
