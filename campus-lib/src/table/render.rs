//! Headless text rendering of a table snapshot.

use super::Column;
use super::HeaderCheckbox;
use super::TableSnapshot;
use crate::model::Row;

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Renders the header row.
///
/// The select column shows the tri-state page checkbox; a sorted column
/// gets a `^` (ascending) or `v` (descending) marker.
pub fn render_header<T: Row>(columns: &[Column<T>], snapshot: &TableSnapshot<T>) -> Vec<String> {
    columns
        .iter()
        .map(|column| match column {
            Column::Select => match snapshot.header_checkbox() {
                HeaderCheckbox::Checked => "[x]".to_string(),
                HeaderCheckbox::Indeterminate => "[-]".to_string(),
                HeaderCheckbox::Unchecked => "[ ]".to_string(),
            },
            Column::Field { id, header, .. } => match &snapshot.query.sort {
                Some(order) if order.key == *id => {
                    format!("{} {}", header, order.direction.marker())
                }
                _ => header.to_string(),
            },
            other => other.header().to_string(),
        })
        .collect()
}

/// Renders the visible rows in display order.
pub fn render_rows<T: Row>(columns: &[Column<T>], snapshot: &TableSnapshot<T>) -> Vec<Vec<String>> {
    snapshot
        .visible_rows()
        .map(|(index, row)| {
            columns
                .iter()
                .map(|column| match column {
                    Column::Select => checkbox(snapshot.selection.contains(row.id())).to_string(),
                    Column::RowNumber => snapshot.row_number(index).to_string(),
                    Column::Field { value, .. } => value(row).to_string(),
                    Column::Actions => row.id().to_string(),
                })
                .collect()
        })
        .collect()
}

/// Lays out a header and rows as left-aligned, space-padded lines.
pub fn format_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i].saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(header);
    for row in rows {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}
