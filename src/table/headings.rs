//! Column heading inference

use tracing::debug;

use super::{Cell, CellFilter, Table};

/// Determine the column headings of `table`.
///
/// The first row's `th` cells are the headings when there are any. Otherwise
/// one heading per `td` of the first row is synthesized, named `col0`,
/// `col1`, ... and keeping that cell's attributes. A table without rows has
/// no headings.
pub fn infer_headings(table: &Table) -> Vec<Cell> {
    let mut cursor = table.cursor();
    let Ok(headings) = cursor.next_row(CellFilter::Header) else {
        debug!("table has no rows, no headings");
        return Vec::new();
    };

    if !headings.is_empty() {
        debug!(count = headings.len(), "using header row");
        return headings.into_iter().cloned().collect();
    }

    // rewind and peek at the first row of data
    let mut cursor = table.cursor();
    let first_row = cursor.next_row(CellFilter::Data).unwrap_or_default();
    debug!(count = first_row.len(), "no header row, synthesizing headings");

    first_row
        .into_iter()
        .enumerate()
        .map(|(i, td)| Cell::synthesized(format!("col{i}"), td))
        .collect()
}
