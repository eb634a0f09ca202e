//! Row cursor over a resolved table

use std::slice;

use super::{Cell, CellFilter, Row};
use crate::error::{Error, Result};

/// Forward-only view over a table's rows.
///
/// Creating a cursor is free: it borrows the row list resolved when the table
/// was located. To rewind, ask the table for a new one.
#[derive(Debug, Clone)]
pub struct RowCursor<'a> {
    rows: slice::Iter<'a, Row>,
    filter: CellFilter,
}

impl<'a> RowCursor<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self {
            rows: rows.iter(),
            filter: CellFilter::Any,
        }
    }

    /// Cells yielded by the `Iterator` impl.
    pub fn with_filter(mut self, filter: CellFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn has_next(&self) -> bool {
        !self.rows.as_slice().is_empty()
    }

    /// Advance one row and return its cells matching `filter`.
    pub fn next_row(&mut self, filter: CellFilter) -> Result<Vec<&'a Cell>> {
        self.rows
            .next()
            .map(|row| row.cells(filter))
            .ok_or(Error::EndOfSequence)
    }

    /// Rows cannot be removed through a cursor.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation("can't remove rows from a table"))
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = Vec<&'a Cell>;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.next_row(filter).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for RowCursor<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use scraper::{Html, Selector};

    fn table(html: &str) -> Table {
        let document = Html::parse_document(html);
        let selector = Selector::parse("table").unwrap();
        Table::from_element(document.select(&selector).next().unwrap())
    }

    fn texts(cells: Vec<&Cell>) -> Vec<&str> {
        cells.into_iter().map(|c| c.text.as_str()).collect()
    }

    const THREE_ROWS: &str = r#"
        <table>
            <tr><th>h</th></tr>
            <tr><td>one</td></tr>
            <tr><td>two</td></tr>
        </table>
    "#;

    #[test]
    fn test_has_next_is_idempotent() {
        let table = table(THREE_ROWS);
        let mut cursor = table.cursor();

        assert!(cursor.has_next());
        assert!(cursor.has_next());
        assert_eq!(texts(cursor.next_row(CellFilter::Any).unwrap()), ["h"]);

        // next without has_next
        assert_eq!(texts(cursor.next_row(CellFilter::Any).unwrap()), ["one"]);
        assert!(cursor.has_next());
        assert_eq!(texts(cursor.next_row(CellFilter::Any).unwrap()), ["two"]);
        assert!(!cursor.has_next());
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_exhausted_cursor_stays_exhausted() {
        let table = table(THREE_ROWS);
        let mut cursor = table.cursor();
        assert_eq!(cursor.by_ref().count(), 3);

        assert!(matches!(
            cursor.next_row(CellFilter::Any),
            Err(Error::EndOfSequence)
        ));
        assert!(cursor.next().is_none());
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_filter_per_row() {
        let table = table("<table><tr><th>k</th><td>v</td></tr></table>");

        let mut cursor = table.cursor();
        assert_eq!(texts(cursor.next_row(CellFilter::Header).unwrap()), ["k"]);

        let mut cursor = table.cursor().with_filter(CellFilter::Data);
        assert_eq!(texts(cursor.next().unwrap()), ["v"]);
    }

    #[test]
    fn test_fresh_cursors_are_independent() {
        let table = table(THREE_ROWS);
        let mut first = table.cursor();
        first.next();
        first.next();

        let second = table.cursor();
        assert_eq!(second.len(), 3);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_remove_is_unsupported() {
        let table = table(THREE_ROWS);
        let mut cursor = table.cursor();

        assert!(matches!(
            cursor.remove(),
            Err(Error::UnsupportedOperation(_))
        ));
        assert_eq!(cursor.len(), 3);
    }
}
