//! Table reader over one parsed HTML document
//!
//! Locates the table lazily on first use, remembers it together with its
//! headings, and hands out fresh row cursors over it.

use scraper::Html;
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::{infer_headings, locate, Cell, RowCursor, Table, TableRequest};

/// Reads rows and headings of one table from an HTML document.
#[derive(Debug)]
pub struct TableReader {
    document: Html,
    request: TableRequest,
    table: Option<Table>,
    headings: Option<Vec<Cell>>,
}

impl TableReader {
    pub fn new(document: Html, request: TableRequest) -> Self {
        Self {
            document,
            request,
            table: None,
            headings: None,
        }
    }

    pub fn parse(html: &str, request: TableRequest) -> Self {
        Self::new(Html::parse_document(html), request)
    }

    /// Reader that picks the best table of the document.
    pub fn from_html(html: &str) -> Self {
        Self::parse(html, TableRequest::default())
    }

    pub fn with_selector(html: &str, selector: &str) -> Self {
        Self::parse(html, TableRequest::selector(selector))
    }

    pub fn with_selector_index(html: &str, selector: &str, index: usize) -> Self {
        Self::parse(html, TableRequest::selector_index(selector, index))
    }

    pub fn request(&self) -> &TableRequest {
        &self.request
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Mutable access to the document. A table that is already located keeps
    /// being served until [`refresh`](Self::refresh).
    pub fn document_mut(&mut self) -> &mut Html {
        &mut self.document
    }

    /// Cursor over every row of the table, header row included.
    pub fn iter(&mut self) -> Result<RowCursor<'_>> {
        let filter = self.request.cells;
        Ok(self.load()?.cursor().with_filter(filter))
    }

    /// The table's headings, explicit or synthesized.
    pub fn headings(&mut self) -> Result<&[Cell]> {
        self.load()?;
        self.headings.as_deref().ok_or(Error::NoTableFound)
    }

    /// Cell texts of every row.
    pub fn rows(&mut self) -> Result<Vec<Vec<String>>> {
        Ok(self
            .iter()?
            .map(|row| row.into_iter().map(|cell| cell.text.clone()).collect())
            .collect())
    }

    /// Forget the located table and its headings.
    pub fn refresh(&mut self) {
        debug!("discarding cached table");
        self.table = None;
        self.headings = None;
    }

    /// Release the document and the located table.
    pub fn close(self) {}

    fn load(&mut self) -> Result<&Table> {
        if self.table.is_none() || self.headings.is_none() {
            let table = match self.table.take() {
                Some(table) => table,
                None => locate(&self.document, &self.request)?,
            };
            self.headings = Some(infer_headings(&table));
            self.table = Some(table);
        }

        self.table.as_ref().ok_or(Error::NoTableFound)
    }
}
