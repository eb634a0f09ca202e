//! Table model and the pieces that build it
//!
//! A located `<table>` is resolved once into a [`Table`]: the ordered list of
//! its `<tr>` rows, each holding owned `<th>`/`<td>` cells. Cursors and header
//! inference work on that list and never go back to the document.

mod cursor;
mod headings;
mod locator;

pub use cursor::*;
pub use headings::*;
pub use locator::*;

use std::collections::BTreeMap;

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Which table to read from a document, and how to read its cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    /// CSS selector for the table; absent or empty means "pick the best table"
    #[serde(default)]
    pub selector: Option<String>,
    /// Position among the selector's matches
    #[serde(default)]
    pub index: Option<usize>,
    /// Cells returned per row when iterating
    #[serde(default)]
    pub cells: CellFilter,
}

impl TableRequest {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    pub fn selector_index(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: Some(selector.into()),
            index: Some(index),
            ..Self::default()
        }
    }

    /// The selector, with an empty string treated as absent.
    pub fn effective_selector(&self) -> Option<&str> {
        self.selector.as_deref().filter(|s| !s.is_empty())
    }
}

/// Header (`th`) or data (`td`) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Header,
    Data,
}

impl CellKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "th" => Some(CellKind::Header),
            "td" => Some(CellKind::Data),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            CellKind::Header => "th",
            CellKind::Data => "td",
        }
    }
}

/// Subset of cells to take from a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFilter {
    Header,
    Data,
    #[default]
    Any,
}

impl CellFilter {
    pub fn matches(self, kind: CellKind) -> bool {
        match self {
            CellFilter::Header => kind == CellKind::Header,
            CellFilter::Data => kind == CellKind::Data,
            CellFilter::Any => true,
        }
    }
}

/// A single table cell, detached from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Text content with runs of whitespace collapsed
    pub text: String,
    /// Inner HTML
    pub html: String,
    pub attrs: BTreeMap<String, String>,
}

impl Cell {
    fn from_element(element: ElementRef<'_>, kind: CellKind) -> Self {
        let attrs = element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            kind,
            text: normalize_text(element),
            html: element.inner_html(),
            attrs,
        }
    }

    /// A header cell named `name`, carrying over `template`'s attributes.
    pub fn synthesized(name: impl Into<String>, template: &Cell) -> Self {
        let name = name.into();
        Self {
            kind: CellKind::Header,
            html: name.clone(),
            text: name,
            attrs: template.attrs.clone(),
        }
    }
}

/// One `<tr>` and its cells in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    fn from_element(row: ElementRef<'_>) -> Self {
        let cells = row
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter_map(|el| CellKind::from_tag(el.value().name()).map(|kind| (el, kind)))
            .map(|(el, kind)| Cell::from_element(el, kind))
            .collect();

        Self { cells }
    }

    pub fn cells(&self, filter: CellFilter) -> Vec<&Cell> {
        self.cells
            .iter()
            .filter(|cell| filter.matches(cell.kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A located table, resolved into its rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn from_element(table: ElementRef<'_>) -> Self {
        let rows = row_elements(table).map(Row::from_element).collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// A fresh cursor positioned at the first row.
    pub fn cursor(&self) -> RowCursor<'_> {
        RowCursor::new(&self.rows)
    }
}

/// `<tr>` elements under `table`, in document order.
fn row_elements(table: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
}

fn normalize_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_table(html: &Html) -> Table {
        let selector = Selector::parse("table").unwrap();
        Table::from_element(html.select(&selector).next().unwrap())
    }

    #[test]
    fn test_resolves_rows_and_cells() {
        let html = Html::parse_document(
            r#"
            <table>
                <thead><tr><th>Name</th><th>Price</th></tr></thead>
                <tbody>
                    <tr><td class="n">Apple</td><td>  1.50
                        EUR </td></tr>
                </tbody>
            </table>
            "#,
        );

        let table = first_table(&html);
        assert_eq!(table.rows().len(), 2);

        let data = table.rows()[1].cells(CellFilter::Any);
        assert_eq!(data[0].kind, CellKind::Data);
        assert_eq!(data[0].text, "Apple");
        assert_eq!(data[0].attrs.get("class").map(String::as_str), Some("n"));
        assert_eq!(data[1].text, "1.50 EUR");
    }

    #[test]
    fn test_row_filters() {
        let html = Html::parse_document(
            "<table><tr><th>k</th><td>v1</td><td>v2</td></tr></table>",
        );
        let table = first_table(&html);
        let row = &table.rows()[0];

        assert_eq!(row.cells(CellFilter::Header).len(), 1);
        assert_eq!(row.cells(CellFilter::Data).len(), 2);
        assert_eq!(row.cells(CellFilter::Any).len(), 3);
    }

    #[test]
    fn test_request_from_json() {
        let request: TableRequest =
            serde_json::from_str(r#"{"selector": "table.prices", "index": 1, "cells": "data"}"#)
                .unwrap();
        assert_eq!(request.effective_selector(), Some("table.prices"));
        assert_eq!(request.index, Some(1));
        assert_eq!(request.cells, CellFilter::Data);

        let request: TableRequest = serde_json::from_str(r#"{"selector": ""}"#).unwrap();
        assert_eq!(request.effective_selector(), None);
        assert_eq!(request.cells, CellFilter::Any);
    }
}
