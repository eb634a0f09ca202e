//! Table location: explicit selector or best-table heuristic

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{row_elements, CellKind, Table, TableRequest};
use crate::error::{Error, Result};

/// Find the table described by `request` in `document`.
pub fn locate(document: &Html, request: &TableRequest) -> Result<Table> {
    let element = match request.effective_selector() {
        Some(selector) => select_table(document, selector, request.index)?,
        None => best_table(document)?,
    };

    Ok(Table::from_element(element))
}

/// Pick the table matched by `selector`, at `index` when given.
pub fn select_table<'a>(
    document: &'a Html,
    selector: &str,
    index: Option<usize>,
) -> Result<ElementRef<'a>> {
    let parsed = Selector::parse(selector).map_err(|e| Error::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;
    let matches: Vec<ElementRef<'a>> = document.select(&parsed).collect();
    debug!(selector, count = matches.len(), "selector matched");

    let element = match index {
        Some(index) => matches
            .get(index)
            .copied()
            .ok_or_else(|| Error::IndexOutOfRange {
                selector: selector.to_string(),
                index,
                count: matches.len(),
            })?,
        None => match matches.as_slice() {
            [only] => *only,
            _ => {
                return Err(Error::AmbiguousSelection {
                    selector: selector.to_string(),
                    count: matches.len(),
                })
            }
        },
    };

    let tag = element.value().name();
    if tag == "table" {
        Ok(element)
    } else {
        Err(Error::NotATable {
            selector: selector.to_string(),
            tag: tag.to_string(),
        })
    }
}

/// Pick the table with the highest rows × first-row-cells score.
///
/// Ties go to the earlier table. A table without rows scores 0, so it only
/// wins when nothing better exists.
pub fn best_table(document: &Html) -> Result<ElementRef<'_>> {
    let mut best: Option<(ElementRef<'_>, usize)> = None;

    for table in tables(document) {
        let score = score(table);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((table, score));
        }
    }

    let (table, score) = best.ok_or(Error::NoTableFound)?;
    debug!(score, "selected best table");
    Ok(table)
}

/// Rows × number of cells in the first row.
pub fn score(table: ElementRef<'_>) -> usize {
    let mut rows = row_elements(table);
    let Some(first_row) = rows.next() else {
        return 0;
    };

    let cols = first_row
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| CellKind::from_tag(el.value().name()).is_some())
        .count();

    (1 + rows.count()) * cols
}

fn tables(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "table")
}
