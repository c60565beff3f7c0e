//! Test fixtures: build [`MemTable`]s from HTML snippets.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::mem::{MemCell, MemTable};
use crate::style::InlineStyle;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

fn span_attr(cell: &ElementRef<'_>, name: &str) -> u32 {
    cell.value()
        .attr(name)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(1)
}

fn to_mem_table(table: ElementRef<'_>) -> MemTable {
    let rows = table
        .select(&TR_SELECTOR)
        .map(|row| {
            row.select(&CELL_SELECTOR)
                .map(|cell| MemCell {
                    text: cell.text().collect::<String>().trim().to_owned(),
                    header: cell.value().name() == "th",
                    col_span: span_attr(&cell, "colspan"),
                    row_span: span_attr(&cell, "rowspan"),
                    style: InlineStyle::parse(cell.value().attr("style").unwrap_or_default()),
                })
                .collect()
        })
        .collect();
    MemTable::new(rows)
}

/// Every table in an HTML fragment, in document order.
pub fn parse_tables(html: &str) -> Vec<MemTable> {
    let fragment = Html::parse_fragment(html);
    fragment.select(&TABLE_SELECTOR).map(to_mem_table).collect()
}

/// The first table in an HTML fragment.
pub fn parse_table(html: &str) -> MemTable {
    parse_tables(html)
        .into_iter()
        .next()
        .expect("fixture has no <table>")
}
