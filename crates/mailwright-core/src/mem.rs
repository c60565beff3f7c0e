//! In-memory table implementation.
//!
//! Mirrors the parts of a DOM table that the width model cares about. Used by
//! the native test suite and by anything that wants to run the width model
//! without a browser.

use crate::style::InlineStyle;
use crate::table::{RESIZE_DISABLED_ATTR, TableMarkup};

/// Position of a cell within a [`MemTable`]: markup row, then source index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId {
    pub row: usize,
    pub index: usize,
}

/// A markup cell held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemCell {
    pub text: String,
    pub header: bool,
    pub col_span: u32,
    pub row_span: u32,
    pub style: InlineStyle,
}

impl MemCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            header: false,
            col_span: 1,
            row_span: 1,
            style: InlineStyle::new(),
        }
    }

    pub fn header(mut self) -> Self {
        self.header = true;
        self
    }

    pub fn colspan(mut self, span: u32) -> Self {
        self.col_span = span;
        self
    }

    pub fn rowspan(mut self, span: u32) -> Self {
        self.row_span = span;
        self
    }

    /// Give the cell an inline width, e.g. `"40%"`.
    pub fn width(mut self, width: &str) -> Self {
        self.style.set("width", width);
        self
    }
}

/// A table held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemTable {
    rows: Vec<Vec<MemCell>>,
    pub style: InlineStyle,
    resize_disabled: bool,
}

impl MemTable {
    pub fn new(rows: Vec<Vec<MemCell>>) -> Self {
        Self {
            rows,
            style: InlineStyle::new(),
            resize_disabled: false,
        }
    }

    /// Table with `rows` x `cols` plain cells and no widths.
    pub fn uniform(rows: usize, cols: usize) -> Self {
        Self::new(
            (0..rows)
                .map(|r| (0..cols).map(|c| MemCell::new(format!("{r},{c}"))).collect())
                .collect(),
        )
    }

    pub fn cell(&self, id: CellId) -> &MemCell {
        &self.rows[id.row][id.index]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut MemCell {
        &mut self.rows[id.row][id.index]
    }

    /// Widths of the cells in one row, as written.
    pub fn row_widths(&self, row: usize) -> Vec<Option<&str>> {
        self.rows[row]
            .iter()
            .map(|cell| cell.style.get("width"))
            .collect()
    }

    /// Serialize back to HTML. Cell text is written as-is.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table");
        if self.resize_disabled {
            html.push(' ');
            html.push_str(RESIZE_DISABLED_ATTR);
        }
        if !self.style.is_empty() {
            html.push_str(&format!(" style=\"{}\"", self.style));
        }
        html.push('>');
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                let tag = if cell.header { "th" } else { "td" };
                html.push('<');
                html.push_str(tag);
                if cell.col_span != 1 {
                    html.push_str(&format!(" colspan=\"{}\"", cell.col_span));
                }
                if cell.row_span != 1 {
                    html.push_str(&format!(" rowspan=\"{}\"", cell.row_span));
                }
                if !cell.style.is_empty() {
                    html.push_str(&format!(" style=\"{}\"", cell.style));
                }
                html.push('>');
                html.push_str(&cell.text);
                html.push_str(&format!("</{tag}>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }
}

impl TableMarkup for MemTable {
    type Cell = CellId;

    fn rows(&self) -> Vec<Vec<CellId>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| (0..cells.len()).map(|index| CellId { row, index }).collect())
            .collect()
    }

    fn col_span(&self, cell: &CellId) -> u32 {
        self.cell(*cell).col_span
    }

    fn row_span(&self, cell: &CellId) -> u32 {
        self.cell(*cell).row_span
    }

    fn cell_width(&self, cell: &CellId) -> Option<String> {
        self.cell(*cell).style.get("width").map(str::to_owned)
    }

    fn set_cell_width(&mut self, cell: &CellId, width: &str) {
        self.cell_mut(*cell).style.set("width", width);
    }

    fn set_fixed_layout(&mut self) {
        self.style.set("table-layout", "fixed");
        self.style.set("width", "100%");
    }

    fn set_resize_disabled(&mut self, disabled: bool) {
        self.resize_disabled = disabled;
    }

    fn is_resize_disabled(&self) -> bool {
        self.resize_disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html() {
        let mut table = MemTable::new(vec![
            vec![MemCell::new("A").header().colspan(2)],
            vec![MemCell::new("B").width("25%"), MemCell::new("C")],
        ]);
        table.set_fixed_layout();
        assert_eq!(
            table.to_html(),
            "<table style=\"table-layout: fixed; width: 100%;\">\
             <tr><th colspan=\"2\">A</th></tr>\
             <tr><td style=\"width: 25%;\">B</td><td>C</td></tr></table>"
        );
    }

    #[test]
    fn test_resize_marker() {
        let mut table = MemTable::new(Vec::new());
        table.set_resize_disabled(true);
        assert!(table.is_resize_disabled());
        assert_eq!(table.to_html(), "<table data-resize-disabled></table>");
    }
}
