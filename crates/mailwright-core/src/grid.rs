//! Logical grid reconstruction for tables with merged cells.
//!
//! Markup cells can cover several logical columns (`colspan`) and rows
//! (`rowspan`). The width model works on logical columns, so every consumer
//! starts from the [`TableStructure`] computed here.

use crate::table::TableMarkup;

/// Largest `colspan` honoured, matching the HTML limit.
pub const MAX_COL_SPAN: usize = 1000;
/// Largest `rowspan` honoured, matching the HTML limit.
pub const MAX_ROW_SPAN: usize = 65534;

/// A markup cell placed on the logical grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedCell<C> {
    /// Handle back to the markup cell.
    pub cell: C,
    /// Markup row index (0-based).
    pub row: usize,
    /// First logical column covered.
    pub start_col: usize,
    pub col_span: usize,
    pub row_span: usize,
}

impl<C> PlacedCell<C> {
    /// Last logical column covered (inclusive).
    pub fn end_col(&self) -> usize {
        self.start_col + self.col_span - 1
    }
}

/// Logical layout of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableStructure<C> {
    /// Number of logical columns. Zero means the table has no cells.
    pub col_count: usize,
    /// Placed cells per markup row, in source order.
    pub grid: Vec<Vec<PlacedCell<C>>>,
}

impl<C> Default for TableStructure<C> {
    fn default() -> Self {
        Self {
            col_count: 0,
            grid: Vec::new(),
        }
    }
}

impl<C> TableStructure<C> {
    /// Iterate all placed cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &PlacedCell<C>> {
        self.grid.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.col_count == 0
    }

    pub fn row_count(&self) -> usize {
        self.grid.len()
    }
}

fn clamp_span(raw: u32, max: usize) -> usize {
    (raw as usize).clamp(1, max)
}

/// Compute the logical grid of a table.
///
/// Rows are walked top to bottom while tracking, per logical column, how many
/// rows (including the current one) are still covered by a cell from above.
/// Each cell lands on the next free column of its row. Never fails: a table
/// without cells yields `col_count == 0`.
pub fn compute_table_structure<T: TableMarkup>(table: &T) -> TableStructure<T::Cell> {
    let rows = table.rows();
    let mut occupied: Vec<usize> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());
    let mut col_count = 0;

    for (row, cells) in rows.into_iter().enumerate() {
        let mut placed = Vec::with_capacity(cells.len());
        let mut col = 0;

        for cell in cells {
            while occupied.get(col).is_some_and(|&remaining| remaining > 0) {
                col += 1;
            }

            let col_span = clamp_span(table.col_span(&cell), MAX_COL_SPAN);
            let row_span = clamp_span(table.row_span(&cell), MAX_ROW_SPAN);
            let end = col + col_span;

            if occupied.len() < end {
                occupied.resize(end, 0);
            }
            for remaining in &mut occupied[col..end] {
                *remaining = (*remaining).max(row_span);
            }

            placed.push(PlacedCell {
                cell,
                row,
                start_col: col,
                col_span,
                row_span,
            });
            col_count = col_count.max(end);
            col = end;
        }

        // The current row is done; every covered column loses one row.
        for remaining in occupied.iter_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        grid.push(placed);
    }

    tracing::trace!(col_count, rows = grid.len(), "computed table structure");

    TableStructure { col_count, grid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::parse_table;
    use crate::mem::{MemCell, MemTable};

    /// Flattened view of a structure for snapshots.
    #[derive(Debug)]
    #[allow(dead_code)]
    struct StructureDump {
        col_count: usize,
        rows: Vec<Vec<String>>,
    }

    fn dump(table: &MemTable) -> StructureDump {
        let structure = compute_table_structure(table);
        StructureDump {
            col_count: structure.col_count,
            rows: structure
                .grid
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|placed| {
                            format!(
                                "{} cols {}..={} rows +{}",
                                table.cell(placed.cell).text,
                                placed.start_col,
                                placed.end_col(),
                                placed.row_span
                            )
                        })
                        .collect()
                })
                .collect(),
        }
    }

    #[test]
    fn test_colspan_header_row() {
        let table = parse_table(
            r#"<table><tr><td colspan="2">A</td></tr><tr><td>B</td><td>C</td></tr></table>"#,
        );
        let structure = compute_table_structure(&table);

        assert_eq!(structure.col_count, 2);
        assert_eq!(structure.grid[0].len(), 1);
        assert_eq!(structure.grid[0][0].start_col, 0);
        assert_eq!(structure.grid[0][0].end_col(), 1);
        assert_eq!(structure.grid[1][0].start_col, 0);
        assert_eq!(structure.grid[1][1].start_col, 1);
    }

    #[test]
    fn test_span_inside_row() {
        let table = parse_table(
            r#"<table><tr><td>A</td><td colspan="2">B</td></tr><tr><td>C</td><td>D</td><td>E</td></tr></table>"#,
        );
        let structure = compute_table_structure(&table);

        assert_eq!(structure.col_count, 3);
        let spanning = &structure.grid[0][1];
        assert_eq!(spanning.start_col, 1);
        assert_eq!(spanning.end_col(), 2);
    }

    #[test]
    fn test_rowspan_pushes_next_row() {
        let table = parse_table(
            r#"<table>
                <tr><td rowspan="2">A</td><td>B</td></tr>
                <tr><td>C</td></tr>
                <tr><td>D</td><td>E</td></tr>
                <tr><td>F</td><td>G</td></tr>
            </table>"#,
        );
        let structure = compute_table_structure(&table);

        assert_eq!(structure.col_count, 2);
        assert_eq!(structure.row_count(), 4);
        // Row 1's only cell sits beside the vertically merged cell.
        assert_eq!(structure.grid[1][0].start_col, 1);
        // The span has ended by row 2.
        assert_eq!(structure.grid[2][0].start_col, 0);
    }

    #[test]
    fn test_empty_table() {
        let table = MemTable::new(Vec::new());
        let structure = compute_table_structure(&table);
        assert_eq!(structure.col_count, 0);
        assert!(structure.is_empty());
    }

    #[test]
    fn test_zero_spans_read_as_one() {
        let table = MemTable::new(vec![vec![
            MemCell::new("A").colspan(0).rowspan(0),
            MemCell::new("B"),
        ]]);
        let structure = compute_table_structure(&table);
        assert_eq!(structure.col_count, 2);
        assert_eq!(structure.grid[0][1].start_col, 1);
    }

    #[test]
    fn test_short_row_beside_tall_cell() {
        // Row 1 has no cells of its own; columns 0..2 stay covered from row 0.
        let table = MemTable::new(vec![
            vec![MemCell::new("A").rowspan(3), MemCell::new("B").rowspan(2)],
            vec![],
            vec![MemCell::new("C")],
        ]);
        let structure = compute_table_structure(&table);
        assert_eq!(structure.col_count, 2);
        assert_eq!(structure.grid[2][0].start_col, 1);
    }

    #[test]
    fn test_mixed_spans_snapshot() {
        let table = parse_table(
            r#"<table>
                <tr><th colspan="3">Quarterly</th></tr>
                <tr><td rowspan="2">Region</td><td>Q1</td><td>Q2</td></tr>
                <tr><td colspan="2">Total</td></tr>
            </table>"#,
        );
        insta::assert_debug_snapshot!(dump(&table), @r#"
        StructureDump {
            col_count: 3,
            rows: [
                [
                    "Quarterly cols 0..=2 rows +1",
                ],
                [
                    "Region cols 0..=0 rows +2",
                    "Q1 cols 1..=1 rows +1",
                    "Q2 cols 2..=2 rows +1",
                ],
                [
                    "Total cols 1..=2 rows +1",
                ],
            ],
        }
        "#);
    }
}
