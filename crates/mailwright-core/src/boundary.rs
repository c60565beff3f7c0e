//! Which column boundaries can be dragged.
//!
//! A boundary that sits inside a spanning cell on every row has no visible
//! seam, so it gets no resize handle.

use crate::grid::TableStructure;

/// Flags for boundaries `0..col_count - 1`; `true` means draggable.
///
/// Boundary `i` is the seam between columns `i` and `i + 1`. It is draggable
/// iff some cell's last column is `i`.
pub fn compute_visible_boundaries<C>(structure: &TableStructure<C>) -> Vec<bool> {
    let boundaries = structure.col_count.saturating_sub(1);
    let mut visible = vec![false; boundaries];
    for placed in structure.cells() {
        if let Some(flag) = visible.get_mut(placed.end_col()) {
            *flag = true;
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::parse_table;
    use crate::grid::compute_table_structure;
    use crate::mem::MemTable;

    #[test]
    fn test_boundary_inside_span_hidden() {
        let table = parse_table(
            r#"<table><tr><td>A</td><td colspan="2">B</td></tr></table>"#,
        );
        let structure = compute_table_structure(&table);
        assert_eq!(structure.col_count, 3);
        assert_eq!(compute_visible_boundaries(&structure), vec![true, false]);
    }

    #[test]
    fn test_any_row_exposes_boundary() {
        let table = parse_table(
            r#"<table><tr><td>A</td><td colspan="2">B</td></tr>
               <tr><td>C</td><td>D</td><td>E</td></tr></table>"#,
        );
        let structure = compute_table_structure(&table);
        assert_eq!(compute_visible_boundaries(&structure), vec![true, true]);
    }

    #[test]
    fn test_single_column_has_no_boundaries() {
        let structure = compute_table_structure(&MemTable::uniform(3, 1));
        assert!(compute_visible_boundaries(&structure).is_empty());

        let structure = compute_table_structure(&MemTable::new(Vec::new()));
        assert!(compute_visible_boundaries(&structure).is_empty());
    }
}
