//! Column-percent model.
//!
//! A table's column widths are represented as one percentage per logical
//! column, always summing to 100. The vector is derived from markup, never
//! stored: read it from cell widths, write it back onto cells, repeat.
//!
//! Merged cells make this non-trivial. A cell spanning columns 1..=2 carries
//! one width for two columns, so reading splits it and writing sums it.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::grid::{TableStructure, compute_table_structure};
use crate::style::{format_percent, parse_percent, round_percent};
use crate::table::TableMarkup;

/// Per-column width percentages summing to 100.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnPercents(Vec<f64>);

impl ColumnPercents {
    /// `n` equal columns.
    pub fn equal(n: usize) -> Self {
        Self::normalized(vec![1.0; n])
    }

    /// Normalize arbitrary non-negative weights to percentages.
    ///
    /// Non-finite and negative entries count as zero. An all-zero input splits
    /// evenly. Every entry but the last is rounded to the written precision;
    /// the last takes whatever is left so the sum is exactly 100.
    pub fn normalized(raw: Vec<f64>) -> Self {
        let n = raw.len();
        if n == 0 {
            return Self(raw);
        }

        let mut values: Vec<f64> = raw
            .into_iter()
            .map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
            .collect();

        let sum: f64 = values.iter().sum();
        if sum <= 0.0 {
            values.fill(100.0 / n as f64);
        } else if sum != 100.0 {
            for v in &mut values {
                *v = *v * 100.0 / sum;
            }
        }

        let mut assigned = 0.0;
        for v in &mut values[..n - 1] {
            *v = round_percent(*v);
            assigned += *v;
        }
        values[n - 1] = (100.0 - assigned).max(0.0);

        Self(values)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Total width of columns `0..=boundary`, i.e. the offset of that boundary.
    pub fn cumulative(&self, boundary: usize) -> f64 {
        self.0.iter().take(boundary + 1).sum()
    }

    /// Total width of columns `start..=end`.
    pub fn span_total(&self, start: usize, end: usize) -> f64 {
        self.0
            .get(start..=end.min(self.0.len().saturating_sub(1)))
            .map(|cols| cols.iter().sum())
            .unwrap_or(0.0)
    }

    /// Adapt this vector to `n` columns.
    ///
    /// Extra trailing columns fold into the last kept one; missing columns
    /// are appended at an equal share while existing ones shrink in
    /// proportion. The result is normalized.
    pub fn refit(&self, n: usize) -> Self {
        let len = self.0.len();
        if n == len {
            return self.clone();
        }
        if n == 0 {
            return Self::default();
        }
        if len == 0 {
            return Self::equal(n);
        }

        if n < len {
            let mut raw = self.0[..n].to_vec();
            raw[n - 1] += self.0[n..].iter().sum::<f64>();
            Self::normalized(raw)
        } else {
            let share = 100.0 / n as f64;
            let scale = (100.0 - share * (n - len) as f64) / 100.0;
            let mut raw: Vec<f64> = self.0.iter().map(|v| v * scale).collect();
            raw.resize(n, share);
            Self::normalized(raw)
        }
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for ColumnPercents {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Read the current column percentages from a table's cell widths.
///
/// Only percentage widths count. Cells are visited narrowest first, then in
/// document order. A cell claims only the columns of its span that no earlier
/// cell has claimed, splitting between them whatever its width leaves after
/// the columns already claimed. Columns left unclaimed share what remains
/// of 100.
pub fn read_column_percents<T: TableMarkup>(
    table: &T,
    structure: &TableStructure<T::Cell>,
) -> ColumnPercents {
    let col_count = structure.col_count;
    let mut assigned: Vec<Option<f64>> = vec![None; col_count];

    let mut cells: Vec<_> = structure.cells().collect();
    cells.sort_by_key(|placed| placed.col_span);

    for placed in cells {
        let Some(width) = table
            .cell_width(&placed.cell)
            .as_deref()
            .and_then(parse_percent)
        else {
            continue;
        };

        let end = placed.end_col().min(col_count.saturating_sub(1));
        let Some(span) = assigned.get_mut(placed.start_col..=end) else {
            continue;
        };
        let open = span.iter().filter(|slot| slot.is_none()).count();
        if open == 0 {
            continue;
        }
        let taken: f64 = span.iter().flatten().sum();
        let per_column = (width - taken).max(0.0) / open as f64;
        for slot in span.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(per_column);
        }
    }

    let claimed: f64 = assigned.iter().flatten().sum();
    let unclaimed = assigned.iter().filter(|slot| slot.is_none()).count();
    let share = if unclaimed > 0 {
        (100.0 - claimed).max(0.0) / unclaimed as f64
    } else {
        0.0
    };

    let raw = assigned.into_iter().map(|slot| slot.unwrap_or(share)).collect();
    ColumnPercents::normalized(raw)
}

/// Write column percentages onto every cell of a table.
///
/// Each cell gets the sum of the columns it spans; the table is switched to a
/// fixed layout at full width so browsers honour the split.
pub fn apply_column_percents<T: TableMarkup>(
    table: &mut T,
    structure: &TableStructure<T::Cell>,
    percents: &ColumnPercents,
) {
    let refitted;
    let percents = if percents.len() == structure.col_count {
        percents
    } else {
        tracing::warn!(
            expected = structure.col_count,
            got = percents.len(),
            "percent vector length mismatch, refitting"
        );
        refitted = percents.refit(structure.col_count);
        &refitted
    };

    for placed in structure.cells() {
        let width = percents.span_total(placed.start_col, placed.end_col());
        table.set_cell_width(&placed.cell, &format_percent(width));
    }
    table.set_fixed_layout();
}

/// Read then re-apply a table's widths so the markup is normalized.
///
/// Tables without logical columns are marked resize-disabled and yield
/// `None`. Calling this twice in a row produces the same vector.
pub fn ensure_table_percent_widths<T: TableMarkup>(table: &mut T) -> Option<ColumnPercents> {
    let structure = compute_table_structure(table);
    if structure.col_count == 0 {
        table.set_resize_disabled(true);
        return None;
    }

    let percents = read_column_percents(table, &structure);
    apply_column_percents(table, &structure, &percents);
    table.set_resize_disabled(false);
    Some(percents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::parse_table;
    use crate::mem::{MemCell, MemTable};

    const TOLERANCE: f64 = 1e-4;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOLERANCE, "{actual:?} vs {expected:?}");
        }
    }

    fn assert_sums_to_100(percents: &ColumnPercents) {
        assert!((percents.sum() - 100.0).abs() < 1e-9, "{percents:?}");
    }

    #[test]
    fn test_fresh_three_columns() {
        let mut table = MemTable::uniform(2, 3);
        let percents = ensure_table_percent_widths(&mut table).unwrap();

        assert_close(&percents, &[33.3333, 33.3333, 33.3334]);
        assert_sums_to_100(&percents);
        assert_eq!(
            table.row_widths(0),
            vec![Some("33.3333%"), Some("33.3333%"), Some("33.3334%")]
        );
        assert_eq!(table.style.get("table-layout"), Some("fixed"));
        assert_eq!(table.style.get("width"), Some("100%"));
    }

    #[test]
    fn test_read_apply_read_is_idempotent() {
        let mut table = parse_table(
            r#"<table><tr>
                <td style="width: 20%">A</td><td style="width:30.5%">B</td><td>C</td><td>D</td>
            </tr></table>"#,
        );
        let structure = compute_table_structure(&table);
        let first = read_column_percents(&table, &structure);
        apply_column_percents(&mut table, &structure, &first);
        let second = read_column_percents(&table, &structure);

        assert_close(&first, &[20.0, 30.5, 24.75, 24.75]);
        assert_close(&first, &second);
        assert_sums_to_100(&second);
    }

    #[test]
    fn test_ensure_twice_same_vector() {
        let mut table = parse_table(
            r#"<table><tr><td style="width: 10%">A</td><td colspan="2">B</td></tr>
               <tr><td>C</td><td>D</td><td style="width: 15%">E</td></tr></table>"#,
        );
        let first = ensure_table_percent_widths(&mut table).unwrap();
        let second = ensure_table_percent_widths(&mut table).unwrap();
        assert_close(&first, &second);
    }

    #[test]
    fn test_spanning_width_splits_evenly() {
        let table = MemTable::new(vec![
            vec![MemCell::new("A").colspan(2).width("60%"), MemCell::new("B")],
            vec![MemCell::new("C"), MemCell::new("D"), MemCell::new("E")],
        ]);
        let structure = compute_table_structure(&table);
        let percents = read_column_percents(&table, &structure);
        assert_close(&percents, &[30.0, 30.0, 40.0]);
    }

    #[test]
    fn test_spanning_cell_takes_remainder() {
        let mut table = parse_table(
            r#"<table>
                <tr><td colspan="3">X</td></tr>
                <tr><td colspan="2">Y</td><td>Z</td></tr>
                <tr><td>W</td><td colspan="2">V</td></tr>
            </table>"#,
        );
        ensure_table_percent_widths(&mut table);
        let structure = compute_table_structure(&table);
        apply_column_percents(
            &mut table,
            &structure,
            &ColumnPercents::normalized(vec![20.0, 30.0, 50.0]),
        );

        let first = ensure_table_percent_widths(&mut table).unwrap();
        let second = ensure_table_percent_widths(&mut table).unwrap();
        assert_close(&first, &[20.0, 30.0, 50.0]);
        assert_close(&first, &second);
    }

    #[test]
    fn test_first_cell_wins() {
        let table = MemTable::new(vec![
            vec![MemCell::new("A").width("70%"), MemCell::new("B").width("30%")],
            vec![MemCell::new("C").width("10%"), MemCell::new("D").width("90%")],
        ]);
        let structure = compute_table_structure(&table);
        let percents = read_column_percents(&table, &structure);
        assert_close(&percents, &[70.0, 30.0]);
    }

    #[test]
    fn test_overfull_widths_rescale() {
        let table = MemTable::new(vec![vec![
            MemCell::new("A").width("90%"),
            MemCell::new("B").width("90%"),
        ]]);
        let structure = compute_table_structure(&table);
        let percents = read_column_percents(&table, &structure);
        assert_close(&percents, &[50.0, 50.0]);
        assert_sums_to_100(&percents);
    }

    #[test]
    fn test_pixel_widths_ignored() {
        let table = MemTable::new(vec![vec![
            MemCell::new("A").width("120px"),
            MemCell::new("B").width("25%"),
        ]]);
        let structure = compute_table_structure(&table);
        let percents = read_column_percents(&table, &structure);
        assert_close(&percents, &[75.0, 25.0]);
    }

    #[test]
    fn test_apply_sums_merged_cells() {
        let mut table = parse_table(
            r#"<table><tr><td colspan="2">A</td></tr><tr><td>B</td><td>C</td></tr></table>"#,
        );
        let structure = compute_table_structure(&table);
        let percents = ColumnPercents::normalized(vec![60.0, 40.0]);
        apply_column_percents(&mut table, &structure, &percents);

        assert_eq!(table.row_widths(0), vec![Some("100.0000%")]);
        assert_eq!(table.row_widths(1), vec![Some("60.0000%"), Some("40.0000%")]);
    }

    #[test]
    fn test_empty_table_disables_resize() {
        let mut table = MemTable::new(Vec::new());
        assert_eq!(ensure_table_percent_widths(&mut table), None);
        assert!(table.is_resize_disabled());
    }

    #[test]
    fn test_ensure_clears_disabled_marker() {
        let mut table = MemTable::uniform(1, 2);
        table.set_resize_disabled(true);
        ensure_table_percent_widths(&mut table);
        assert!(!table.is_resize_disabled());
    }

    #[test]
    fn test_normalized_handles_zero_and_garbage() {
        let percents = ColumnPercents::normalized(vec![0.0, f64::NAN, -3.0]);
        assert_close(&percents, &[33.3333, 33.3333, 33.3334]);

        let percents = ColumnPercents::normalized(vec![1.0, 0.0, 3.0]);
        assert_close(&percents, &[25.0, 0.0, 75.0]);
    }

    #[test]
    fn test_normalized_sums_exactly() {
        for n in 1..=12 {
            assert_sums_to_100(&ColumnPercents::equal(n));
        }
        assert_sums_to_100(&ColumnPercents::normalized(vec![1.0, 2.0, 3.0, 7.0, 11.0]));
    }

    #[test]
    fn test_cumulative_and_span_total() {
        let percents = ColumnPercents::normalized(vec![20.0, 30.0, 50.0]);
        assert_close(&[percents.cumulative(0)], &[20.0]);
        assert_close(&[percents.cumulative(1)], &[50.0]);
        assert_close(&[percents.span_total(1, 2)], &[80.0]);
        assert_eq!(percents.span_total(5, 6), 0.0);
    }

    #[test]
    fn test_refit() {
        let percents = ColumnPercents::normalized(vec![20.0, 30.0, 50.0]);
        assert_close(&percents.refit(2), &[20.0, 80.0]);
        assert_close(&percents.refit(4), &[15.0, 22.5, 37.5, 25.0]);
        assert_eq!(percents.refit(3), percents);
        assert!(percents.refit(0).is_empty());
    }
}
