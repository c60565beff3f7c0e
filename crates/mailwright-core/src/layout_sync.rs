//! Width preservation across full content replacement.
//!
//! When the editor round-trips content, the preview's tables are thrown away
//! and rebuilt from fresh markup that knows nothing about dragged widths.
//! [`WidthSnapshot`] carries the vectors across: capture before the replace,
//! restore after it. Tables are matched by document order.

use serde::{Deserialize, Serialize};

use crate::grid::compute_table_structure;
use crate::percent::{ColumnPercents, apply_column_percents, read_column_percents};
use crate::table::TableMarkup;

/// Widths of one table at capture time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableWidths {
    pub col_count: usize,
    pub percents: ColumnPercents,
}

/// Per-table widths in document order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WidthSnapshot {
    tables: Vec<TableWidths>,
}

impl TableWidths {
    /// Derive the widths from `table`'s markup.
    pub fn read<T: TableMarkup>(table: &T) -> Self {
        let structure = compute_table_structure(table);
        if structure.col_count == 0 {
            return Self::default();
        }
        Self {
            col_count: structure.col_count,
            percents: read_column_percents(table, &structure),
        }
    }

    /// Widths from a vector already in effect.
    pub fn from_percents(percents: ColumnPercents) -> Self {
        Self {
            col_count: percents.len(),
            percents,
        }
    }
}

impl WidthSnapshot {
    /// Record the current widths of `tables` by reading their markup, in the
    /// order given.
    pub fn capture<'a, T>(tables: impl IntoIterator<Item = &'a T>) -> Self
    where
        T: TableMarkup + 'a,
    {
        Self::from_widths(tables.into_iter().map(TableWidths::read))
    }

    /// Snapshot of widths already known, in document order.
    pub fn from_widths(tables: impl IntoIterator<Item = TableWidths>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TableWidths> {
        self.tables.get(index)
    }

    /// Re-apply captured widths onto freshly rendered `tables`.
    ///
    /// The table at index `i` takes the vector captured at index `i` when that
    /// entry has columns, refitted if the column count changed. Tables with no
    /// usable entry get equal-width columns. Returns the vector now in effect
    /// for each table (`None` when resize is disabled).
    pub fn restore<'a, T>(
        &self,
        tables: impl IntoIterator<Item = &'a mut T>,
    ) -> Vec<Option<ColumnPercents>>
    where
        T: TableMarkup + 'a,
    {
        tables
            .into_iter()
            .enumerate()
            .map(|(index, table)| {
                let structure = compute_table_structure(table);
                if structure.col_count == 0 {
                    table.set_resize_disabled(true);
                    return None;
                }

                let saved = self.tables.get(index).filter(|saved| saved.col_count > 0);
                let percents = match saved {
                    Some(saved) => {
                        if saved.col_count != structure.col_count {
                            tracing::debug!(
                                index,
                                saved = saved.col_count,
                                current = structure.col_count,
                                "column count changed across replace, refitting widths"
                            );
                        }
                        saved.percents.refit(structure.col_count)
                    }
                    None => ColumnPercents::equal(structure.col_count),
                };
                apply_column_percents(table, &structure, &percents);
                table.set_resize_disabled(false);
                Some(percents)
            })
            .collect()
    }
}
