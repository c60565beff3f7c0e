//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use mailwright_core::{PlacedCell, TableStructure};

/// One markup cell placed on the logical grid.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsPlacedCell {
    pub row: usize,
    pub start_col: usize,
    /// Inclusive.
    pub end_col: usize,
    pub col_span: usize,
    pub row_span: usize,
}

impl<C> From<&PlacedCell<C>> for JsPlacedCell {
    fn from(cell: &PlacedCell<C>) -> Self {
        Self {
            row: cell.row,
            start_col: cell.start_col,
            end_col: cell.end_col(),
            col_span: cell.col_span,
            row_span: cell.row_span,
        }
    }
}

/// Reconstructed grid of a table.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsTableStructure {
    pub col_count: usize,
    /// Placed cells per markup row.
    pub rows: Vec<Vec<JsPlacedCell>>,
}

impl<C> From<&TableStructure<C>> for JsTableStructure {
    fn from(structure: &TableStructure<C>) -> Self {
        Self {
            col_count: structure.col_count,
            rows: structure
                .grid
                .iter()
                .map(|row| row.iter().map(JsPlacedCell::from).collect())
                .collect(),
        }
    }
}
