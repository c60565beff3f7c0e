//! Column-width model over a single `<table>` element.

use wasm_bindgen::prelude::*;
use web_sys::HtmlTableElement;

use mailwright_browser::DomTable;
use mailwright_core::{
    ColumnPercents, apply_column_percents, compute_table_structure, compute_visible_boundaries,
    ensure_table_percent_widths, read_column_percents, rgb_to_hex,
};

use crate::types::JsTableStructure;

/// Logical grid of `table`.
#[wasm_bindgen(js_name = computeTableStructure)]
pub fn compute_structure(table: HtmlTableElement) -> JsTableStructure {
    let table = DomTable::new(table);
    JsTableStructure::from(&compute_table_structure(&table))
}

/// Draggable flag for each column boundary of `table`.
#[wasm_bindgen(js_name = computeVisibleBoundaries)]
pub fn visible_boundaries(table: HtmlTableElement) -> Result<JsValue, JsError> {
    let table = DomTable::new(table);
    let visible = compute_visible_boundaries(&compute_table_structure(&table));
    serde_wasm_bindgen::to_value(&visible)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Current column percentages of `table`, read from its cells.
#[wasm_bindgen(js_name = readColumnPercents)]
pub fn read_percents(table: HtmlTableElement) -> Vec<f64> {
    let table = DomTable::new(table);
    let structure = compute_table_structure(&table);
    read_column_percents(&table, &structure).into_inner()
}

/// Write `percents` onto `table`'s cells. The vector is normalized first.
#[wasm_bindgen(js_name = applyColumnPercents)]
pub fn apply_percents(table: HtmlTableElement, percents: Vec<f64>) -> Vec<f64> {
    let mut table = DomTable::new(table);
    let structure = compute_table_structure(&table);
    let percents = ColumnPercents::normalized(percents);
    apply_column_percents(&mut table, &structure, &percents);
    percents.into_inner()
}

/// Give `table` a normalized percent width on every column. Returns
/// `undefined` and marks the table when it has no columns.
#[wasm_bindgen(js_name = ensureTablePercentWidths)]
pub fn ensure_percents(table: HtmlTableElement) -> Option<Vec<f64>> {
    let mut table = DomTable::new(table);
    ensure_table_percent_widths(&mut table).map(ColumnPercents::into_inner)
}

/// Replace `rgb(r, g, b)` colors in a style string with `#rrggbb`.
#[wasm_bindgen(js_name = rgbToHex)]
pub fn convert_rgb_to_hex(style: &str) -> String {
    rgb_to_hex(style).into_owned()
}
