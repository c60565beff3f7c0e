//! `TableMarkup` over live DOM tables.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTableCellElement, HtmlTableElement, HtmlTableRowElement};

use mailwright_core::{RESIZE_DISABLED_ATTR, TableMarkup};

/// A table element in the preview.
///
/// Cheap to clone; clones refer to the same DOM node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomTable {
    element: HtmlTableElement,
}

impl DomTable {
    pub fn new(element: HtmlTableElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlTableElement {
        &self.element
    }

    /// Rendered width in CSS pixels.
    pub fn width_px(&self) -> f64 {
        self.element.get_bounding_client_rect().width()
    }
}

/// Every table under `container`, in document order.
pub fn tables_in(container: &Element) -> Vec<DomTable> {
    let Ok(nodes) = container.query_selector_all("table") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlTableElement>().ok())
        .map(DomTable::new)
        .collect()
}

impl TableMarkup for DomTable {
    type Cell = HtmlTableCellElement;

    fn rows(&self) -> Vec<Vec<HtmlTableCellElement>> {
        let rows = self.element.rows();
        (0..rows.length())
            .filter_map(|i| rows.item(i))
            .filter_map(|row| row.dyn_into::<HtmlTableRowElement>().ok())
            .map(|row| {
                let cells = row.cells();
                (0..cells.length())
                    .filter_map(|i| cells.item(i))
                    .filter_map(|cell| cell.dyn_into::<HtmlTableCellElement>().ok())
                    .collect()
            })
            .collect()
    }

    fn col_span(&self, cell: &HtmlTableCellElement) -> u32 {
        cell.col_span()
    }

    fn row_span(&self, cell: &HtmlTableCellElement) -> u32 {
        cell.row_span()
    }

    fn cell_width(&self, cell: &HtmlTableCellElement) -> Option<String> {
        cell.style()
            .get_property_value("width")
            .ok()
            .filter(|width| !width.is_empty())
    }

    fn set_cell_width(&mut self, cell: &HtmlTableCellElement, width: &str) {
        if let Err(e) = cell.style().set_property("width", width) {
            tracing::warn!("Failed to set cell width: {:?}", e);
        }
    }

    fn set_fixed_layout(&mut self) {
        let style = self.element.style();
        let result = style
            .set_property("table-layout", "fixed")
            .and_then(|_| style.set_property("width", "100%"));
        if let Err(e) = result {
            tracing::warn!("Failed to set fixed table layout: {:?}", e);
        }
    }

    fn set_resize_disabled(&mut self, disabled: bool) {
        let result = if disabled {
            self.element.set_attribute(RESIZE_DISABLED_ATTR, "")
        } else {
            self.element.remove_attribute(RESIZE_DISABLED_ATTR)
        };
        if let Err(e) = result {
            tracing::warn!("Failed to toggle resize marker: {:?}", e);
        }
    }

    fn is_resize_disabled(&self) -> bool {
        self.element.has_attribute(RESIZE_DISABLED_ATTR)
    }
}
