//! Preview pane DOM operations.

use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement, HtmlTableCellElement};

use mailwright_core::TableMarkup;
use mailwright_core::export::{PREVIEW_FONT_SELECTOR, SELECTED_CLASS};

use crate::dom_table::DomTable;

/// Give a preview table the email-safe table attributes and borders.
///
/// Returns every cell so the caller can wire up selection.
pub fn decorate_table(table: &DomTable, border: &str) -> Vec<HtmlTableCellElement> {
    let element = table.element();
    let _ = element.set_attribute("cellpadding", "0");
    let _ = element.set_attribute("cellspacing", "0");
    set_properties(element, &[("border", border), ("border-collapse", "collapse")]);

    let cells: Vec<_> = table.rows().into_iter().flatten().collect();
    for cell in &cells {
        set_properties(cell, &[("border", border)]);
    }
    cells
}

/// Apply the language font, and the font size when one is given, to every
/// text container in the preview.
pub fn apply_fonts(preview: &Element, font_family: &str, font_size_px: Option<f64>) {
    let size = font_size_px.map(|px| format!("{px}px"));
    for el in query_html(preview, PREVIEW_FONT_SELECTOR) {
        set_properties(&el, &[("font-family", font_family)]);
        if let Some(size) = &size {
            set_properties(&el, &[("font-size", size.as_str())]);
        }
    }
}

/// Append a horizontal rule at the end of the preview.
pub fn insert_divider(preview: &Element) -> Result<(), JsValue> {
    let document = preview
        .owner_document()
        .ok_or_else(|| JsValue::from_str("preview is not attached to a document"))?;
    let hr = document.create_element("hr")?;
    preview.append_child(&hr)?;
    Ok(())
}

/// Toggle the selection highlight class.
pub fn set_selected(element: &Element, selected: bool) {
    let classes = element.class_list();
    let result = if selected {
        classes.add_1(SELECTED_CLASS)
    } else {
        classes.remove_1(SELECTED_CLASS)
    };
    if let Err(e) = result {
        tracing::warn!("Failed to toggle selection class: {:?}", e);
    }
}

/// Drop the inline style of a cell entirely.
pub fn clear_style(element: &Element) {
    let _ = element.remove_attribute("style");
}

fn query_html(root: &Element, selector: &str) -> Vec<HtmlElement> {
    use wasm_bindgen::JsCast;

    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    crate::elements_of(&nodes)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_properties(element: &HtmlElement, properties: &[(&str, &str)]) {
    let style = element.style();
    for (name, value) in properties {
        if let Err(e) = style.set_property(name, value) {
            tracing::warn!("Failed to set {}: {:?}", name, e);
        }
    }
}
