//! Resize handle overlay.
//!
//! Each resizable table gets one absolutely positioned layer appended to the
//! document body, holding a thin grab strip per visible boundary. The layer
//! never lives inside the preview, so handles cannot leak into exported or
//! editor markup. Dropping a [`HandleLayer`] removes it from the page and
//! detaches its listeners.

use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, PointerEvent};

use mailwright_core::export::HANDLE_LAYER_ATTR;
use mailwright_core::{ColumnPercents, TableMarkup, handle_placements};

use crate::dom_table::DomTable;

/// Attribute carrying the boundary index on each handle.
pub const BOUNDARY_ATTR: &str = "data-boundary";

const LAYER_STYLE: &str = "position: absolute; pointer-events: none; z-index: 10;";

/// Overlay with the drag handles of one table.
pub struct HandleLayer {
    layer: HtmlElement,
    /// Handles in boundary order, visible boundaries only.
    handles: Vec<(usize, HtmlElement)>,
    _listeners: Vec<EventListener>,
}

impl HandleLayer {
    /// Build the overlay for the table at `table_index`.
    ///
    /// `on_grab` runs on pointer-down with the boundary index and the
    /// pointer's x coordinate.
    pub fn new(
        document: &Document,
        table_index: usize,
        visible: &[bool],
        handle_width_px: f64,
        on_grab: impl Fn(usize, f64) + 'static,
    ) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let layer: HtmlElement = document.create_element("div")?.dyn_into()?;
        layer.set_attribute(HANDLE_LAYER_ATTR, &table_index.to_string())?;
        layer.set_attribute("style", LAYER_STYLE)?;

        let handle_style = format!(
            "position: absolute; top: 0; height: 100%; width: {handle_width_px}px; \
             margin-left: -{}px; cursor: col-resize; pointer-events: auto;",
            handle_width_px / 2.0
        );

        let on_grab = Rc::new(on_grab);
        let mut handles = Vec::new();
        let mut listeners = Vec::new();
        for boundary in visible
            .iter()
            .enumerate()
            .filter(|(_, shown)| **shown)
            .map(|(b, _)| b)
        {
            let handle: HtmlElement = document.create_element("div")?.dyn_into()?;
            handle.set_attribute(BOUNDARY_ATTR, &boundary.to_string())?;
            handle.set_attribute("style", &handle_style)?;
            layer.append_child(&handle)?;

            let on_grab = Rc::clone(&on_grab);
            listeners.push(EventListener::new(&handle, "pointerdown", move |evt| {
                let Some(evt) = evt.dyn_ref::<PointerEvent>() else {
                    return;
                };
                if evt.button() != 0 {
                    return;
                }
                // Keeps the browser from starting a text selection.
                evt.prevent_default();
                on_grab(boundary, f64::from(evt.client_x()));
            }));
            handles.push((boundary, handle));
        }

        body.append_child(&layer)?;
        tracing::trace!(table_index, handles = handles.len(), "handle layer created");

        Ok(Self {
            layer,
            handles,
            _listeners: listeners,
        })
    }

    /// Move the layer over `table` and place every handle on its boundary.
    pub fn position(&self, table: &DomTable, percents: &ColumnPercents) {
        let rect = table.element().get_bounding_client_rect();
        let (scroll_x, scroll_y) = web_sys::window()
            .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
            .unwrap_or((0.0, 0.0));

        set_px(&self.layer, "left", rect.left() + scroll_x);
        set_px(&self.layer, "top", rect.top() + scroll_y);
        set_px(&self.layer, "width", rect.width());
        set_px(&self.layer, "height", rect.height());

        let visible = self.visible_mask(percents.len());
        let placements = handle_placements(percents, &visible, rect.width());
        for ((boundary, handle), placement) in self.handles.iter().zip(&placements) {
            debug_assert_eq!(*boundary, placement.boundary);
            set_px(handle, "left", placement.offset_px);
        }
    }

    /// Rebuild the boundary mask from the handles this layer holds.
    fn visible_mask(&self, col_count: usize) -> Vec<bool> {
        let mut mask = vec![false; col_count.saturating_sub(1)];
        for (boundary, _) in &self.handles {
            if let Some(slot) = mask.get_mut(*boundary) {
                *slot = true;
            }
        }
        mask
    }

    /// Show the handles only while the table accepts resizing.
    pub fn sync_enabled(&self, table: &DomTable) {
        let display = if table.is_resize_disabled() { "none" } else { "" };
        let _ = self.layer.style().set_property("display", display);
    }
}

impl Drop for HandleLayer {
    fn drop(&mut self) {
        self.layer.remove();
    }
}

fn set_px(element: &HtmlElement, property: &str, value: f64) {
    if let Err(e) = element.style().set_property(property, &format!("{value}px")) {
        tracing::warn!("Failed to set {}: {:?}", property, e);
    }
}
