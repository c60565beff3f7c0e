//! Browser DOM layer for the mailwright authoring tool.
//!
//! Drives the preview pane through `web-sys` and assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom_table`: `TableMarkup` over `HtmlTableElement`
//! - `handles`: resize handle overlay per table
//! - `drag`: window listeners for one column drag
//! - `preview`: decoration, fonts, selection highlight
//! - `export`: preview → cleaned email HTML
//! - `editor_sync`: debounced preview → editor pushes
//! - `clipboard`: async copy of the export
//! - `tool`: `AuthoringTool`, which wires the above together
//!
//! # Re-exports
//!
//! This crate re-exports `mailwright-core` for convenience, so consumers
//! only need to depend on `mailwright-browser`.

// Re-export core crate
pub use mailwright_core;
pub use mailwright_core::*;

pub mod clipboard;
pub mod controls;
pub mod dom_table;
pub mod drag;
pub mod editor_sync;
pub mod export;
pub mod handles;
pub mod preview;
pub mod tool;

pub use controls::FormControls;
pub use dom_table::{DomTable, tables_in};
pub use drag::{DragEnd, DragSession};
pub use editor_sync::EditorSync;
pub use export::{editor_html, export_html};
pub use handles::HandleLayer;
pub use tool::AuthoringTool;

use wasm_bindgen::JsCast;

/// Collect the elements of a `NodeList`, skipping non-element nodes.
pub(crate) fn elements_of(nodes: &web_sys::NodeList) -> Vec<web_sys::Element> {
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}
