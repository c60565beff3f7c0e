//! WASM bindings for the mailwright email authoring tool.
//!
//! Exposes [`JsAuthoringTool`] for host pages that embed a rich-text editor,
//! plus free functions over single table elements for hosts that only want
//! the column-width model.

mod table;
mod tool;
mod types;

pub use table::*;
pub use tool::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and route `tracing` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host may have installed its own subscriber already.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}
