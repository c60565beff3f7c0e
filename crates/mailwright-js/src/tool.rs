//! JsAuthoringTool - the authoring tool wrapper for JavaScript.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use mailwright_browser::AuthoringTool;
use mailwright_core::{AuthoringConfig, AuthoringError};

/// The authoring tool instance exposed to JavaScript.
///
/// Binds to the preview, code block and controls by element id. The host
/// page forwards editor changes and button clicks; everything else (resize
/// handles, cell selection, export) is handled inside.
#[wasm_bindgen]
pub struct JsAuthoringTool {
    tool: AuthoringTool,
}

#[wasm_bindgen]
impl JsAuthoringTool {
    /// Create a tool. `config` is a partial `AuthoringConfig` object; omitted
    /// fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsAuthoringTool, JsError> {
        let config: AuthoringConfig = if config.is_undefined() || config.is_null() {
            AuthoringConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };
        let tool = AuthoringTool::new(config).map_err(to_js_error)?;
        Ok(Self { tool })
    }

    /// Forward the editor's current HTML. Returns `false` when the change
    /// was ignored as the echo of a preview edit.
    #[wasm_bindgen(js_name = onEditorChange)]
    pub fn on_editor_change(&self, html: &str) -> bool {
        self.tool.on_editor_change(html)
    }

    /// Register `load(html)`, called to push preview edits into the editor.
    #[wasm_bindgen(js_name = setEditorLoader)]
    pub fn set_editor_loader(&self, load: js_sys::Function) {
        self.tool.set_editor_loader(move |html| {
            if let Err(e) = load.call1(&JsValue::NULL, &JsValue::from_str(html)) {
                tracing::warn!("Editor loader threw: {:?}", e);
            }
        });
    }

    /// Register `highlight(codeBlock)`, called after every export.
    #[wasm_bindgen(js_name = setHighlighter)]
    pub fn set_highlighter(&self, highlight: js_sys::Function) {
        self.tool.set_highlighter(move |code_block: &HtmlElement| {
            if let Err(e) = highlight.call1(&JsValue::NULL, code_block) {
                tracing::warn!("Highlighter threw: {:?}", e);
            }
        });
    }

    /// Register `notify(message)` for user-facing messages instead of
    /// `window.alert`.
    #[wasm_bindgen(js_name = setNotifier)]
    pub fn set_notifier(&self, notify: js_sys::Function) {
        self.tool.set_notifier(move |message| {
            if let Err(e) = notify.call1(&JsValue::NULL, &JsValue::from_str(message)) {
                tracing::warn!("Notifier threw: {:?}", e);
            }
        });
    }

    /// Re-apply the language font and size, then regenerate the export.
    #[wasm_bindgen(js_name = renderOutput)]
    pub fn render_output(&self) {
        self.tool.render_output();
    }

    #[wasm_bindgen(js_name = applyCellStyle)]
    pub fn apply_cell_style(&self) -> Result<(), JsError> {
        self.report(self.tool.apply_cell_style())
    }

    #[wasm_bindgen(js_name = clearCellStyle)]
    pub fn clear_cell_style(&self) -> Result<(), JsError> {
        self.report(self.tool.clear_cell_style())
    }

    #[wasm_bindgen(js_name = insertDivider)]
    pub fn insert_divider(&self) -> Result<(), JsError> {
        self.report(self.tool.insert_divider())
    }

    /// Copy the generated HTML. The outcome is reported through the
    /// notifier.
    #[wasm_bindgen(js_name = copyHtml)]
    pub fn copy_html(&self) {
        self.tool.copy_html();
    }

    /// The most recent export.
    #[wasm_bindgen(js_name = exportedHtml)]
    pub fn exported_html(&self) -> String {
        self.tool.exported_html()
    }

    /// Column percentages per preview table; `null` where resize is disabled.
    #[wasm_bindgen(js_name = tablePercents)]
    pub fn table_percents(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.tool.table_percents())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

impl JsAuthoringTool {
    /// Show user-facing errors through the notifier; throw the rest.
    fn report(&self, result: mailwright_core::Result<()>) -> Result<(), JsError> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_user_facing() => {
                self.tool.notify(&e.to_string());
                Ok(())
            }
            Err(e) => Err(to_js_error(e)),
        }
    }
}

fn to_js_error(e: AuthoringError) -> JsError {
    JsError::new(&e.to_string())
}
