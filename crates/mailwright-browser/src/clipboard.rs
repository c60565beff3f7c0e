//! Copying the exported HTML.
//!
//! Uses the async Clipboard API, so no clipboard event is needed; a button
//! click is enough user activation.

use wasm_bindgen::JsValue;

use mailwright_core::AuthoringError;

/// Shown after a successful copy.
pub const COPIED_MESSAGE: &str = "HTML code copied to clipboard!";

/// Write plain text through `navigator.clipboard.writeText`.
pub async fn write_text(text: &str) -> Result<(), AuthoringError> {
    let window = web_sys::window()
        .ok_or_else(|| AuthoringError::Clipboard("no window".to_owned()))?;
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| AuthoringError::Clipboard(js_message(&e)))
}

/// Copy `text` in the background and report the outcome to `on_done`.
///
/// Empty text is rejected up front with [`AuthoringError::EmptyExport`],
/// without touching the clipboard.
pub fn copy_text(text: String, on_done: impl FnOnce(Result<(), AuthoringError>) + 'static) {
    if text.trim().is_empty() {
        on_done(Err(AuthoringError::EmptyExport));
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        let result = write_text(&text).await;
        if let Err(e) = &result {
            tracing::warn!("Clipboard write failed: {}", e);
        }
        on_done(result);
    });
}

/// Best-effort readable text from a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
