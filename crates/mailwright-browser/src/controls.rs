//! Form controls the tool reads from.
//!
//! Controls are looked up by id on every read, so the host page can swap or
//! re-render them freely. A missing or unparsable control reads as "not set".

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

use mailwright_core::{AuthoringConfig, CellStyle, ElementIds, ExportOptions, Padding, TextAlign};

/// Reads values from the page's form controls.
#[derive(Clone, Debug)]
pub struct FormControls {
    document: Document,
    ids: ElementIds,
}

impl FormControls {
    pub fn new(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    /// Raw value of an `<input>` or `<select>`, empty values excluded.
    fn value(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        let value = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            tracing::debug!(id, "control is neither input nor select");
            return None;
        };
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    }

    fn number(&self, id: &str) -> Option<f64> {
        self.value(id)?
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
    }

    /// Selected language code.
    pub fn language(&self) -> Option<String> {
        self.value(&self.ids.language)
    }

    pub fn font_size_px(&self) -> Option<f64> {
        self.number(&self.ids.font_size).filter(|size| *size > 0.0)
    }

    /// Whether the "for email" checkbox is ticked.
    pub fn email_mode(&self) -> bool {
        self.document
            .get_element_by_id(&self.ids.for_email)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .is_some_and(|input| input.checked())
    }

    /// Style to apply to selected cells.
    pub fn cell_style(&self) -> CellStyle {
        CellStyle {
            font_size_px: self.font_size_px(),
            color: self.value(&self.ids.text_color),
            background_color: self.value(&self.ids.background_color),
            padding: self.number(&self.ids.padding).map(Padding::uniform),
            text_align: self
                .value(&self.ids.text_align)
                .and_then(|align| align.parse::<TextAlign>().ok()),
        }
    }

    /// Font family for the selected language.
    pub fn font_family<'a>(&self, config: &'a AuthoringConfig) -> &'a str {
        let language = self
            .language()
            .unwrap_or_else(|| config.default_language.clone());
        config.font_for(&language)
    }

    /// Options for the next export pass.
    pub fn export_options(&self, config: &AuthoringConfig) -> ExportOptions {
        ExportOptions {
            font_family: self.font_family(config).to_owned(),
            font_size_px: self.font_size_px().unwrap_or(config.font_size_px),
            email_mode: self.email_mode(),
            link_color: config.link_color.clone(),
            email_wrapper_style: config.email_wrapper_style.clone(),
        }
    }
}
