//! Authoring tool configuration.
//!
//! Every field has a default, so hosts only pass what they want to change.
//! The js crate deserializes this from a plain JS object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resize::MIN_COLUMN_PERCENT;

/// Ids of the page elements the tool reads from and writes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub preview: String,
    pub code_block: String,
    pub language: String,
    pub font_size: String,
    pub text_color: String,
    pub background_color: String,
    pub padding: String,
    pub text_align: String,
    pub for_email: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            preview: "livePreview".into(),
            code_block: "htmlCodeBlock".into(),
            language: "languageSelector".into(),
            font_size: "fontSize".into(),
            text_color: "textColor".into(),
            background_color: "bgColor".into(),
            padding: "padding".into(),
            text_align: "textAlign".into(),
            for_email: "forEmail".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoringConfig {
    /// Font family per language code.
    pub fonts: BTreeMap<String, String>,
    /// Language used when the selector holds an unknown code.
    pub default_language: String,
    /// Font size used when the size control is empty or invalid.
    pub font_size_px: f64,
    pub link_color: String,
    /// Border applied to preview tables and cells.
    pub table_border: String,
    /// Inline style of the wrapper `<div>` in email mode.
    pub email_wrapper_style: String,
    /// Smallest share a column can be dragged down to.
    pub min_column_percent: f64,
    /// Quiet window before preview edits are pushed back to the editor.
    pub sync_quiet_ms: u32,
    /// Width of a resize handle's hit area.
    pub handle_width_px: f64,
    pub elements: ElementIds,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        let fonts = [
            ("en", "'Segoe UI', Arial, sans-serif"),
            ("ja", "'Yu Gothic', sans-serif"),
            ("ko", "'Malgun Gothic', sans-serif"),
        ]
        .into_iter()
        .map(|(lang, font)| (lang.to_owned(), font.to_owned()))
        .collect();

        Self {
            fonts,
            default_language: "en".into(),
            font_size_px: 14.0,
            link_color: "#0067b8".into(),
            table_border: "1px solid #000000".into(),
            email_wrapper_style: "margin: 0px; line-height:24px; padding: 40px 30px; \
                                  font-size: 16px; font-family: 'Segoe UI'; color: #000000;"
                .into(),
            min_column_percent: MIN_COLUMN_PERCENT,
            sync_quiet_ms: 300,
            handle_width_px: 8.0,
            elements: ElementIds::default(),
        }
    }
}

impl AuthoringConfig {
    /// Font family for a language, falling back to the default language.
    pub fn font_for(&self, language: &str) -> &str {
        self.fonts
            .get(language)
            .or_else(|| self.fonts.get(&self.default_language))
            .map(String::as_str)
            .unwrap_or("sans-serif")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_fallback() {
        let config = AuthoringConfig::default();
        assert_eq!(config.font_for("ja"), "'Yu Gothic', sans-serif");
        assert_eq!(config.font_for("xx"), "'Segoe UI', Arial, sans-serif");

        let bare = AuthoringConfig {
            fonts: BTreeMap::new(),
            ..Default::default()
        };
        assert_eq!(bare.font_for("en"), "sans-serif");
    }
}
