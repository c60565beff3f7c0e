//! Platform-free parts of the HTML export.
//!
//! The DOM walk lives in the browser crate; these are the decisions it makes
//! per element and the final wrapping.

use std::borrow::Cow;

use crate::color::rgb_to_hex;
use crate::style::InlineStyle;

/// Elements that receive the language font in the preview.
pub const PREVIEW_FONT_SELECTOR: &str = "p, div, td, th, ul, ol, li";

/// Elements that receive font family and size in the export.
pub const EXPORT_TEXT_SELECTOR: &str = "p, td, th, ul, ol, li";

/// Editor-only attributes stripped from exported markup.
pub const EDITOR_ONLY_ATTRS: &[&str] = &[crate::table::RESIZE_DISABLED_ATTR];

/// Attribute marking resize handle layers; elements carrying it are removed
/// from exported markup.
pub const HANDLE_LAYER_ATTR: &str = "data-mw-handles";

/// Class marking selected cells and elements in the preview.
pub const SELECTED_CLASS: &str = "selected";

/// Options for one export pass, read from the controls.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    pub font_family: String,
    pub font_size_px: f64,
    pub email_mode: bool,
    pub link_color: String,
    pub email_wrapper_style: String,
}

impl ExportOptions {
    /// Text element style: language font and size.
    pub fn apply_text_style(&self, style: &mut InlineStyle) {
        style.set("font-family", self.font_family.as_str());
        style.set("font-size", format!("{}px", self.font_size_px));
    }

    /// Link style for email clients.
    pub fn apply_link_style(&self, style: &mut InlineStyle) {
        style.set("text-decoration", "underline");
        style.set("color", self.link_color.as_str());
    }

    /// Wrap the exported markup in the email container when email mode is on.
    pub fn finish<'a>(&self, html: &'a str) -> Cow<'a, str> {
        if self.email_mode {
            Cow::Owned(wrap_for_email(html, &self.email_wrapper_style))
        } else {
            Cow::Borrowed(html)
        }
    }
}

/// Normalize a style attribute for export: hex colors only.
pub fn export_style(style: &str) -> Cow<'_, str> {
    rgb_to_hex(style)
}

/// Wrap markup in the email container `<div>`.
pub fn wrap_for_email(html: &str, wrapper_style: &str) -> String {
    format!("<div style=\"{wrapper_style}\">\n  {}\n</div>", html.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(email_mode: bool) -> ExportOptions {
        ExportOptions {
            font_family: "'Segoe UI', Arial, sans-serif".into(),
            font_size_px: 14.0,
            email_mode,
            link_color: "#0067b8".into(),
            email_wrapper_style: "padding: 40px 30px;".into(),
        }
    }

    #[test]
    fn test_finish_wraps_in_email_mode() {
        assert_eq!(options(false).finish("<p>x</p>"), "<p>x</p>");
        assert_eq!(
            options(true).finish("<p>x</p>\n"),
            "<div style=\"padding: 40px 30px;\">\n  <p>x</p>\n</div>"
        );
    }

    #[test]
    fn test_text_and_link_styles() {
        let opts = options(false);
        let mut style = InlineStyle::parse("color: rgb(1, 2, 3)");
        opts.apply_text_style(&mut style);
        assert_eq!(
            style.to_string(),
            "color: rgb(1, 2, 3); font-family: 'Segoe UI', Arial, sans-serif; font-size: 14px;"
        );

        let mut link = InlineStyle::new();
        opts.apply_link_style(&mut link);
        assert_eq!(
            link.to_string(),
            "text-decoration: underline; color: #0067b8;"
        );
    }

    #[test]
    fn test_export_style() {
        assert_eq!(
            export_style("background-color: rgb(255, 255, 0);"),
            "background-color: #ffff00;"
        );
    }
}
