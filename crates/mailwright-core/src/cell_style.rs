//! Styles applied to selected cells from the form controls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::style::InlineStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

impl FromStr for TextAlign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(()),
        }
    }
}

/// Per-side padding in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_uniform() {
            write!(f, "{}px", self.top)
        } else {
            write!(
                f,
                "{}px {}px {}px {}px",
                self.top, self.right, self.bottom, self.left
            )
        }
    }
}

/// Style values read from the controls. `None` leaves a property alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellStyle {
    pub font_size_px: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub padding: Option<Padding>,
    pub text_align: Option<TextAlign>,
}

impl CellStyle {
    /// Write the set properties onto `style`.
    pub fn apply_to(&self, style: &mut InlineStyle) {
        if let Some(size) = self.font_size_px {
            style.set("font-size", format!("{size}px"));
        }
        if let Some(color) = &self.color {
            style.set("color", color.as_str());
        }
        if let Some(background) = &self.background_color {
            style.set("background-color", background.as_str());
        }
        if let Some(padding) = &self.padding {
            style.set("padding", padding.to_string());
        }
        if let Some(align) = self.text_align {
            style.set("text-align", align.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_width() {
        let mut style = InlineStyle::parse("width: 40.0000%; border: 1px solid #000000");
        CellStyle {
            font_size_px: Some(14.0),
            color: Some("#333333".into()),
            background_color: Some("#ffffff".into()),
            padding: Some(Padding::uniform(8.0)),
            text_align: Some(TextAlign::Center),
        }
        .apply_to(&mut style);

        assert_eq!(
            style.to_string(),
            "width: 40.0000%; border: 1px solid #000000; font-size: 14px; color: #333333; \
             background-color: #ffffff; padding: 8px; text-align: center;"
        );
    }

    #[test]
    fn test_partial_style() {
        let mut style = InlineStyle::parse("color: red");
        CellStyle {
            padding: Some(Padding {
                top: 4.0,
                right: 8.0,
                bottom: 4.0,
                left: 8.0,
            }),
            ..Default::default()
        }
        .apply_to(&mut style);
        assert_eq!(style.to_string(), "color: red; padding: 4px 8px 4px 8px;");
    }

    #[test]
    fn test_text_align_parse() {
        assert_eq!("Center".parse(), Ok(TextAlign::Center));
        assert!("middle".parse::<TextAlign>().is_err());
    }
}
