//! Color utilities for exported markup.
//!
//! Email clients are inconsistent about `rgb()` in inline styles, so exported
//! styles carry hex colors only.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").unwrap()
});

/// Convert r, g, b channels to a `#rrggbb` string.
pub fn rgb_to_hex_triplet(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Replace every `rgb(r, g, b)` in a style string with its hex form.
///
/// Channels above 255 are clamped. Borrows when there is nothing to replace.
pub fn rgb_to_hex(style: &str) -> Cow<'_, str> {
    RGB_RE.replace_all(style, |caps: &Captures<'_>| {
        let channel = |i: usize| -> u8 {
            caps[i]
                .parse::<u32>()
                .map(|v| v.min(255) as u8)
                .unwrap_or(u8::MAX)
        };
        rgb_to_hex_triplet(channel(1), channel(2), channel(3))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hex_triplet() {
        assert_eq!(rgb_to_hex_triplet(255, 0, 0), "#ff0000");
        assert_eq!(rgb_to_hex_triplet(0, 103, 184), "#0067b8");
    }

    #[test]
    fn test_rgb_to_hex_in_style() {
        assert_eq!(
            rgb_to_hex("color: rgb(0, 103, 184); background-color: RGB(255,255,255);"),
            "color: #0067b8; background-color: #ffffff;"
        );
    }

    #[test]
    fn test_rgb_to_hex_leaves_other_values() {
        let style = "border: 1px solid #000000; color: rgba(1, 2, 3, 0.5)";
        assert!(matches!(rgb_to_hex(style), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rgb_to_hex_clamps() {
        assert_eq!(rgb_to_hex("rgb(300, 1, 2)"), "#ff0102");
    }
}
