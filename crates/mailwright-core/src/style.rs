//! Inline `style` attribute handling.
//!
//! Parsing is tolerant: the strings come from the embedded editor and from our
//! own DOM writes, so malformed tokens are skipped rather than reported.

use std::fmt;

use smol_str::{SmolStr, ToSmolStr};

/// Decimal places used when writing percentage widths.
pub const PERCENT_PRECISION: usize = 4;

/// One `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: SmolStr,
    pub value: String,
}

/// Ordered list of inline style declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value.
    ///
    /// Tokens without a colon, or with an empty property name, are skipped.
    /// Later duplicates replace earlier ones in place, like the CSSOM does.
    pub fn parse(source: &str) -> Self {
        let mut style = Self::new();
        for token in source.split(';') {
            let Some((property, value)) = token.split_once(':') else {
                continue;
            };
            let property = property.trim();
            if property.is_empty() {
                continue;
            }
            style.set(property, value.trim());
        }
        style
    }

    /// Get the value of a property (case-insensitive name).
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property.eq_ignore_ascii_case(property))
            .map(|d| d.value.as_str())
    }

    /// Set a property, replacing an existing declaration in place.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .declarations
            .iter_mut()
            .find(|d| d.property.eq_ignore_ascii_case(property))
        {
            Some(existing) => existing.value = value,
            None => self.declarations.push(Declaration {
                property: property.to_ascii_lowercase().to_smolstr(),
                value,
            }),
        }
    }

    /// Remove a property. Returns the old value if there was one.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let idx = self
            .declarations
            .iter()
            .position(|d| d.property.eq_ignore_ascii_case(property))?;
        Some(self.declarations.remove(idx).value)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", decl.property, decl.value)?;
        }
        Ok(())
    }
}

/// Parse a CSS percentage such as `"33.5%"`.
///
/// Returns `None` for any other unit, for negative values, and for garbage.
pub fn parse_percent(value: &str) -> Option<f64> {
    let number = value.trim().strip_suffix('%')?.trim();
    let parsed: f64 = number.parse().ok()?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

/// Format a percentage with fixed precision, e.g. `33.3333%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.*}%", PERCENT_PRECISION, value)
}

/// Round to the precision used for written widths.
pub fn round_percent(value: f64) -> f64 {
    let scale = 10f64.powi(PERCENT_PRECISION as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_tokens_without_colon() {
        let style = InlineStyle::parse("width: 50%; garbage; color:red;;  : nope");
        assert_eq!(style.len(), 2);
        assert_eq!(style.get("width"), Some("50%"));
        assert_eq!(style.get("COLOR"), Some("red"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut style = InlineStyle::parse("width: 10%; border: 1px solid #000");
        style.set("Width", "20%");
        assert_eq!(style.to_string(), "width: 20%; border: 1px solid #000;");
    }

    #[test]
    fn test_remove() {
        let mut style = InlineStyle::parse("width: 10%; color: red");
        assert_eq!(style.remove("width").as_deref(), Some("10%"));
        assert_eq!(style.remove("width"), None);
        assert_eq!(style.to_string(), "color: red;");
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let style = InlineStyle::parse("background: url(http://x/y.png)");
        assert_eq!(style.get("background"), Some("url(http://x/y.png)"));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("33.5%"), Some(33.5));
        assert_eq!(parse_percent(" 50 % "), Some(50.0));
        assert_eq!(parse_percent("120px"), None);
        assert_eq!(parse_percent("-5%"), None);
        assert_eq!(parse_percent("abc%"), None);
        assert_eq!(parse_percent(""), None);
    }

    #[test]
    fn test_format_and_round() {
        assert_eq!(format_percent(100.0 / 3.0), "33.3333%");
        assert_eq!(round_percent(33.33336), 33.3334);
    }
}
