//! CSS font shorthand grammar.
//!
//! A font string such as `"italic bold 12px Helvetica Neue"` is split into five
//! addressable parts (style, variant, weight, size, family) and reassembled as a
//! normalized five-token string. Sizes are stored in logical units: parsing divides by
//! the density and formatting multiplies by it, except for percentages.

use crate::density::Density;
use crate::error::CanvasError;
use std::fmt;
use std::str::FromStr;
use std::sync::Once;

static LINE_HEIGHT_NOTICE: Once = Once::new();

/// Single-keyword system fonts that replace the whole shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemFont {
    /// `caption`: captioned controls such as buttons.
    Caption,
    /// `icon`: icon labels.
    Icon,
    /// `menu`: menus and dropdown lists.
    Menu,
    /// `message-box`: dialog boxes.
    MessageBox,
    /// `small-caption`: small control labels.
    SmallCaption,
    /// `status-bar`: window status bars.
    StatusBar,
}

impl SystemFont {
    /// Every system font keyword.
    pub const ALL: [SystemFont; 6] = [
        SystemFont::Caption,
        SystemFont::Icon,
        SystemFont::Menu,
        SystemFont::MessageBox,
        SystemFont::SmallCaption,
        SystemFont::StatusBar,
    ];

    /// The CSS keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            SystemFont::Caption => "caption",
            SystemFont::Icon => "icon",
            SystemFont::Menu => "menu",
            SystemFont::MessageBox => "message-box",
            SystemFont::SmallCaption => "small-caption",
            SystemFont::StatusBar => "status-bar",
        }
    }
}

impl FromStr for SystemFont {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SystemFont::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CanvasError::InvalidKeyword {
                kind: "system font",
                value: s.to_string(),
            })
    }
}

/// A font size with its CSS unit.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSize {
    /// Numeric size. Logical units unless `unit` is `%`.
    pub value: f64,
    /// Lowercase unit, e.g. `px`, `pt`, `em` or `%`.
    pub unit: String,
}

impl FontSize {
    /// A size in pixels.
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: "px".to_string(),
        }
    }

    /// Whether the size is a percentage (never density-scaled).
    pub fn is_percentage(&self) -> bool {
        self.unit == "%"
    }

    /// Approximate size in CSS pixels, assuming a 16px base for relative units.
    pub fn to_px(&self) -> f64 {
        let multiplier = match self.unit.as_str() {
            "px" => 1.0,
            "pt" => 4.0 / 3.0,
            "pc" => 16.0,
            "in" => 96.0,
            "cm" => 96.0 / 2.54,
            "mm" => 96.0 / 25.4,
            "q" => 96.0 / 101.6,
            "%" => 16.0 / 100.0,
            "ex" | "ch" => 8.0,
            // em, rem and viewport units
            _ => 16.0,
        };
        self.value * multiplier
    }
}

impl From<f64> for FontSize {
    fn from(value: f64) -> Self {
        FontSize::px(value)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// The five parts of a font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct FontParts {
    /// `normal`, `italic` or `oblique`.
    pub style: String,
    /// `normal` or `small-caps`.
    pub variant: String,
    /// A weight keyword or a number from `100` to `900`.
    pub weight: String,
    /// Size with its unit.
    pub size: FontSize,
    /// Family list as written, e.g. `"Helvetica Neue", Arial`.
    pub family: String,
}

/// A parsed font: either the five-part shorthand or a system font keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum FontDescriptor {
    /// A five-part shorthand.
    Parts(FontParts),
    /// A system font keyword standing for the whole font.
    System(SystemFont),
}

impl FontDescriptor {
    /// The five parts, or `None` for a system font.
    pub fn parts(&self) -> Option<&FontParts> {
        match self {
            FontDescriptor::Parts(parts) => Some(parts),
            FontDescriptor::System(_) => None,
        }
    }

    pub fn style(&self) -> Option<&str> {
        self.parts().map(|p| p.style.as_str())
    }

    pub fn variant(&self) -> Option<&str> {
        self.parts().map(|p| p.variant.as_str())
    }

    pub fn weight(&self) -> Option<&str> {
        self.parts().map(|p| p.weight.as_str())
    }

    pub fn size(&self) -> Option<&FontSize> {
        self.parts().map(|p| &p.size)
    }

    pub fn family(&self) -> Option<&str> {
        self.parts().map(|p| p.family.as_str())
    }
}

/// Which part of the shorthand a pre-size token fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlot {
    Style,
    Variant,
    Weight,
    /// The literal `normal`, valid in any slot and otherwise ignored.
    Normal,
}

/// Keyword tables and defaults for parsing and formatting font strings.
#[derive(Debug, Clone)]
pub struct FontGrammar {
    styles: &'static [&'static str],
    variants: &'static [&'static str],
    weights: &'static [&'static str],
    size_units: &'static [&'static str],
    system_fonts: &'static [SystemFont],
    default_size: f64,
    default_family: String,
}

impl Default for FontGrammar {
    fn default() -> Self {
        Self {
            styles: &["italic", "oblique"],
            variants: &["small-caps"],
            weights: &["bold", "bolder", "lighter"],
            size_units: &[
                "px", "pt", "pc", "in", "cm", "mm", "q", "em", "rem", "ex", "ch", "vw", "vh",
                "vmin", "vmax",
            ],
            system_fonts: &SystemFont::ALL,
            default_size: 10.0,
            default_family: "sans-serif".to_string(),
        }
    }
}

impl FontGrammar {
    /// Create the grammar with the standard keyword tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the family used when a font string names none.
    pub fn with_default_family(mut self, family: impl Into<String>) -> Self {
        self.default_family = family.into();
        self
    }

    /// Replace the pixel size used by the default descriptor.
    pub fn with_default_size(mut self, size_px: f64) -> Self {
        if size_px.is_finite() && size_px > 0.0 {
            self.default_size = size_px;
        }
        self
    }

    /// `normal normal normal 10px sans-serif` with the configured defaults.
    pub fn default_parts(&self) -> FontParts {
        FontParts {
            style: "normal".to_string(),
            variant: "normal".to_string(),
            weight: "normal".to_string(),
            size: FontSize::px(self.default_size),
            family: self.default_family.clone(),
        }
    }

    pub fn default_descriptor(&self) -> FontDescriptor {
        FontDescriptor::Parts(self.default_parts())
    }

    /// Classify a token that may precede the size.
    pub fn classify(&self, token: &str) -> Option<FontSlot> {
        let token = token.to_ascii_lowercase();
        if token == "normal" {
            Some(FontSlot::Normal)
        } else if self.styles.contains(&token.as_str()) {
            Some(FontSlot::Style)
        } else if self.variants.contains(&token.as_str()) {
            Some(FontSlot::Variant)
        } else if self.weights.contains(&token.as_str()) || is_numeric_weight(&token) {
            Some(FontSlot::Weight)
        } else {
            None
        }
    }

    /// Match a system font keyword.
    pub fn system_font(&self, raw: &str) -> Option<SystemFont> {
        self.system_fonts
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(raw))
    }

    /// Parse a size token (`12px`, `150%`, `16px/20px`).
    ///
    /// Returns the size and whether a line-height suffix was present. The size is
    /// returned exactly as written, without density scaling.
    pub fn parse_size(&self, token: &str) -> Option<(FontSize, bool)> {
        let (size_part, has_line_height) = match token.split_once('/') {
            Some((size, _line_height)) => (size, true),
            None => (token, false),
        };

        let num_end = size_part
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
            .map(|(i, _)| i)
            .unwrap_or(size_part.len());
        if num_end == 0 {
            return None;
        }

        let value: f64 = size_part[..num_end].parse().ok()?;
        let unit = size_part[num_end..].to_ascii_lowercase();
        if unit != "%" && !self.size_units.contains(&unit.as_str()) {
            return None;
        }

        Some((FontSize { value, unit }, has_line_height))
    }

    /// Parse a font string, dividing the size by `density`.
    ///
    /// Never fails: anything unrecognizable yields the default descriptor.
    pub fn parse(&self, raw: &str, density: Density) -> FontDescriptor {
        let raw = raw.trim();
        if raw.is_empty() {
            return self.default_descriptor();
        }
        if let Some(system) = self.system_font(raw) {
            return FontDescriptor::System(system);
        }

        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let Some((size_index, (mut size, has_line_height))) = tokens
            .iter()
            .enumerate()
            .find_map(|(i, t)| self.parse_size(t).map(|s| (i, s)))
        else {
            log::debug!(target: "canvas", "font '{}' has no size, using default", raw);
            return self.default_descriptor();
        };

        let mut parts = self.default_parts();
        for token in &tokens[..size_index] {
            match self.classify(token) {
                Some(FontSlot::Style) => parts.style = token.to_ascii_lowercase(),
                Some(FontSlot::Variant) => parts.variant = token.to_ascii_lowercase(),
                Some(FontSlot::Weight) => parts.weight = token.to_ascii_lowercase(),
                Some(FontSlot::Normal) => {}
                None => {
                    log::debug!(
                        target: "canvas",
                        "font '{}' has unknown token '{}', using default",
                        raw,
                        token
                    );
                    return self.default_descriptor();
                }
            }
        }

        if has_line_height {
            LINE_HEIGHT_NOTICE.call_once(|| {
                log::warn!(
                    target: "canvas",
                    "line-height in font shorthand is not supported and will be dropped"
                );
            });
        }

        if !size.is_percentage() {
            size.value = density.to_logical(size.value);
        }
        parts.size = size;

        let family = tokens[size_index + 1..].join(" ");
        if !family.is_empty() {
            parts.family = family;
        }

        FontDescriptor::Parts(parts)
    }

    /// Format a descriptor as a five-token font string, multiplying the size by
    /// `density`. System fonts pass through as their keyword.
    pub fn format(&self, descriptor: &FontDescriptor, density: Density) -> String {
        match descriptor {
            FontDescriptor::System(system) => system.as_str().to_string(),
            FontDescriptor::Parts(parts) => {
                let size = if parts.size.is_percentage() {
                    parts.size.clone()
                } else {
                    FontSize {
                        value: density.to_device(parts.size.value),
                        unit: parts.size.unit.clone(),
                    }
                };
                format!(
                    "{} {} {} {} {}",
                    parts.style, parts.variant, parts.weight, size, parts.family
                )
            }
        }
    }
}

/// Parse a font string with the default grammar.
pub fn parse_font(raw: &str, density: Density) -> FontDescriptor {
    FontGrammar::default().parse(raw, density)
}

/// Format a descriptor with the default grammar.
pub fn format_font(descriptor: &FontDescriptor, density: Density) -> String {
    FontGrammar::default().format(descriptor, density)
}

fn is_numeric_weight(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 3 && (b'1'..=b'9').contains(&bytes[0]) && &bytes[1..] == b"00"
}

/// Print a number with at most six decimals and no trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    // Adding 0.0 turns -0.0 into 0.0.
    format!("{}", rounded + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(value: f64) -> Density {
        Density::new(value).unwrap()
    }

    #[test]
    fn test_empty_font_is_default() {
        let font = parse_font("", d(1.0));
        assert_eq!(font, FontGrammar::default().default_descriptor());
        assert_eq!(
            format_font(&font, d(1.0)),
            "normal normal normal 10px sans-serif"
        );
    }

    #[test]
    fn test_simple_font() {
        let font = parse_font("12px Arial", d(1.0));
        assert_eq!(font.size(), Some(&FontSize::px(12.0)));
        assert_eq!(font.family(), Some("Arial"));
        assert_eq!(font.weight(), Some("normal"));
        assert_eq!(font.style(), Some("normal"));
    }

    #[test]
    fn test_all_parts() {
        let font = parse_font("italic small-caps bold 14pt Times New Roman", d(1.0));
        assert_eq!(font.style(), Some("italic"));
        assert_eq!(font.variant(), Some("small-caps"));
        assert_eq!(font.weight(), Some("bold"));
        assert_eq!(
            font.size(),
            Some(&FontSize {
                value: 14.0,
                unit: "pt".to_string()
            })
        );
        assert_eq!(font.family(), Some("Times New Roman"));
    }

    #[rstest]
    #[case("caption", SystemFont::Caption)]
    #[case("icon", SystemFont::Icon)]
    #[case("menu", SystemFont::Menu)]
    #[case("message-box", SystemFont::MessageBox)]
    #[case("small-caption", SystemFont::SmallCaption)]
    #[case("status-bar", SystemFont::StatusBar)]
    fn test_system_fonts(#[case] raw: &str, #[case] expected: SystemFont) {
        let font = parse_font(raw, d(2.0));
        assert_eq!(font, FontDescriptor::System(expected));
        assert_eq!(font.style(), None);
        assert_eq!(font.size(), None);
        assert_eq!(font.family(), None);
        assert_eq!(format_font(&font, d(2.0)), raw);
    }

    #[rstest]
    #[case("bold Arial")]
    #[case("fancy 12px Arial")]
    #[case("12 Arial")]
    #[case("italic")]
    fn test_malformed_falls_back_to_default(#[case] raw: &str) {
        assert_eq!(
            parse_font(raw, d(1.0)),
            FontGrammar::default().default_descriptor()
        );
    }

    #[test]
    fn test_numeric_weight() {
        let font = parse_font("600 12px Helvetica", d(1.0));
        assert_eq!(font.weight(), Some("600"));
        assert_eq!(
            parse_font("650 12px Helvetica", d(1.0)),
            FontGrammar::default().default_descriptor()
        );
    }

    #[test]
    fn test_normal_tokens_discarded() {
        let font = parse_font("normal bold 12px serif", d(1.0));
        assert_eq!(font.style(), Some("normal"));
        assert_eq!(font.weight(), Some("bold"));
    }

    #[test]
    fn test_density_scaling() {
        let font = parse_font("bold 24px Arial", d(2.0));
        assert_eq!(font.size(), Some(&FontSize::px(12.0)));
        assert_eq!(
            format_font(&font, d(2.0)),
            "normal normal bold 24px Arial"
        );
        assert_eq!(format_font(&font, d(3.0)), "normal normal bold 36px Arial");
    }

    #[test]
    fn test_percentage_never_scaled() {
        let font = parse_font("150% serif", d(2.0));
        assert_eq!(
            font.size(),
            Some(&FontSize {
                value: 150.0,
                unit: "%".to_string()
            })
        );
        assert_eq!(format_font(&font, d(2.0)), "normal normal normal 150% serif");
    }

    #[test]
    fn test_line_height_dropped() {
        let font = parse_font("16px/20px Arial", d(1.0));
        assert_eq!(font.size(), Some(&FontSize::px(16.0)));
        assert_eq!(font.family(), Some("Arial"));
        assert_eq!(format_font(&font, d(1.0)), "normal normal normal 16px Arial");
    }

    #[test]
    fn test_missing_family_uses_default() {
        let font = parse_font("12px", d(1.0));
        assert_eq!(font.family(), Some("sans-serif"));
    }

    #[test]
    fn test_family_list_kept() {
        let font = parse_font("12px Arial, Helvetica, sans-serif", d(1.0));
        assert_eq!(font.family(), Some("Arial, Helvetica, sans-serif"));
    }

    #[rstest]
    #[case("12px Arial", 1.0)]
    #[case("italic bold 13px Helvetica Neue", 3.0)]
    #[case("small-caps 10.5pt serif", 1.5)]
    #[case("oblique 700 7px monospace", 0.3)]
    #[case("menu", 2.0)]
    fn test_format_parse_idempotent(#[case] raw: &str, #[case] density: f64) {
        let density = d(density);
        let once = format_font(&parse_font(raw, density), density);
        let twice = format_font(&parse_font(&once, density), density);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_grammar_defaults() {
        let grammar = FontGrammar::new()
            .with_default_family("Inter")
            .with_default_size(14.0);
        assert_eq!(
            grammar.format(&grammar.parse("", Density::default()), Density::default()),
            "normal normal normal 14px Inter"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.1 * 3.0), "0.3");
        assert_eq!(format_number(-0.0), "0");
    }
}
