//! Text measurement with cosmic-text.
//!
//! [`CosmicMeasure`] shapes text against a font database so that [`layout`] can wrap
//! text without a live rendering context.
//!
//! [`layout`]: crate::layout::layout

use crate::font::{FontDescriptor, FontGrammar, FontParts};
use crate::layout::TextMeasure;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};

/// Builder for [`CosmicMeasure`].
#[derive(Default)]
pub struct CosmicMeasureBuilder {
    font_db: Option<fontdb::Database>,
    font: Option<FontDescriptor>,
    locale: Option<String>,
}

impl CosmicMeasureBuilder {
    /// Use a pre-populated font database instead of scanning system fonts.
    pub fn with_font_db(mut self, font_db: fontdb::Database) -> Self {
        self.font_db = Some(font_db);
        self
    }

    /// Font used by [`TextMeasure::measure`].
    pub fn font(mut self, font: FontDescriptor) -> Self {
        self.font = Some(font);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn build(self) -> CosmicMeasure {
        let font_db = self.font_db.unwrap_or_else(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            db
        });
        let locale = self.locale.unwrap_or_else(|| "en".to_string());
        let font = self
            .font
            .unwrap_or_else(|| FontGrammar::default().default_descriptor());

        CosmicMeasure {
            font_system: FontSystem::new_with_locale_and_db(locale, font_db),
            font,
        }
    }
}

/// Measures text advance widths by shaping it with cosmic-text.
pub struct CosmicMeasure {
    font_system: FontSystem,
    font: FontDescriptor,
}

impl CosmicMeasure {
    pub fn builder() -> CosmicMeasureBuilder {
        CosmicMeasureBuilder::default()
    }

    /// The font used by [`TextMeasure::measure`].
    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    pub fn set_font(&mut self, font: FontDescriptor) {
        self.font = font;
    }

    /// Width of `text` set in `font`, in the font's size units (CSS pixels).
    pub fn measure_in(&mut self, text: &str, font: &FontDescriptor) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        // System fonts have no addressable parts; measure them with the default face.
        let fallback;
        let parts = match font.parts() {
            Some(parts) => parts,
            None => {
                fallback = FontGrammar::default().default_parts();
                &fallback
            }
        };

        let size_px = parts.size.to_px() as f32;
        if size_px <= 0.0 {
            return 0.0;
        }

        let metrics = Metrics::new(size_px, size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let family_name = primary_family(&parts.family);
        let attrs = Attrs::new()
            .family(family(&family_name))
            .weight(weight(parts))
            .style(style(parts));

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut width: f32 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
        }
        width as f64
    }
}

impl TextMeasure for CosmicMeasure {
    fn measure(&mut self, text: &str) -> f64 {
        let font = self.font.clone();
        self.measure_in(text, &font)
    }
}

/// First entry of a comma-separated family list, without quotes.
fn primary_family(family: &str) -> String {
    family
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

fn family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "" | "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn weight(parts: &FontParts) -> Weight {
    match parts.weight.as_str() {
        "bold" => Weight::BOLD,
        "bolder" => Weight::EXTRA_BOLD,
        "lighter" => Weight::LIGHT,
        numeric => numeric.parse().map(Weight).unwrap_or(Weight::NORMAL),
    }
}

fn style(parts: &FontParts) -> Style {
    match parts.style.as_str() {
        "italic" => Style::Italic,
        "oblique" => Style::Oblique,
        _ => Style::Normal,
    }
}
