//! Font and text operations for Canvas.
//!
//! The context's font string is the only copy of the font: part accessors parse it on
//! every read and write a reformatted string back on every write. The logical size last
//! written is kept alongside while the context still holds that exact string.

use super::{Canvas, CachedFont};
use crate::context::{RenderingContext2d, TextMetrics, TextProperty};
use crate::density::Density;
use crate::font::{FontDescriptor, FontParts, FontSize, FontSlot};
use crate::layout::{layout, BreakMode, LayoutOptions, TextLayout};
use crate::style::Paint;

/// Options for [`Canvas::fill_text_block`] and [`Canvas::stroke_text_block`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBlockOptions {
    /// Wrap width in logical units. `None` only breaks at newlines.
    pub max_width: Option<f64>,
    /// Distance between baselines. Defaults to 1.2 times the font size.
    pub line_height: Option<f64>,
    pub break_mode: BreakMode,
}

impl<C: RenderingContext2d> Canvas<C> {
    // --- Font ---

    /// The current font, parsed with sizes in logical units.
    pub fn font_descriptor(&self) -> FontDescriptor {
        let raw = self.ctx.text(TextProperty::Font);
        match &self.font {
            Some(cached) if cached.device == raw && cached.density == self.density => {
                cached.logical.clone()
            }
            _ => self.font_grammar.parse(&raw, self.density),
        }
    }

    /// The current font as a normalized string in logical units.
    pub fn font(&self) -> String {
        self.font_grammar
            .format(&self.font_descriptor(), Density::default())
    }

    /// Set the font from a string in logical units. Malformed strings set the
    /// default font.
    pub fn set_font(&mut self, font: &str) -> &mut Self {
        let descriptor = self.font_grammar.parse(font, Density::default());
        self.set_font_descriptor(&descriptor)
    }

    pub fn set_font_descriptor(&mut self, descriptor: &FontDescriptor) -> &mut Self {
        let raw = self.font_grammar.format(descriptor, self.density);
        log::debug!(target: "canvas", "setFont {}", raw);
        self.ctx.set_text(TextProperty::Font, &raw);

        // The written string rounds the size; remember the exact logical one.
        let mut logical = self.font_grammar.parse(&raw, self.density);
        if let (FontDescriptor::Parts(parsed), FontDescriptor::Parts(given)) =
            (&mut logical, descriptor)
        {
            if parsed.size.unit == given.size.unit {
                parsed.size.value = given.size.value;
            }
        }
        self.font = Some(CachedFont {
            logical,
            device: raw,
            density: self.density,
        });
        self
    }

    /// `None` while a system font is set.
    pub fn font_style(&self) -> Option<String> {
        self.font_descriptor().style().map(str::to_string)
    }

    /// Set the style part (`normal`, `italic`, `oblique`). Other values are ignored.
    pub fn set_font_style(&mut self, style: &str) -> &mut Self {
        self.set_font_keyword(FontSlot::Style, style)
    }

    pub fn font_variant(&self) -> Option<String> {
        self.font_descriptor().variant().map(str::to_string)
    }

    /// Set the variant part (`normal`, `small-caps`). Other values are ignored.
    pub fn set_font_variant(&mut self, variant: &str) -> &mut Self {
        self.set_font_keyword(FontSlot::Variant, variant)
    }

    pub fn font_weight(&self) -> Option<String> {
        self.font_descriptor().weight().map(str::to_string)
    }

    /// Set the weight part (`normal`, `bold`, `bolder`, `lighter`, `100`..`900`).
    /// Other values are ignored.
    pub fn set_font_weight(&mut self, weight: &str) -> &mut Self {
        self.set_font_keyword(FontSlot::Weight, weight)
    }

    /// Font size in logical units.
    pub fn font_size(&self) -> Option<FontSize> {
        self.font_descriptor().size().cloned()
    }

    /// Set the font size. Numbers are logical pixels.
    pub fn set_font_size(&mut self, size: impl Into<FontSize>) -> &mut Self {
        let size = size.into();
        self.update_font_parts(|parts| parts.size = size)
    }

    pub fn font_family(&self) -> Option<String> {
        self.font_descriptor().family().map(str::to_string)
    }

    /// Set the family. An empty string is ignored.
    pub fn set_font_family(&mut self, family: &str) -> &mut Self {
        let family = family.trim();
        if family.is_empty() {
            return self;
        }
        self.update_font_parts(|parts| parts.family = family.to_string())
    }

    fn set_font_keyword(&mut self, slot: FontSlot, value: &str) -> &mut Self {
        let value = value.to_ascii_lowercase();
        match self.font_grammar.classify(&value) {
            Some(found) if found == slot || found == FontSlot::Normal => {
                self.update_font_parts(|parts| match slot {
                    FontSlot::Style => parts.style = value,
                    FontSlot::Variant => parts.variant = value,
                    FontSlot::Weight => parts.weight = value,
                    FontSlot::Normal => {}
                })
            }
            _ => {
                log::debug!(target: "canvas", "ignoring font {:?} value '{}'", slot, value);
                self
            }
        }
    }

    /// Apply `update` to the current font parts and write the font back. A system font
    /// is replaced by the default parts first.
    fn update_font_parts(&mut self, update: impl FnOnce(&mut FontParts)) -> &mut Self {
        let mut parts = match self.font_descriptor() {
            FontDescriptor::Parts(parts) => parts,
            FontDescriptor::System(_) => self.font_grammar.default_parts(),
        };
        update(&mut parts);
        self.set_font_descriptor(&FontDescriptor::Parts(parts))
    }

    // --- Drawing text ---

    pub fn fill_text(&mut self, text: &str, x: f64, y: f64) -> &mut Self {
        self.draw_text(text, x, y, None, false)
    }

    /// Fill text, compressing it horizontally to fit `max_width` if needed.
    pub fn fill_text_max_width(&mut self, text: &str, x: f64, y: f64, max_width: f64) -> &mut Self {
        self.draw_text(text, x, y, Some(max_width), false)
    }

    pub fn fill_text_with(&mut self, text: &str, x: f64, y: f64, paint: impl Into<Paint>) -> &mut Self {
        self.set_fill_style(paint).fill_text(text, x, y)
    }

    pub fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> &mut Self {
        self.draw_text(text, x, y, None, true)
    }

    pub fn stroke_text_max_width(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        max_width: f64,
    ) -> &mut Self {
        self.draw_text(text, x, y, Some(max_width), true)
    }

    pub fn stroke_text_with(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        paint: impl Into<Paint>,
    ) -> &mut Self {
        self.set_stroke_style(paint).stroke_text(text, x, y)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
        stroke: bool,
    ) -> &mut Self {
        let (dx, dy) = self.density.point_to_device(x, y);
        let max_width = max_width.map(|w| self.density.to_device(w));
        if stroke {
            log::debug!(target: "canvas", "strokeText '{}' {} {}", text, x, y);
            self.ctx.stroke_text(text, dx, dy, max_width);
        } else {
            log::debug!(target: "canvas", "fillText '{}' {} {}", text, x, y);
            self.ctx.fill_text(text, dx, dy, max_width);
        }
        self
    }

    /// Measure `text` in the current font, in logical units.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        let metrics = self.ctx.measure_text(text);
        TextMetrics {
            width: self.density.to_logical(metrics.width),
            actual_bounding_box_ascent: self
                .density
                .to_logical(metrics.actual_bounding_box_ascent),
            actual_bounding_box_descent: self
                .density
                .to_logical(metrics.actual_bounding_box_descent),
        }
    }

    pub fn measure_text_width(&mut self, text: &str) -> f64 {
        self.measure_text(text).width
    }

    // --- Text blocks ---

    /// Lay out `text` in the current font. Line offsets are logical units.
    pub fn layout_text(&mut self, text: &str, options: &TextBlockOptions) -> TextLayout {
        let line_height = options
            .line_height
            .unwrap_or_else(|| self.default_line_height());
        let layout_options = LayoutOptions {
            max_width: options.max_width,
            line_height,
            break_mode: options.break_mode,
        };
        let density = self.density;
        let ctx = &mut self.ctx;
        let mut measure = |s: &str| density.to_logical(ctx.measure_text(s).width);
        layout(text, &layout_options, &mut measure)
    }

    /// Fill wrapped text with the first baseline at `(x, y)`.
    pub fn fill_text_block(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        options: &TextBlockOptions,
    ) -> &mut Self {
        let block = self.layout_text(text, options);
        log::debug!(target: "canvas", "fillTextBlock {} lines", block.len());
        for line in &block.lines {
            self.draw_text(&line.text, x, y + line.y, None, false);
        }
        self
    }

    /// Stroke wrapped text with the first baseline at `(x, y)`.
    pub fn stroke_text_block(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        options: &TextBlockOptions,
    ) -> &mut Self {
        let block = self.layout_text(text, options);
        log::debug!(target: "canvas", "strokeTextBlock {} lines", block.len());
        for line in &block.lines {
            self.draw_text(&line.text, x, y + line.y, None, true);
        }
        self
    }

    fn default_line_height(&self) -> f64 {
        let size = match self.font_descriptor() {
            FontDescriptor::Parts(parts) => parts.size,
            FontDescriptor::System(_) => self.font_grammar.default_parts().size,
        };
        size.to_px() * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontSize;
    use crate::recording::{Call, RecordingContext};

    fn canvas(density: f64) -> Canvas<RecordingContext> {
        Canvas::<RecordingContext>::builder()
            .density(density)
            .build_with_context(RecordingContext::new(200, 100))
    }

    #[test]
    fn test_font_written_in_device_units() {
        let mut canvas = canvas(2.0);
        canvas.set_font("bold 12px Arial");
        assert_eq!(
            canvas.context().text(TextProperty::Font),
            "normal normal bold 24px Arial"
        );
        assert_eq!(canvas.font(), "normal normal bold 12px Arial");
        assert_eq!(canvas.font_size(), Some(FontSize::px(12.0)));
    }

    #[test]
    fn test_part_setters() {
        let mut canvas = canvas(1.0);
        canvas
            .set_font_style("italic")
            .set_font_weight("700")
            .set_font_variant("small-caps")
            .set_font_size(20.0)
            .set_font_family("Georgia, serif");
        assert_eq!(canvas.font(), "italic small-caps 700 20px Georgia, serif");
    }

    #[test]
    fn test_invalid_part_ignored() {
        let mut canvas = canvas(1.0);
        canvas.set_font("12px Arial");
        let calls = canvas.context().calls().len();
        canvas
            .set_font_weight("heavy")
            .set_font_style("bold")
            .set_font_family("  ");
        assert_eq!(canvas.context().calls().len(), calls);
        assert_eq!(canvas.font_weight().as_deref(), Some("normal"));
    }

    #[test]
    fn test_system_font_parts() {
        let mut canvas = canvas(1.0);
        canvas.set_font("menu");
        assert_eq!(canvas.font(), "menu");
        assert_eq!(canvas.font_style(), None);
        assert_eq!(canvas.font_size(), None);
        assert_eq!(canvas.font_family(), None);

        canvas.set_font_weight("bold");
        assert_eq!(canvas.font(), "normal normal bold 10px sans-serif");
    }

    #[test]
    fn test_text_coordinates_scaled() {
        let mut canvas = canvas(2.0);
        canvas
            .fill_text("hi", 1.0, 2.0)
            .stroke_text_max_width("yo", 3.0, 4.0, 10.0);
        assert_eq!(
            canvas.context().calls(),
            &[
                Call::FillText {
                    text: "hi".to_string(),
                    x: 2.0,
                    y: 4.0,
                    max_width: None
                },
                Call::StrokeText {
                    text: "yo".to_string(),
                    x: 6.0,
                    y: 8.0,
                    max_width: Some(20.0)
                },
            ]
        );
    }

    #[test]
    fn test_measure_in_logical_units() {
        let mut canvas = canvas(2.0);
        canvas.set_font("10px sans-serif");
        // The context measures 20px glyphs; the facade reports logical units.
        assert_eq!(canvas.measure_text_width("abc"), 30.0);
    }

    #[test]
    fn test_fill_text_block() {
        let mut canvas = canvas(1.0);
        canvas.set_font("10px sans-serif").context_mut().take_calls();
        canvas.fill_text_block(
            "aaa bbb\nccc",
            5.0,
            20.0,
            &TextBlockOptions {
                max_width: Some(50.0),
                ..Default::default()
            },
        );
        let lines: Vec<(String, f64)> = canvas
            .context()
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::FillText { text, y, .. } => Some((text.clone(), *y)),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                ("aaa".to_string(), 20.0),
                ("bbb".to_string(), 32.0),
                ("ccc".to_string(), 44.0),
            ]
        );
    }

    #[test]
    fn test_layout_text_custom_line_height() {
        let mut canvas = canvas(1.0);
        let block = canvas.layout_text(
            "a\nb",
            &TextBlockOptions {
                line_height: Some(30.0),
                ..Default::default()
            },
        );
        assert_eq!(block.lines[1].y, 30.0);
    }
}
