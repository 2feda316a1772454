//! The chainable drawing facade.
//!
//! [`Canvas`] wraps a [`RenderingContext2d`] and speaks logical units: every length
//! passed in is multiplied by the current [`Density`] before it reaches the context,
//! and every length read back is divided by it. Mutating methods return `&mut Self`
//! so calls can be chained.
//!
//! The implementation is split across submodules by concern:
//! - `drawing`: fill, stroke, clip, rectangles and generated shapes
//! - `path_ops`: path construction and point-list plotting
//! - `transform`: transforms
//! - `text_rendering`: fonts, text drawing and text blocks
//! - `image_ops`: images, pixel data, gradients, patterns and hit testing
//! - `flow`: `tap`, `repeat` and `for_each`

mod drawing;
mod flow;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

pub use flow::IterationControl;
pub use text_rendering::TextBlockOptions;

use crate::context::{ContextSource, NumberProperty, RenderingContext2d, TextProperty};
use crate::density::Density;
use crate::error::{CanvasError, CanvasResult};
use crate::font::{FontDescriptor, FontGrammar};
use crate::style::{LineCap, LineJoin, Paint, TextAlign, TextBaseline};
use std::collections::HashMap;

/// A length as last set through the facade.
///
/// Reused by getters only while the context still holds `device` and the density has
/// not changed, so that `set(w); get() == w` holds exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedLength {
    logical: f64,
    device: f64,
    density: Density,
}

#[derive(Debug, Clone, PartialEq)]
struct CachedDash {
    logical: Vec<f64>,
    device: Vec<f64>,
    density: Density,
}

/// The font as last set through the facade, with its size in logical units.
#[derive(Debug, Clone, PartialEq)]
struct CachedFont {
    logical: FontDescriptor,
    device: String,
    density: Density,
}

/// Facade state saved by [`Canvas::save`].
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    density: Density,
    lengths: HashMap<NumberProperty, CachedLength>,
    dash: Option<CachedDash>,
    font: Option<CachedFont>,
}

/// Builder for [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct CanvasBuilder {
    density: Density,
    font_grammar: FontGrammar,
}

impl CanvasBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial density. Non-positive or non-finite values are ignored.
    pub fn density(mut self, density: f64) -> Self {
        if let Some(density) = Density::new(density) {
            self.density = density;
        }
        self
    }

    /// Keyword tables and defaults used for font strings.
    pub fn font_grammar(mut self, font_grammar: FontGrammar) -> Self {
        self.font_grammar = font_grammar;
        self
    }

    /// Obtain a context from `source` and wrap it.
    pub fn build<S: ContextSource>(self, source: S) -> CanvasResult<Canvas<S::Context>> {
        let ctx = source.context_2d().ok_or(CanvasError::ContextUnavailable)?;
        Ok(self.build_with_context(ctx))
    }

    /// Wrap an existing context.
    pub fn build_with_context<C: RenderingContext2d>(self, ctx: C) -> Canvas<C> {
        log::debug!(target: "canvas", "create facade density={}", self.density.get());
        Canvas {
            ctx,
            density: self.density,
            font_grammar: self.font_grammar,
            lengths: HashMap::new(),
            dash: None,
            font: None,
            state_stack: Vec::new(),
        }
    }
}

/// Density-aware, chainable facade over a 2D rendering context.
pub struct Canvas<C: RenderingContext2d> {
    ctx: C,
    density: Density,
    font_grammar: FontGrammar,
    lengths: HashMap<NumberProperty, CachedLength>,
    dash: Option<CachedDash>,
    font: Option<CachedFont>,
    state_stack: Vec<StateSnapshot>,
}

impl<C: RenderingContext2d> Canvas<C> {
    /// Wrap `ctx` with density 1 and the default font grammar.
    pub fn new(ctx: C) -> Self {
        CanvasBuilder::default().build_with_context(ctx)
    }

    pub fn builder() -> CanvasBuilder {
        CanvasBuilder::default()
    }

    /// The underlying context.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// The underlying context, mutably. Calls made through it bypass density conversion.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn into_inner(self) -> C {
        self.ctx
    }

    pub fn font_grammar(&self) -> &FontGrammar {
        &self.font_grammar
    }

    // --- Density ---

    pub fn density(&self) -> f64 {
        self.density.get()
    }

    /// Change the density for subsequent calls.
    ///
    /// Nothing already sent to the context is rescaled. Non-positive or non-finite
    /// values are ignored.
    pub fn set_density(&mut self, density: f64) -> &mut Self {
        match Density::new(density) {
            Some(density) => {
                log::debug!(target: "canvas", "setDensity {}", density.get());
                self.density = density;
            }
            None => {
                log::debug!(target: "canvas", "ignoring invalid density {}", density);
            }
        }
        self
    }

    // --- State ---

    /// Push the context state and the facade's density state.
    pub fn save(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(StateSnapshot {
            density: self.density,
            lengths: self.lengths.clone(),
            dash: self.dash.clone(),
            font: self.font.clone(),
        });
        self.ctx.save();
        self
    }

    /// Pop the context state, reapplying the density that was active at the matching
    /// `save`. With nothing saved only the context is told to restore.
    pub fn restore(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "restore");
        if let Some(snapshot) = self.state_stack.pop() {
            self.density = snapshot.density;
            self.lengths = snapshot.lengths;
            self.dash = snapshot.dash;
            self.font = snapshot.font;
        }
        self.ctx.restore();
        self
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    // --- Table-driven properties ---

    /// Read a numeric property, in logical units when it is a length.
    pub fn number_property(&self, property: NumberProperty) -> f64 {
        let raw = self.ctx.number(property);
        if !property.is_length() {
            return raw;
        }
        match self.lengths.get(&property) {
            Some(cached) if cached.device == raw && cached.density == self.density => {
                cached.logical
            }
            _ => self.density.to_logical(raw),
        }
    }

    /// Write a numeric property, converting lengths to device pixels.
    pub fn set_number_property(&mut self, property: NumberProperty, value: f64) -> &mut Self {
        log::debug!(target: "canvas", "set {} {}", property.key(), value);
        if property.is_length() {
            let device = self.density.to_device(value);
            self.ctx.set_number(property, device);
            self.lengths.insert(
                property,
                CachedLength {
                    logical: value,
                    device,
                    density: self.density,
                },
            );
        } else {
            self.ctx.set_number(property, value);
        }
        self
    }

    pub fn text_property(&self, property: TextProperty) -> String {
        self.ctx.text(property)
    }

    pub fn set_text_property(&mut self, property: TextProperty, value: &str) -> &mut Self {
        log::debug!(target: "canvas", "set {} {}", property.key(), value);
        self.ctx.set_text(property, value);
        self
    }

    /// Dash pattern in logical units.
    pub fn line_dash(&self) -> Vec<f64> {
        let raw = self.ctx.line_dash();
        match &self.dash {
            Some(cached) if cached.device == raw && cached.density == self.density => {
                cached.logical.clone()
            }
            _ => self.density.all_to_logical(&raw),
        }
    }

    pub fn set_line_dash(&mut self, segments: &[f64]) -> &mut Self {
        log::debug!(target: "canvas", "setLineDash {:?}", segments);
        let device = self.density.all_to_device(segments);
        self.ctx.set_line_dash(&device);
        self.dash = Some(CachedDash {
            logical: segments.to_vec(),
            device,
            density: self.density,
        });
        self
    }

    pub fn fill_style(&self) -> Paint {
        self.ctx.fill_style()
    }

    pub fn set_fill_style(&mut self, paint: impl Into<Paint>) -> &mut Self {
        let paint = paint.into();
        log::debug!(target: "canvas", "setFillStyle {:?}", paint);
        self.ctx.set_fill_style(paint);
        self
    }

    pub fn stroke_style(&self) -> Paint {
        self.ctx.stroke_style()
    }

    pub fn set_stroke_style(&mut self, paint: impl Into<Paint>) -> &mut Self {
        let paint = paint.into();
        log::debug!(target: "canvas", "setStrokeStyle {:?}", paint);
        self.ctx.set_stroke_style(paint);
        self
    }

    // --- Element sizing ---

    /// Surface width in logical units.
    pub fn width(&self) -> f64 {
        self.density.to_logical(self.ctx.canvas_width() as f64)
    }

    /// Surface height in logical units.
    pub fn height(&self) -> f64 {
        self.density.to_logical(self.ctx.canvas_height() as f64)
    }

    /// Resize the surface to `width` x `height` logical units.
    pub fn set_size(&mut self, width: f64, height: f64) -> &mut Self {
        let width = device_extent(self.density.to_device(width));
        let height = device_extent(self.density.to_device(height));
        log::debug!(target: "canvas", "setSize {} {}", width, height);
        self.ctx.set_canvas_width(width);
        self.ctx.set_canvas_height(height);
        self
    }

    /// Layout box of the element, unaffected by density.
    pub fn bounding_rect(&self) -> kurbo::Rect {
        self.ctx.bounding_rect()
    }
}

fn device_extent(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Getter/setter pairs for numeric properties.
macro_rules! number_properties {
    ($( $(#[$meta:meta])* $getter:ident, $setter:ident => $property:ident; )+) => {
        impl<C: RenderingContext2d> Canvas<C> {
            $(
                $(#[$meta])*
                pub fn $getter(&self) -> f64 {
                    self.number_property(NumberProperty::$property)
                }

                pub fn $setter(&mut self, value: f64) -> &mut Self {
                    self.set_number_property(NumberProperty::$property, value)
                }
            )+
        }
    };
}

/// Getter/setter pairs for free-form string properties.
macro_rules! string_properties {
    ($( $(#[$meta:meta])* $getter:ident, $setter:ident => $property:ident; )+) => {
        impl<C: RenderingContext2d> Canvas<C> {
            $(
                $(#[$meta])*
                pub fn $getter(&self) -> String {
                    self.text_property(TextProperty::$property)
                }

                pub fn $setter(&mut self, value: &str) -> &mut Self {
                    self.set_text_property(TextProperty::$property, value)
                }
            )+
        }
    };
}

/// Getter/setter pairs for keyword properties. An unrecognized value held by the
/// context reads back as the keyword's default.
macro_rules! keyword_properties {
    ($( $(#[$meta:meta])* $getter:ident, $setter:ident: $ty:ty => $property:ident; )+) => {
        impl<C: RenderingContext2d> Canvas<C> {
            $(
                $(#[$meta])*
                pub fn $getter(&self) -> $ty {
                    self.text_property(TextProperty::$property)
                        .parse()
                        .unwrap_or_default()
                }

                pub fn $setter(&mut self, value: $ty) -> &mut Self {
                    self.set_text_property(TextProperty::$property, value.as_str())
                }
            )+
        }
    };
}

number_properties! {
    /// Opacity applied to everything drawn, 0 to 1.
    global_alpha, set_global_alpha => GlobalAlpha;
    /// Stroke width.
    line_width, set_line_width => LineWidth;
    line_dash_offset, set_line_dash_offset => LineDashOffset;
    /// Unitless; never density-scaled.
    miter_limit, set_miter_limit => MiterLimit;
    shadow_blur, set_shadow_blur => ShadowBlur;
    shadow_offset_x, set_shadow_offset_x => ShadowOffsetX;
    shadow_offset_y, set_shadow_offset_y => ShadowOffsetY;
}

string_properties! {
    global_composite_operation, set_global_composite_operation => GlobalCompositeOperation;
    shadow_color, set_shadow_color => ShadowColor;
}

keyword_properties! {
    line_cap, set_line_cap: LineCap => LineCap;
    line_join, set_line_join: LineJoin => LineJoin;
    text_align, set_text_align: TextAlign => TextAlign;
    text_baseline, set_text_baseline: TextBaseline => TextBaseline;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, RecordingContext};

    fn canvas() -> Canvas<RecordingContext> {
        Canvas::new(RecordingContext::new(200, 100))
    }

    #[test]
    fn test_build_without_context_fails() {
        let result = CanvasBuilder::new().build(None::<RecordingContext>);
        assert!(matches!(result, Err(CanvasError::ContextUnavailable)));
    }

    #[test]
    fn test_builder_density() {
        let canvas = Canvas::<RecordingContext>::builder()
            .density(2.0)
            .build(Some(RecordingContext::new(200, 100)))
            .unwrap();
        assert_eq!(canvas.density(), 2.0);
        assert_eq!(canvas.width(), 100.0);
        assert_eq!(canvas.height(), 50.0);
    }

    #[test]
    fn test_invalid_density_ignored() {
        let mut canvas = canvas();
        canvas.set_density(3.0).set_density(0.0).set_density(f64::NAN);
        assert_eq!(canvas.density(), 3.0);
    }

    #[test]
    fn test_length_scaled_alpha_not() {
        let mut canvas = canvas();
        canvas.set_density(2.0).set_line_width(3.0).set_global_alpha(0.5);
        assert_eq!(
            canvas.context().calls(),
            &[
                Call::SetNumber(NumberProperty::LineWidth, 6.0),
                Call::SetNumber(NumberProperty::GlobalAlpha, 0.5),
            ]
        );
        assert_eq!(canvas.line_width(), 3.0);
        assert_eq!(canvas.global_alpha(), 0.5);
    }

    #[test]
    fn test_density_change_reads_through_new_density() {
        let mut canvas = canvas();
        canvas.set_line_width(4.0).set_density(2.0);
        assert_eq!(canvas.line_width(), 2.0);
    }

    #[test]
    fn test_restore_reapplies_saved_density() {
        let mut canvas = canvas();
        canvas
            .set_density(2.0)
            .set_line_width(5.0)
            .save()
            .set_density(4.0)
            .set_line_width(1.0);
        assert_eq!(canvas.line_width(), 1.0);
        canvas.restore();
        assert_eq!(canvas.density(), 2.0);
        assert_eq!(canvas.line_width(), 5.0);
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn test_unmatched_restore_still_forwarded() {
        let mut canvas = canvas();
        canvas.set_density(2.0).restore();
        assert_eq!(canvas.density(), 2.0);
        assert_eq!(canvas.context().calls(), &[Call::Restore]);
    }

    #[test]
    fn test_line_dash_round_trip() {
        let mut canvas = canvas();
        canvas.set_density(3.0).set_line_dash(&[0.1, 0.2]);
        assert_eq!(canvas.context().line_dash().len(), 2);
        assert_eq!(canvas.line_dash(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_keyword_properties() {
        let mut canvas = canvas();
        assert_eq!(canvas.line_cap(), LineCap::Butt);
        canvas
            .set_line_cap(LineCap::Round)
            .set_line_join(LineJoin::Bevel)
            .set_text_align(TextAlign::Center)
            .set_text_baseline(TextBaseline::Middle)
            .set_shadow_color("red");
        assert_eq!(canvas.line_cap(), LineCap::Round);
        assert_eq!(canvas.line_join(), LineJoin::Bevel);
        assert_eq!(canvas.text_align(), TextAlign::Center);
        assert_eq!(canvas.text_baseline(), TextBaseline::Middle);
        assert_eq!(canvas.shadow_color(), "red");
    }

    #[test]
    fn test_set_size_in_logical_units() {
        let mut canvas = canvas();
        canvas.set_density(2.0).set_size(50.0, 25.5);
        assert_eq!(canvas.context().canvas_width(), 100);
        assert_eq!(canvas.context().canvas_height(), 51);
        assert_eq!(canvas.width(), 50.0);
        assert_eq!(
            canvas.bounding_rect(),
            kurbo::Rect::new(0.0, 0.0, 100.0, 51.0)
        );
    }
}
