//! The rendering context the facade drives.
//!
//! [`RenderingContext2d`] is the minimum capability set of an immediate-mode 2D context.
//! Implementations receive device pixels only; the facade has already applied the
//! density by the time a call reaches them. Scalar and keyword properties are addressed
//! through the [`NumberProperty`] and [`TextProperty`] tables instead of one getter and
//! setter per property.

use crate::geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, ImageDrawParams,
    QuadraticBezierParams, RectParams,
};
use crate::style::{FillRule, Paint, PatternHandle, Repetition};
use kurbo::{Affine, Rect};

/// Numeric context properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberProperty {
    GlobalAlpha,
    LineWidth,
    LineDashOffset,
    MiterLimit,
    ShadowBlur,
    ShadowOffsetX,
    ShadowOffsetY,
}

impl NumberProperty {
    pub const ALL: [NumberProperty; 7] = [
        NumberProperty::GlobalAlpha,
        NumberProperty::LineWidth,
        NumberProperty::LineDashOffset,
        NumberProperty::MiterLimit,
        NumberProperty::ShadowBlur,
        NumberProperty::ShadowOffsetX,
        NumberProperty::ShadowOffsetY,
    ];

    /// The Canvas 2D attribute name.
    pub fn key(self) -> &'static str {
        match self {
            NumberProperty::GlobalAlpha => "globalAlpha",
            NumberProperty::LineWidth => "lineWidth",
            NumberProperty::LineDashOffset => "lineDashOffset",
            NumberProperty::MiterLimit => "miterLimit",
            NumberProperty::ShadowBlur => "shadowBlur",
            NumberProperty::ShadowOffsetX => "shadowOffsetX",
            NumberProperty::ShadowOffsetY => "shadowOffsetY",
        }
    }

    /// Whether the value is a device length and therefore density-scaled.
    pub fn is_length(self) -> bool {
        !matches!(self, NumberProperty::GlobalAlpha | NumberProperty::MiterLimit)
    }

    /// Initial value on a fresh context.
    pub fn initial_value(self) -> f64 {
        match self {
            NumberProperty::GlobalAlpha | NumberProperty::LineWidth => 1.0,
            NumberProperty::MiterLimit => 10.0,
            NumberProperty::LineDashOffset
            | NumberProperty::ShadowBlur
            | NumberProperty::ShadowOffsetX
            | NumberProperty::ShadowOffsetY => 0.0,
        }
    }
}

/// Keyword and string context properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextProperty {
    GlobalCompositeOperation,
    LineCap,
    LineJoin,
    ShadowColor,
    Font,
    TextAlign,
    TextBaseline,
}

impl TextProperty {
    pub const ALL: [TextProperty; 7] = [
        TextProperty::GlobalCompositeOperation,
        TextProperty::LineCap,
        TextProperty::LineJoin,
        TextProperty::ShadowColor,
        TextProperty::Font,
        TextProperty::TextAlign,
        TextProperty::TextBaseline,
    ];

    /// The Canvas 2D attribute name.
    pub fn key(self) -> &'static str {
        match self {
            TextProperty::GlobalCompositeOperation => "globalCompositeOperation",
            TextProperty::LineCap => "lineCap",
            TextProperty::LineJoin => "lineJoin",
            TextProperty::ShadowColor => "shadowColor",
            TextProperty::Font => "font",
            TextProperty::TextAlign => "textAlign",
            TextProperty::TextBaseline => "textBaseline",
        }
    }

    /// Initial value on a fresh context.
    pub fn initial_value(self) -> &'static str {
        match self {
            TextProperty::GlobalCompositeOperation => "source-over",
            TextProperty::LineCap => "butt",
            TextProperty::LineJoin => "miter",
            TextProperty::ShadowColor => "rgba(0, 0, 0, 0)",
            TextProperty::Font => "10px sans-serif",
            TextProperty::TextAlign => "start",
            TextProperty::TextBaseline => "alphabetic",
        }
    }
}

/// Text metrics returned by `measure_text`, in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text.
    pub width: f64,
    /// Distance from baseline to top of the bounding box.
    pub actual_bounding_box_ascent: f64,
    /// Distance from baseline to bottom of the bounding box.
    pub actual_bounding_box_descent: f64,
}

/// Non-premultiplied RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Transparent image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }
}

/// An immediate-mode 2D drawing context.
///
/// All lengths are device pixels.
pub trait RenderingContext2d {
    /// Image sources accepted by `draw_image` and `create_pattern`.
    type Image;

    // --- Properties ---

    fn number(&self, property: NumberProperty) -> f64;
    fn set_number(&mut self, property: NumberProperty, value: f64);
    fn text(&self, property: TextProperty) -> String;
    fn set_text(&mut self, property: TextProperty, value: &str);

    fn fill_style(&self) -> Paint;
    fn set_fill_style(&mut self, paint: Paint);
    fn stroke_style(&self) -> Paint;
    fn set_stroke_style(&mut self, paint: Paint);

    fn line_dash(&self) -> Vec<f64>;
    fn set_line_dash(&mut self, segments: &[f64]);

    // --- State and transforms ---

    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn translate(&mut self, x: f64, y: f64);
    /// Multiply the current transform by `matrix`.
    fn transform(&mut self, matrix: Affine);
    /// Replace the current transform.
    fn set_transform(&mut self, matrix: Affine);
    fn get_transform(&self) -> Affine;

    // --- Paths ---

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc_to(&mut self, params: &ArcToParams);
    fn bezier_curve_to(&mut self, params: &CubicBezierParams);
    fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams);
    fn rect(&mut self, params: &RectParams);
    fn arc(&mut self, params: &ArcParams);

    /// Whether [`ellipse`](Self::ellipse) is implemented natively.
    fn supports_ellipse(&self) -> bool {
        false
    }

    /// Only called when [`supports_ellipse`](Self::supports_ellipse) returns true.
    fn ellipse(&mut self, _params: &EllipseParams) {}

    // --- Drawing ---

    fn fill(&mut self, rule: FillRule);
    fn stroke(&mut self);
    fn clip(&mut self, rule: FillRule);
    fn fill_rect(&mut self, rect: &RectParams);
    fn stroke_rect(&mut self, rect: &RectParams);
    fn clear_rect(&mut self, rect: &RectParams);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);
    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);
    fn measure_text(&mut self, text: &str) -> TextMetrics;

    fn draw_image(&mut self, image: &Self::Image, params: &ImageDrawParams);

    // --- Pixels ---

    fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> ImageData;
    fn put_image_data(&mut self, data: &ImageData, x: i32, y: i32);
    fn create_image_data(&self, width: u32, height: u32) -> ImageData {
        ImageData::new(width, height)
    }

    /// Create a pattern; `None` if the image cannot be used as one.
    fn create_pattern(
        &mut self,
        image: &Self::Image,
        repetition: Repetition,
    ) -> Option<PatternHandle>;

    // --- Hit testing ---

    fn is_point_in_path(&self, x: f64, y: f64, rule: FillRule) -> bool;
    fn is_point_in_stroke(&self, x: f64, y: f64) -> bool;

    // --- Element sizing ---

    /// Width attribute of the backing surface, in device pixels.
    fn canvas_width(&self) -> u32;
    fn canvas_height(&self) -> u32;
    fn set_canvas_width(&mut self, width: u32);
    fn set_canvas_height(&mut self, height: u32);
    /// Layout box of the element, in CSS pixels.
    fn bounding_rect(&self) -> Rect;
}

/// Something that can hand out a 2D context, such as a canvas element.
pub trait ContextSource {
    type Context: RenderingContext2d;

    /// Obtain the 2D context, or `None` if the surface has none.
    fn context_2d(self) -> Option<Self::Context>;
}

impl<C: RenderingContext2d> ContextSource for Option<C> {
    type Context = C;

    fn context_2d(self) -> Option<C> {
        self
    }
}
