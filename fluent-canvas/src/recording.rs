//! In-memory rendering context that records every call.
//!
//! [`RecordingContext`] keeps the full property state (with its own save stack) so the
//! facade's getters behave as they would on a real context, and appends each mutating
//! call to a log that tests can inspect. Text is measured with a fixed advance per
//! character, proportional to the current font size.

use crate::context::{
    ImageData, NumberProperty, RenderingContext2d, TextMetrics, TextProperty,
};
use crate::density::Density;
use crate::font::FontGrammar;
use crate::geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, ImageDrawParams,
    QuadraticBezierParams, RectParams,
};
use crate::style::{FillRule, Paint, PatternHandle, Repetition};
use kurbo::{Affine, Line, ParamCurveNearest, Point, Rect};
use std::collections::HashMap;

/// A recorded context call. Coordinates are device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetNumber(NumberProperty, f64),
    SetText(TextProperty, String),
    SetFillStyle(Paint),
    SetStrokeStyle(Paint),
    SetLineDash(Vec<f64>),
    Save,
    Restore,
    Scale(f64, f64),
    Rotate(f64),
    Translate(f64, f64),
    Transform(Affine),
    SetTransform(Affine),
    BeginPath,
    ClosePath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ArcTo(ArcToParams),
    BezierCurveTo(CubicBezierParams),
    QuadraticCurveTo(QuadraticBezierParams),
    Rect(RectParams),
    Arc(ArcParams),
    Ellipse(EllipseParams),
    Fill(FillRule),
    Stroke,
    Clip(FillRule),
    FillRect(RectParams),
    StrokeRect(RectParams),
    ClearRect(RectParams),
    FillText {
        text: String,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    },
    StrokeText {
        text: String,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    },
    DrawImage(ImageDrawParams),
    PutImageData {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    CreatePattern(Repetition),
    SetCanvasWidth(u32),
    SetCanvasHeight(u32),
}

#[derive(Debug, Clone)]
struct RecordedState {
    numbers: HashMap<NumberProperty, f64>,
    texts: HashMap<TextProperty, String>,
    fill_style: Paint,
    stroke_style: Paint,
    line_dash: Vec<f64>,
    transform: Affine,
}

impl Default for RecordedState {
    fn default() -> Self {
        Self {
            numbers: NumberProperty::ALL
                .into_iter()
                .map(|p| (p, p.initial_value()))
                .collect(),
            texts: TextProperty::ALL
                .into_iter()
                .map(|p| (p, p.initial_value().to_string()))
                .collect(),
            fill_style: Paint::default(),
            stroke_style: Paint::default(),
            line_dash: Vec::new(),
            transform: Affine::IDENTITY,
        }
    }
}

/// Context that records calls instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    width: u32,
    height: u32,
    state: RecordedState,
    state_stack: Vec<RecordedState>,
    /// Vertices of the current path, mapped through the transform active when each
    /// was added.
    path: Vec<Vec<Point>>,
    native_ellipse: bool,
    /// Advance per character, as a fraction of the font's pixel size.
    char_advance: f64,
    next_pattern_id: u32,
    calls: Vec<Call>,
}

impl RecordingContext {
    /// Create a context over a `width` x `height` device-pixel surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: RecordedState::default(),
            state_stack: Vec::new(),
            path: Vec::new(),
            native_ellipse: true,
            char_advance: 1.0,
            next_pattern_id: 1,
            calls: Vec::new(),
        }
    }

    /// Toggle native `ellipse` support.
    pub fn with_native_ellipse(mut self, supported: bool) -> Self {
        self.native_ellipse = supported;
        self
    }

    /// Set the per-character advance as a fraction of the font size (default 1.0).
    pub fn with_char_advance(mut self, advance: f64) -> Self {
        self.char_advance = advance;
        self
    }

    /// Every call recorded so far.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Current save-stack depth.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    fn font_px(&self) -> f64 {
        let font = self.text(TextProperty::Font);
        FontGrammar::default()
            .parse(&font, Density::default())
            .size()
            .map(|size| size.to_px())
            .unwrap_or(10.0)
    }

    fn push_point(&mut self, x: f64, y: f64, new_subpath: bool) {
        let point = self.state.transform * Point::new(x, y);
        self.push_mapped(point, new_subpath);
    }

    /// Add the corners of `bounds`, placed by `placement`, as a closed subpath.
    fn push_outline(&mut self, bounds: Rect, placement: Affine) {
        let corners = [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x0, bounds.y1),
            Point::new(bounds.x0, bounds.y0),
        ];
        for (i, corner) in corners.into_iter().enumerate() {
            let corner = placement * corner;
            self.push_point(corner.x, corner.y, i == 0);
        }
    }

    fn push_mapped(&mut self, point: Point, new_subpath: bool) {
        match self.path.last_mut() {
            Some(subpath) if !new_subpath => subpath.push(point),
            _ => self.path.push(vec![point]),
        }
    }
}

impl RenderingContext2d for RecordingContext {
    type Image = ImageData;

    fn number(&self, property: NumberProperty) -> f64 {
        self.state
            .numbers
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.initial_value())
    }

    fn set_number(&mut self, property: NumberProperty, value: f64) {
        self.calls.push(Call::SetNumber(property, value));
        self.state.numbers.insert(property, value);
    }

    fn text(&self, property: TextProperty) -> String {
        self.state
            .texts
            .get(&property)
            .cloned()
            .unwrap_or_else(|| property.initial_value().to_string())
    }

    fn set_text(&mut self, property: TextProperty, value: &str) {
        self.calls.push(Call::SetText(property, value.to_string()));
        self.state.texts.insert(property, value.to_string());
    }

    fn fill_style(&self) -> Paint {
        self.state.fill_style.clone()
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.calls.push(Call::SetFillStyle(paint.clone()));
        self.state.fill_style = paint;
    }

    fn stroke_style(&self) -> Paint {
        self.state.stroke_style.clone()
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.calls.push(Call::SetStrokeStyle(paint.clone()));
        self.state.stroke_style = paint;
    }

    fn line_dash(&self) -> Vec<f64> {
        self.state.line_dash.clone()
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.calls.push(Call::SetLineDash(segments.to_vec()));
        self.state.line_dash = segments.to_vec();
    }

    fn save(&mut self) {
        self.calls.push(Call::Save);
        self.state_stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        self.calls.push(Call::Restore);
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.calls.push(Call::Scale(x, y));
        self.state.transform = self.state.transform * Affine::scale_non_uniform(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        self.calls.push(Call::Rotate(angle));
        self.state.transform = self.state.transform * Affine::rotate(angle);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.calls.push(Call::Translate(x, y));
        self.state.transform = self.state.transform * Affine::translate((x, y));
    }

    fn transform(&mut self, matrix: Affine) {
        self.calls.push(Call::Transform(matrix));
        self.state.transform = self.state.transform * matrix;
    }

    fn set_transform(&mut self, matrix: Affine) {
        self.calls.push(Call::SetTransform(matrix));
        self.state.transform = matrix;
    }

    fn get_transform(&self) -> Affine {
        self.state.transform
    }

    fn begin_path(&mut self) {
        self.calls.push(Call::BeginPath);
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
        if let Some(first) = self.path.last().and_then(|s| s.first()).copied() {
            self.push_mapped(first, false);
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::MoveTo(x, y));
        self.push_point(x, y, true);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::LineTo(x, y));
        self.push_point(x, y, false);
    }

    fn arc_to(&mut self, params: &ArcToParams) {
        self.calls.push(Call::ArcTo(*params));
        self.push_point(params.x1, params.y1, false);
        self.push_point(params.x2, params.y2, false);
    }

    fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
        self.calls.push(Call::BezierCurveTo(*params));
        self.push_point(params.x, params.y, false);
    }

    fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
        self.calls.push(Call::QuadraticCurveTo(*params));
        self.push_point(params.x, params.y, false);
    }

    fn rect(&mut self, params: &RectParams) {
        self.calls.push(Call::Rect(*params));
        let RectParams {
            x,
            y,
            width,
            height,
        } = *params;
        self.push_point(x, y, true);
        self.push_point(x + width, y, false);
        self.push_point(x + width, y + height, false);
        self.push_point(x, y + height, false);
        self.push_point(x, y, false);
    }

    fn arc(&mut self, params: &ArcParams) {
        self.calls.push(Call::Arc(*params));
        let bounds = Rect::from_center_size(
            (params.x, params.y),
            (params.radius * 2.0, params.radius * 2.0),
        );
        self.push_outline(bounds, Affine::IDENTITY);
    }

    fn supports_ellipse(&self) -> bool {
        self.native_ellipse
    }

    fn ellipse(&mut self, params: &EllipseParams) {
        self.calls.push(Call::Ellipse(*params));
        let bounds = Rect::from_center_size(
            (0.0, 0.0),
            (params.radius_x * 2.0, params.radius_y * 2.0),
        );
        let placement = Affine::translate((params.x, params.y)) * Affine::rotate(params.rotation);
        self.push_outline(bounds, placement);
    }

    fn fill(&mut self, rule: FillRule) {
        self.calls.push(Call::Fill(rule));
    }

    fn stroke(&mut self) {
        self.calls.push(Call::Stroke);
    }

    fn clip(&mut self, rule: FillRule) {
        self.calls.push(Call::Clip(rule));
    }

    fn fill_rect(&mut self, rect: &RectParams) {
        self.calls.push(Call::FillRect(*rect));
    }

    fn stroke_rect(&mut self, rect: &RectParams) {
        self.calls.push(Call::StrokeRect(*rect));
    }

    fn clear_rect(&mut self, rect: &RectParams) {
        self.calls.push(Call::ClearRect(*rect));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.calls.push(Call::FillText {
            text: text.to_string(),
            x,
            y,
            max_width,
        });
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.calls.push(Call::StrokeText {
            text: text.to_string(),
            x,
            y,
            max_width,
        });
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        let font_px = self.font_px();
        TextMetrics {
            width: text.chars().count() as f64 * font_px * self.char_advance,
            actual_bounding_box_ascent: font_px * 0.8,
            actual_bounding_box_descent: font_px * 0.2,
        }
    }

    fn draw_image(&mut self, _image: &ImageData, params: &ImageDrawParams) {
        self.calls.push(Call::DrawImage(*params));
    }

    fn get_image_data(&self, _x: i32, _y: i32, width: u32, height: u32) -> ImageData {
        ImageData::new(width, height)
    }

    fn put_image_data(&mut self, data: &ImageData, x: i32, y: i32) {
        self.calls.push(Call::PutImageData {
            x,
            y,
            width: data.width,
            height: data.height,
        });
    }

    fn create_pattern(
        &mut self,
        image: &ImageData,
        repetition: Repetition,
    ) -> Option<PatternHandle> {
        if image.width == 0 || image.height == 0 {
            return None;
        }
        self.calls.push(Call::CreatePattern(repetition));
        let id = self.next_pattern_id;
        self.next_pattern_id += 1;
        Some(PatternHandle(id))
    }

    /// Approximated by the bounding box of the current path.
    fn is_point_in_path(&self, x: f64, y: f64, _rule: FillRule) -> bool {
        let mut points = self.path.iter().flatten();
        let Some(first) = points.next() else {
            return false;
        };
        let bounds = points.fold(Rect::from_points(*first, *first), |r, p| {
            r.union_pt(*p)
        });
        bounds.contains(Point::new(x, y))
    }

    /// True within half the line width of any path segment.
    fn is_point_in_stroke(&self, x: f64, y: f64) -> bool {
        let target = Point::new(x, y);
        let half_width = self.number(NumberProperty::LineWidth) / 2.0;
        self.path.iter().any(|subpath| {
            subpath.windows(2).any(|pair| {
                let nearest = Line::new(pair[0], pair[1]).nearest(target, 1e-9);
                nearest.distance_sq.sqrt() <= half_width
            })
        })
    }

    fn canvas_width(&self) -> u32 {
        self.width
    }

    fn canvas_height(&self) -> u32 {
        self.height
    }

    fn set_canvas_width(&mut self, width: u32) {
        self.calls.push(Call::SetCanvasWidth(width));
        self.width = width;
    }

    fn set_canvas_height(&mut self, height: u32) {
        self.calls.push(Call::SetCanvasHeight(height));
        self.height = height;
    }

    fn bounding_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }
}
