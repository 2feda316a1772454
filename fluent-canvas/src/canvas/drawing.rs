//! Fill, stroke, clip, rectangles and generated shapes for Canvas.

use super::Canvas;
use crate::context::RenderingContext2d;
use crate::geometry::{ArcParams, EllipseParams, RectParams};
use crate::shapes::{self, PathCommand};
use crate::style::{FillArg, FillRule, Paint};
use kurbo::{Affine, Point};

#[derive(Debug, Clone, Copy)]
enum Finish {
    Fill,
    Stroke,
}

impl<C: RenderingContext2d> Canvas<C> {
    // --- Fill, stroke and clip ---

    /// Fill the current path using the non-zero winding rule.
    pub fn fill(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "fill");
        self.ctx.fill(FillRule::NonZero);
        self
    }

    /// Fill the current path with either a fill rule or a paint.
    ///
    /// Strings are resolved with [`FillRule::from_keyword`]: `"nonzero"` and
    /// `"evenodd"` select the rule, anything else is a color.
    pub fn fill_with(&mut self, arg: impl Into<FillArg>) -> &mut Self {
        match arg.into() {
            FillArg::Rule(rule) => {
                log::debug!(target: "canvas", "fill {:?}", rule);
                self.ctx.fill(rule);
                self
            }
            FillArg::Paint(paint) => self.set_fill_style(paint).fill(),
        }
    }

    pub fn stroke(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "stroke");
        self.ctx.stroke();
        self
    }

    pub fn stroke_with(&mut self, paint: impl Into<Paint>) -> &mut Self {
        self.set_stroke_style(paint).stroke()
    }

    /// Clip to the current path using the non-zero winding rule.
    pub fn clip(&mut self) -> &mut Self {
        self.clip_with(FillRule::NonZero)
    }

    pub fn clip_with(&mut self, rule: FillRule) -> &mut Self {
        log::debug!(target: "canvas", "clip {:?}", rule);
        self.ctx.clip(rule);
        self
    }

    // --- Rectangles ---

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", x, y, width, height);
        let rect = RectParams::new(x, y, width, height).to_device(self.density);
        self.ctx.fill_rect(&rect);
        self
    }

    /// Set the fill style, then fill the rectangle.
    pub fn fill_rect_with(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: impl Into<Paint>,
    ) -> &mut Self {
        self.set_fill_style(paint).fill_rect(x, y, width, height)
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        log::debug!(target: "canvas", "strokeRect {} {} {} {}", x, y, width, height);
        let rect = RectParams::new(x, y, width, height).to_device(self.density);
        self.ctx.stroke_rect(&rect);
        self
    }

    pub fn stroke_rect_with(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: impl Into<Paint>,
    ) -> &mut Self {
        self.set_stroke_style(paint).stroke_rect(x, y, width, height)
    }

    pub fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", x, y, width, height);
        let rect = RectParams::new(x, y, width, height).to_device(self.density);
        self.ctx.clear_rect(&rect);
        self
    }

    /// Clear the whole surface, ignoring the current transform.
    pub fn clear(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "clear");
        let rect = self.device_bounds();
        self.ctx.save();
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.clear_rect(&rect);
        self.ctx.restore();
        self
    }

    /// Paint the whole surface, ignoring the current transform. The fill style is
    /// left unchanged.
    pub fn fill_background(&mut self, paint: impl Into<Paint>) -> &mut Self {
        let paint = paint.into();
        log::debug!(target: "canvas", "fillBackground {:?}", paint);
        let rect = self.device_bounds();
        self.ctx.save();
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_fill_style(paint);
        self.ctx.fill_rect(&rect);
        self.ctx.restore();
        self
    }

    fn device_bounds(&self) -> RectParams {
        RectParams::new(
            0.0,
            0.0,
            self.ctx.canvas_width() as f64,
            self.ctx.canvas_height() as f64,
        )
    }

    // --- Generated shapes ---

    /// Add a full circle as its own subpath.
    pub fn plot_circle(&mut self, x: f64, y: f64, radius: f64) -> &mut Self {
        log::debug!(target: "canvas", "plotCircle {} {} {}", x, y, radius);
        let arc = ArcParams::circle(x, y, radius).to_device(self.density);
        self.ctx.move_to(arc.x + arc.radius, arc.y);
        self.ctx.arc(&arc);
        self
    }

    /// Add a closed regular polygon. Fewer than 3 sides adds nothing.
    pub fn plot_polygon(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        sides: u32,
        anticlockwise: bool,
    ) -> &mut Self {
        log::debug!(target: "canvas", "plotPolygon {} {} {} {}", x, y, radius, sides);
        let (center, radius) = self.device_center(x, y, radius);
        let commands = shapes::regular_polygon(center, radius, sides, anticlockwise);
        self.apply_commands(&commands);
        self
    }

    /// Add a closed star with `points` tips and a derived inner radius.
    pub fn plot_star(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        points: u32,
        anticlockwise: bool,
    ) -> &mut Self {
        log::debug!(target: "canvas", "plotStar {} {} {} {}", x, y, radius, points);
        let (center, radius) = self.device_center(x, y, radius);
        let commands = shapes::star(center, radius, points, anticlockwise);
        self.apply_commands(&commands);
        self
    }

    /// Add a closed star with an explicit inner radius.
    pub fn plot_burst(
        &mut self,
        x: f64,
        y: f64,
        outer_radius: f64,
        inner_radius: f64,
        points: u32,
        anticlockwise: bool,
    ) -> &mut Self {
        log::debug!(
            target: "canvas",
            "plotBurst {} {} {} {} {}",
            x,
            y,
            outer_radius,
            inner_radius,
            points
        );
        let (center, outer_radius) = self.device_center(x, y, outer_radius);
        let inner_radius = self.density.to_device(inner_radius);
        let commands = shapes::burst(center, outer_radius, inner_radius, points, anticlockwise);
        self.apply_commands(&commands);
        self
    }

    /// Add a closed rectangle with rounded corners.
    pub fn plot_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> &mut Self {
        log::debug!(
            target: "canvas",
            "plotRoundedRect {} {} {} {} {}",
            x,
            y,
            width,
            height,
            radius
        );
        let rect = RectParams::new(x, y, width, height).to_device(self.density);
        let radius = self.density.to_device(radius);
        let commands = shapes::rounded_rect(rect.x, rect.y, rect.width, rect.height, radius);
        self.apply_commands(&commands);
        self
    }

    /// Add an elliptical arc, natively when the context supports it.
    ///
    /// Without native support the arc is drawn as a circle under a temporary
    /// non-uniform scale, which is exact for the path geometry only.
    pub fn plot_ellipse(&mut self, params: &EllipseParams) -> &mut Self {
        log::debug!(target: "canvas", "ellipse {:?}", params);
        let params = params.to_device(self.density);
        if self.ctx.supports_ellipse() {
            self.ctx.ellipse(&params);
        } else {
            let commands: Vec<PathCommand> = shapes::ellipse_fallback(&params);
            self.apply_commands(&commands);
        }
        self
    }

    fn device_center(&self, x: f64, y: f64, radius: f64) -> (Point, f64) {
        let (x, y) = self.density.point_to_device(x, y);
        (Point::new(x, y), self.density.to_device(radius))
    }

    fn finish_shape(
        &mut self,
        finish: Finish,
        paint: Option<Paint>,
        plot: impl FnOnce(&mut Self),
    ) -> &mut Self {
        if let Some(paint) = paint {
            match finish {
                Finish::Fill => self.set_fill_style(paint),
                Finish::Stroke => self.set_stroke_style(paint),
            };
        }
        self.begin_path();
        plot(self);
        match finish {
            Finish::Fill => self.fill(),
            Finish::Stroke => self.stroke(),
        }
    }
}

/// Generates `fill_*`, `fill_*_with`, `stroke_*` and `stroke_*_with` for a `plot_*`
/// method: begin a path, plot the shape, optionally set the paint, then fill or stroke.
macro_rules! shape_variants {
    ($(
        $plot:ident => $fill:ident, $fill_with:ident, $stroke:ident, $stroke_with:ident
            ($($arg:ident: $ty:ty),*);
    )+) => {
        impl<C: RenderingContext2d> Canvas<C> {
            $(
                pub fn $fill(&mut self, $($arg: $ty),*) -> &mut Self {
                    self.finish_shape(Finish::Fill, None, |c| {
                        c.$plot($($arg),*);
                    })
                }

                pub fn $fill_with(&mut self, $($arg: $ty,)* paint: impl Into<Paint>) -> &mut Self {
                    self.finish_shape(Finish::Fill, Some(paint.into()), |c| {
                        c.$plot($($arg),*);
                    })
                }

                pub fn $stroke(&mut self, $($arg: $ty),*) -> &mut Self {
                    self.finish_shape(Finish::Stroke, None, |c| {
                        c.$plot($($arg),*);
                    })
                }

                pub fn $stroke_with(&mut self, $($arg: $ty,)* paint: impl Into<Paint>) -> &mut Self {
                    self.finish_shape(Finish::Stroke, Some(paint.into()), |c| {
                        c.$plot($($arg),*);
                    })
                }
            )+
        }
    };
}

shape_variants! {
    plot_circle => fill_circle, fill_circle_with, stroke_circle, stroke_circle_with
        (x: f64, y: f64, radius: f64);
    plot_polygon => fill_polygon, fill_polygon_with, stroke_polygon, stroke_polygon_with
        (x: f64, y: f64, radius: f64, sides: u32, anticlockwise: bool);
    plot_star => fill_star, fill_star_with, stroke_star, stroke_star_with
        (x: f64, y: f64, radius: f64, points: u32, anticlockwise: bool);
    plot_burst => fill_burst, fill_burst_with, stroke_burst, stroke_burst_with
        (x: f64, y: f64, outer_radius: f64, inner_radius: f64, points: u32, anticlockwise: bool);
    plot_rounded_rect => fill_rounded_rect, fill_rounded_rect_with, stroke_rounded_rect, stroke_rounded_rect_with
        (x: f64, y: f64, width: f64, height: f64, radius: f64);
    plot_ellipse => fill_ellipse, fill_ellipse_with, stroke_ellipse, stroke_ellipse_with
        (params: &EllipseParams);
}
