//! Path construction and point-list plotting for Canvas.

use super::Canvas;
use crate::context::RenderingContext2d;
use crate::error::CanvasResult;
use crate::geometry::{ArcParams, ArcToParams, CubicBezierParams, QuadraticBezierParams, RectParams};
use crate::points::{for_points, PointElement};
use crate::shapes::PathCommand;
use crate::style::{FillRule, Paint};

impl<C: RenderingContext2d> Canvas<C> {
    /// Start a new path.
    pub fn begin_path(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "beginPath");
        self.ctx.begin_path();
        self
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "closePath");
        self.ctx.close_path();
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        let (x, y) = self.density.point_to_device(x, y);
        self.ctx.move_to(x, y);
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        let (x, y) = self.density.point_to_device(x, y);
        self.ctx.line_to(x, y);
        self
    }

    pub fn arc_to(&mut self, params: &ArcToParams) -> &mut Self {
        log::debug!(target: "canvas", "arcTo {:?}", params);
        self.ctx.arc_to(&params.to_device(self.density));
        self
    }

    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) -> &mut Self {
        log::debug!(target: "canvas", "bezierCurveTo {:?}", params);
        self.ctx.bezier_curve_to(&params.to_device(self.density));
        self
    }

    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) -> &mut Self {
        log::debug!(target: "canvas", "quadraticCurveTo {:?}", params);
        self.ctx.quadratic_curve_to(&params.to_device(self.density));
        self
    }

    /// Add a rectangle subpath.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        log::debug!(target: "canvas", "rect {} {} {} {}", x, y, width, height);
        let rect = RectParams::new(x, y, width, height).to_device(self.density);
        self.ctx.rect(&rect);
        self
    }

    /// Add a circular arc. Angles are radians and are not density-scaled.
    pub fn arc(&mut self, params: &ArcParams) -> &mut Self {
        log::debug!(target: "canvas", "arc {:?}", params);
        self.ctx.arc(&params.to_device(self.density));
        self
    }

    // --- Paths from point lists ---

    /// Add an open path through `points`: a move to the first point, then a line to
    /// each of the others.
    ///
    /// Lists too short to form a segment add nothing. A malformed list fails before
    /// anything is sent to the context.
    pub fn plot_path(&mut self, points: &[PointElement]) -> CanvasResult<&mut Self> {
        log::debug!(target: "canvas", "plotPath {} elements", points.len());
        let density = self.density;
        let ctx = &mut self.ctx;
        for_points(points, |x, y, index| {
            let (x, y) = density.point_to_device(x, y);
            if index == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        })?;
        Ok(self)
    }

    /// Like [`plot_path`](Self::plot_path), closing the subpath when any points were
    /// plotted.
    pub fn plot_closed_path(&mut self, points: &[PointElement]) -> CanvasResult<&mut Self> {
        let mut plotted = false;
        let density = self.density;
        let ctx = &mut self.ctx;
        for_points(points, |x, y, index| {
            let (x, y) = density.point_to_device(x, y);
            if index == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
            plotted = true;
        })?;
        if plotted {
            log::debug!(target: "canvas", "closePath");
            self.ctx.close_path();
        }
        Ok(self)
    }

    /// Begin a path, plot `points` as a closed polygon and fill it.
    pub fn fill_path(&mut self, points: &[PointElement]) -> CanvasResult<&mut Self> {
        self.fill_path_inner(points, None)
    }

    pub fn fill_path_with(
        &mut self,
        points: &[PointElement],
        paint: impl Into<Paint>,
    ) -> CanvasResult<&mut Self> {
        self.fill_path_inner(points, Some(paint.into()))
    }

    /// Begin a path, plot `points` as an open polyline and stroke it.
    pub fn stroke_path(&mut self, points: &[PointElement]) -> CanvasResult<&mut Self> {
        self.stroke_path_inner(points, None)
    }

    pub fn stroke_path_with(
        &mut self,
        points: &[PointElement],
        paint: impl Into<Paint>,
    ) -> CanvasResult<&mut Self> {
        self.stroke_path_inner(points, Some(paint.into()))
    }

    fn fill_path_inner(
        &mut self,
        points: &[PointElement],
        paint: Option<Paint>,
    ) -> CanvasResult<&mut Self> {
        // Validate first so a bad list leaves the context untouched.
        for_points(points, |_, _, _| {})?;
        if let Some(paint) = paint {
            self.set_fill_style(paint);
        }
        self.ctx.begin_path();
        self.plot_closed_path(points)?;
        log::debug!(target: "canvas", "fill");
        self.ctx.fill(FillRule::NonZero);
        Ok(self)
    }

    fn stroke_path_inner(
        &mut self,
        points: &[PointElement],
        paint: Option<Paint>,
    ) -> CanvasResult<&mut Self> {
        for_points(points, |_, _, _| {})?;
        if let Some(paint) = paint {
            self.set_stroke_style(paint);
        }
        self.ctx.begin_path();
        self.plot_path(points)?;
        log::debug!(target: "canvas", "stroke");
        self.ctx.stroke();
        Ok(self)
    }

    /// Add a straight segment as its own subpath.
    pub fn plot_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2)
    }

    /// Begin a path and stroke a single segment.
    pub fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.begin_path().plot_line(x1, y1, x2, y2).stroke()
    }

    pub fn stroke_line_with(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        paint: impl Into<Paint>,
    ) -> &mut Self {
        self.set_stroke_style(paint);
        self.stroke_line(x1, y1, x2, y2)
    }

    /// Replay generated commands on the context. Coordinates must already be device
    /// pixels.
    pub(super) fn apply_commands(&mut self, commands: &[PathCommand]) {
        for command in commands {
            match *command {
                PathCommand::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                PathCommand::LineTo(p) => self.ctx.line_to(p.x, p.y),
                PathCommand::ArcTo(params) => self.ctx.arc_to(&params),
                PathCommand::Arc(params) => self.ctx.arc(&params),
                PathCommand::ClosePath => self.ctx.close_path(),
                PathCommand::Save => self.ctx.save(),
                PathCommand::Restore => self.ctx.restore(),
                PathCommand::Translate(v) => self.ctx.translate(v.x, v.y),
                PathCommand::Rotate(angle) => self.ctx.rotate(angle),
                PathCommand::Scale(x, y) => self.ctx.scale(x, y),
            }
        }
    }
}
