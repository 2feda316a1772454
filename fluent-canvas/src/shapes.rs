//! Path generators for shapes a 2D context cannot draw natively.
//!
//! Every generator is a pure function from shape parameters to a list of
//! [`PathCommand`]s. The facade converts its arguments to device pixels first and then
//! replays the commands on the context, so the generators never see a density.

use crate::geometry::{ArcParams, ArcToParams, EllipseParams};
use kurbo::{Point, Vec2};
use std::f64::consts::TAU;

/// A single context call produced by a generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo(ArcToParams),
    Arc(ArcParams),
    ClosePath,
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f64),
    Scale(f64, f64),
}

/// A closed polygon with `sides` vertices on a circle.
///
/// The first vertex is at `(center.x + radius, center.y)`; vertices advance clockwise
/// (in a y-down space) unless `anticlockwise` is set. Fewer than 3 sides draws nothing.
pub fn regular_polygon(
    center: Point,
    radius: f64,
    sides: u32,
    anticlockwise: bool,
) -> Vec<PathCommand> {
    if sides < 3 {
        return Vec::new();
    }
    ring(center, sides as usize, anticlockwise, |_| radius)
}

/// A regular star with `points` tips.
///
/// The inner radius is derived from the outer one so that each edge lines up with the
/// edge two tips away, which keeps stars looking regular for any point count. Three and
/// four points degenerate to a triangle and a square.
pub fn star(center: Point, radius: f64, points: u32, anticlockwise: bool) -> Vec<PathCommand> {
    match points {
        0..=2 => Vec::new(),
        3 | 4 => regular_polygon(center, radius, points, anticlockwise),
        _ => {
            let offset = TAU / (2.0 * points as f64);
            let inner = (2.0 * offset).cos() * radius / offset.cos();
            alternating(center, radius, inner, points, anticlockwise)
        }
    }
}

/// Like [`star`] but with an explicit inner radius.
pub fn burst(
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    points: u32,
    anticlockwise: bool,
) -> Vec<PathCommand> {
    if points < 2 {
        return Vec::new();
    }
    alternating(center, outer_radius, inner_radius, points, anticlockwise)
}

/// A rectangle with rounded corners.
///
/// The radius is clamped to half the shorter side, so the corners never overlap.
/// Negative sizes extend the rectangle left or up from `(x, y)`.
pub fn rounded_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Vec<PathCommand> {
    let (x, width) = if width < 0.0 {
        (x + width, -width)
    } else {
        (x, width)
    };
    let (y, height) = if height < 0.0 {
        (y + height, -height)
    } else {
        (y, height)
    };
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let (right, bottom) = (x + width, y + height);
    let corner = |x1: f64, y1: f64, x2: f64, y2: f64| {
        PathCommand::ArcTo(ArcToParams {
            x1,
            y1,
            x2,
            y2,
            radius: r,
        })
    };

    vec![
        PathCommand::MoveTo(Point::new(x + r, y)),
        PathCommand::LineTo(Point::new(right - r, y)),
        corner(right, y, right, y + r),
        PathCommand::LineTo(Point::new(right, bottom - r)),
        corner(right, bottom, right - r, bottom),
        PathCommand::LineTo(Point::new(x + r, bottom)),
        corner(x, bottom, x, bottom - r),
        PathCommand::LineTo(Point::new(x, y + r)),
        corner(x, y, x + r, y),
        PathCommand::ClosePath,
    ]
}

/// Ellipse built from a circular arc under a temporary transform, for contexts
/// without a native `ellipse`.
///
/// The y axis is scaled by `radius_y / radius_x` while the arc is added, which also
/// squashes the stroke width of anything stroked under that transform. Callers stroke
/// after the `Restore`, so only the path geometry is affected.
pub fn ellipse_fallback(params: &EllipseParams) -> Vec<PathCommand> {
    if params.radius_x <= 0.0 || params.radius_y <= 0.0 {
        return Vec::new();
    }
    vec![
        PathCommand::Save,
        PathCommand::Translate(Vec2::new(params.x, params.y)),
        PathCommand::Rotate(params.rotation),
        PathCommand::Scale(1.0, params.radius_y / params.radius_x),
        PathCommand::Arc(ArcParams {
            x: 0.0,
            y: 0.0,
            radius: params.radius_x,
            start_angle: params.start_angle,
            end_angle: params.end_angle,
            anticlockwise: params.anticlockwise,
        }),
        PathCommand::Restore,
    ]
}

fn alternating(
    center: Point,
    outer: f64,
    inner: f64,
    points: u32,
    anticlockwise: bool,
) -> Vec<PathCommand> {
    ring(center, 2 * points as usize, anticlockwise, |i| {
        if i % 2 == 0 {
            outer
        } else {
            inner
        }
    })
}

fn ring<F>(center: Point, vertices: usize, anticlockwise: bool, radius_at: F) -> Vec<PathCommand>
where
    F: Fn(usize) -> f64,
{
    let direction = if anticlockwise { -1.0 } else { 1.0 };
    let step = TAU / vertices as f64 * direction;

    let mut commands = Vec::with_capacity(vertices + 1);
    for i in 0..vertices {
        let angle = step * i as f64;
        let r = radius_at(i);
        let vertex = Point::new(center.x + r * angle.cos(), center.y + r * angle.sin());
        commands.push(if i == 0 {
            PathCommand::MoveTo(vertex)
        } else {
            PathCommand::LineTo(vertex)
        });
    }
    commands.push(PathCommand::ClosePath);
    commands
}
