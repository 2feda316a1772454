//! Parameter structs for drawing operations.
//!
//! These replace long positional argument lists with named fields. All lengths are in
//! the caller's unit system: logical units when handed to the facade, device pixels
//! once the facade has converted them for the context.

use crate::density::Density;

/// A circular arc around `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Radians, measured clockwise from the positive x axis.
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl ArcParams {
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
            anticlockwise: false,
        }
    }

    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            x: density.to_device(self.x),
            y: density.to_device(self.y),
            radius: density.to_device(self.radius),
            ..self
        }
    }
}

/// An elliptical arc around `(x, y)`, rotated by `rotation` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl EllipseParams {
    pub fn full(x: f64, y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            x,
            y,
            radius_x,
            radius_y,
            rotation: 0.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
            anticlockwise: false,
        }
    }

    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            x: density.to_device(self.x),
            y: density.to_device(self.y),
            radius_x: density.to_device(self.radius_x),
            radius_y: density.to_device(self.radius_y),
            ..self
        }
    }
}

/// A corner arc tangent to the lines current point → `(x1, y1)` → `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcToParams {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub radius: f64,
}

impl ArcToParams {
    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            x1: density.to_device(self.x1),
            y1: density.to_device(self.y1),
            x2: density.to_device(self.x2),
            y2: density.to_device(self.y2),
            radius: density.to_device(self.radius),
        }
    }
}

/// Cubic curve to `(x, y)` through two control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierParams {
    pub cp1x: f64,
    pub cp1y: f64,
    pub cp2x: f64,
    pub cp2y: f64,
    pub x: f64,
    pub y: f64,
}

impl CubicBezierParams {
    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            cp1x: density.to_device(self.cp1x),
            cp1y: density.to_device(self.cp1y),
            cp2x: density.to_device(self.cp2x),
            cp2y: density.to_device(self.cp2y),
            x: density.to_device(self.x),
            y: density.to_device(self.y),
        }
    }
}

/// Quadratic curve to `(x, y)` through one control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezierParams {
    pub cpx: f64,
    pub cpy: f64,
    pub x: f64,
    pub y: f64,
}

impl QuadraticBezierParams {
    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            cpx: density.to_device(self.cpx),
            cpy: density.to_device(self.cpy),
            x: density.to_device(self.x),
            y: density.to_device(self.y),
        }
    }
}

/// An axis-aligned rectangle. Negative sizes extend left or up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectParams {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            x: density.to_device(self.x),
            y: density.to_device(self.y),
            width: density.to_device(self.width),
            height: density.to_device(self.height),
        }
    }
}

/// Where and how large to draw an image, optionally cropping the source first.
///
/// Source coordinates are in image pixels and are never density-scaled; destination
/// coordinates are lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageDrawParams {
    /// Draw at natural size with the top-left corner at (dx, dy).
    At { dx: f64, dy: f64 },
    /// Draw scaled into the destination rectangle.
    Scaled { dest: RectParams },
    /// Draw the source rectangle scaled into the destination rectangle.
    Cropped { source: RectParams, dest: RectParams },
}

impl ImageDrawParams {
    pub(crate) fn to_device(self, density: Density) -> Self {
        match self {
            ImageDrawParams::At { dx, dy } => ImageDrawParams::At {
                dx: density.to_device(dx),
                dy: density.to_device(dy),
            },
            ImageDrawParams::Scaled { dest } => ImageDrawParams::Scaled {
                dest: dest.to_device(density),
            },
            ImageDrawParams::Cropped { source, dest } => ImageDrawParams::Cropped {
                source,
                dest: dest.to_device(density),
            },
        }
    }
}

/// Two circles bounding a radial gradient: `(x0, y0, r0)` to `(x1, y1, r1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradientParams {
    pub x0: f64,
    pub y0: f64,
    pub r0: f64,
    pub x1: f64,
    pub y1: f64,
    pub r1: f64,
}

impl RadialGradientParams {
    pub(crate) fn to_device(self, density: Density) -> Self {
        Self {
            x0: density.to_device(self.x0),
            y0: density.to_device(self.y0),
            r0: density.to_device(self.r0),
            x1: density.to_device(self.x1),
            y1: density.to_device(self.y1),
            r1: density.to_device(self.r1),
        }
    }
}
