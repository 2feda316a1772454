//! Gradient values handed to the rendering context as paint.

use crate::geometry::RadialGradientParams;

/// A color at a position along the gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Between 0.0 and 1.0.
    pub offset: f64,
    pub color: String,
}

/// Gradient geometry, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientType {
    Linear { x0: f64, y0: f64, x1: f64, y1: f64 },
    Radial(RadialGradientParams),
}

/// A gradient paint, built by the facade and handed to the context as a [`Paint`].
///
/// [`Paint`]: crate::style::Paint
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub gradient_type: GradientType,
    /// Color stops, sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn new_linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            gradient_type: GradientType::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    pub fn new_radial(params: &RadialGradientParams) -> Self {
        Self {
            gradient_type: GradientType::Radial(*params),
            stops: Vec::new(),
        }
    }

    /// Add a color stop. Offsets outside `0.0..=1.0` are clamped.
    pub fn add_color_stop(&mut self, offset: f64, color: impl Into<String>) -> &mut Self {
        let offset = if offset.is_finite() {
            offset.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.stops.push(GradientStop {
            offset,
            color: color.into(),
        });
        // Stable sort keeps insertion order for equal offsets.
        self.stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self
    }
}
