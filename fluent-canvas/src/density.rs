//! Conversion between logical units and device pixels.

/// Device-pixel-per-logical-unit multiplier.
///
/// Every device-relative length crossing the facade boundary goes through
/// [`Density::to_device`] on the way in and [`Density::to_logical`] on the way out.
/// Changing the density never touches values that were already sent to the context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f64);

impl Density {
    /// Create a density. Returns `None` unless `value` is finite and positive.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The raw multiplier.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Logical length to device pixels.
    pub fn to_device(self, value: f64) -> f64 {
        value * self.0
    }

    /// Device pixels to logical length.
    pub fn to_logical(self, value: f64) -> f64 {
        value / self.0
    }

    /// Convert a logical point to device pixels.
    pub fn point_to_device(self, x: f64, y: f64) -> (f64, f64) {
        (x * self.0, y * self.0)
    }

    /// Convert a list of logical lengths (e.g. a dash pattern) to device pixels.
    pub fn all_to_device(self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| v * self.0).collect()
    }

    /// Convert a list of device lengths back to logical units.
    pub fn all_to_logical(self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| v / self.0).collect()
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}
