//! Angle and distance helpers for drawing code.

use crate::error::{CanvasError, CanvasResult};
use std::f64::consts::PI;

pub fn radians_from_degrees(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn degrees_from_radians(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// `0.25` → `25.0`
pub fn percent_from_fraction(fraction: f64) -> f64 {
    fraction * 100.0
}

/// `25.0` → `0.25`
pub fn fraction_from_percent(percent: f64) -> f64 {
    percent / 100.0
}

/// Angle in radians of a vector.
///
/// Accepts `[x, y]` (the vector from the origin) or `[x1, y1, x2, y2]` (the vector
/// between two points).
pub fn angle(values: &[f64]) -> CanvasResult<f64> {
    match *values {
        [x, y] => Ok(y.atan2(x)),
        [x1, y1, x2, y2] => Ok((y2 - y1).atan2(x2 - x1)),
        _ => Err(CanvasError::InvalidArgumentCount {
            operation: "angle",
            count: values.len(),
        }),
    }
}

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-12;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, PI / 2.0)]
    #[case(180.0, PI)]
    #[case(-45.0, -PI / 4.0)]
    fn test_degree_conversion(#[case] degrees: f64, #[case] radians: f64) {
        assert!((radians_from_degrees(degrees) - radians).abs() < EPS);
        assert!((degrees_from_radians(radians) - degrees).abs() < EPS);
    }

    #[test]
    fn test_percent_conversion() {
        assert_eq!(percent_from_fraction(0.25), 25.0);
        assert_eq!(fraction_from_percent(50.0), 0.5);
    }

    #[test]
    fn test_angle_forms() {
        assert!((angle(&[0.0, 1.0]).unwrap() - PI / 2.0).abs() < EPS);
        assert!((angle(&[1.0, 1.0, 2.0, 2.0]).unwrap() - PI / 4.0).abs() < EPS);
        assert_eq!(
            angle(&[1.0, 2.0, 3.0]),
            Err(CanvasError::InvalidArgumentCount {
                operation: "angle",
                count: 3
            })
        );
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
    }
}
