//! Point list normalization.
//!
//! Paths can be described as a flat list of numbers (`[x0, y0, x1, y1, ...]`), a list of
//! `[x, y]` tuples, or a list of `{x, y}` points. [`for_points`] accepts all three and
//! visits the same `(x, y, index)` triples for each of them.

use crate::error::{CanvasError, CanvasResult};

/// One element of a point list.
#[derive(Debug, Clone, PartialEq)]
pub enum PointElement {
    /// A bare coordinate in a flat `[x0, y0, x1, y1, ...]` list.
    Number(f64),
    /// An `[x, y]` tuple. Must hold exactly two numbers.
    Tuple(Vec<f64>),
    /// An `{x, y}` point.
    Object {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
}

impl From<f64> for PointElement {
    fn from(value: f64) -> Self {
        PointElement::Number(value)
    }
}

impl From<[f64; 2]> for PointElement {
    fn from([x, y]: [f64; 2]) -> Self {
        PointElement::Tuple(vec![x, y])
    }
}

impl From<Vec<f64>> for PointElement {
    fn from(values: Vec<f64>) -> Self {
        PointElement::Tuple(values)
    }
}

impl From<(f64, f64)> for PointElement {
    fn from((x, y): (f64, f64)) -> Self {
        PointElement::Object { x, y }
    }
}

impl From<kurbo::Point> for PointElement {
    fn from(p: kurbo::Point) -> Self {
        PointElement::Object { x: p.x, y: p.y }
    }
}

/// Build a point list from anything convertible into [`PointElement`].
pub fn point_list<I, T>(items: I) -> Vec<PointElement>
where
    I: IntoIterator<Item = T>,
    T: Into<PointElement>,
{
    items.into_iter().map(Into::into).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Flat,
    Tuple,
    Object,
}

impl Encoding {
    fn describe(self) -> &'static str {
        match self {
            Encoding::Flat => "a number",
            Encoding::Tuple => "an [x, y] tuple",
            Encoding::Object => "an {x, y} point",
        }
    }
}

/// Call `visit(x, y, index)` once per point, in input order.
///
/// Lists too short to describe a segment (fewer than 4 numbers, or fewer than 2
/// tuples/points) visit nothing. A flat list of 4 or more numbers must have an even
/// length, and every element must use the encoding of the first one.
pub fn for_points<F>(points: &[PointElement], mut visit: F) -> CanvasResult<()>
where
    F: FnMut(f64, f64, usize),
{
    let Some(first) = points.first() else {
        return Ok(());
    };

    let encoding = match first {
        PointElement::Number(_) => Encoding::Flat,
        PointElement::Tuple(_) => Encoding::Tuple,
        PointElement::Object { .. } => Encoding::Object,
    };

    match encoding {
        Encoding::Flat => {
            if points.len() < 4 {
                return Ok(());
            }
            if points.len() % 2 != 0 {
                return Err(CanvasError::MalformedPointList {
                    expected: "an even number of coordinates",
                    found: format!("{} coordinates", points.len()),
                });
            }
            let coords = points
                .iter()
                .map(|p| match p {
                    PointElement::Number(v) => Ok(*v),
                    other => Err(mismatch(encoding, other)),
                })
                .collect::<CanvasResult<Vec<f64>>>()?;
            for (index, pair) in coords.chunks_exact(2).enumerate() {
                visit(pair[0], pair[1], index);
            }
        }
        Encoding::Tuple | Encoding::Object => {
            if points.len() < 2 {
                return Ok(());
            }
            // Validate everything before visiting so a bad list never half-plots.
            let coords = points
                .iter()
                .map(|p| match (encoding, p) {
                    (Encoding::Tuple, PointElement::Tuple(values)) if values.len() == 2 => {
                        Ok((values[0], values[1]))
                    }
                    (Encoding::Object, PointElement::Object { x, y }) => Ok((*x, *y)),
                    (_, other) => Err(mismatch(encoding, other)),
                })
                .collect::<CanvasResult<Vec<(f64, f64)>>>()?;
            for (index, (x, y)) in coords.into_iter().enumerate() {
                visit(x, y, index);
            }
        }
    }

    Ok(())
}

fn mismatch(encoding: Encoding, found: &PointElement) -> CanvasError {
    CanvasError::MalformedPointList {
        expected: encoding.describe(),
        found: format!("{:?}", found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(points: &[PointElement]) -> CanvasResult<Vec<(f64, f64, usize)>> {
        let mut out = Vec::new();
        for_points(points, |x, y, i| out.push((x, y, i)))?;
        Ok(out)
    }

    #[test]
    fn test_encodings_visit_identical_triples() {
        let flat = point_list([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let tuples = point_list([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let objects = point_list([(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);

        let expected = vec![(1.0, 2.0, 0), (3.0, 4.0, 1), (5.0, 6.0, 2)];
        assert_eq!(collect(&flat).unwrap(), expected);
        assert_eq!(collect(&tuples).unwrap(), expected);
        assert_eq!(collect(&objects).unwrap(), expected);
    }

    #[test]
    fn test_short_lists_are_noops() {
        assert!(collect(&[]).unwrap().is_empty());
        assert!(collect(&point_list([1.0, 2.0])).unwrap().is_empty());
        assert!(collect(&point_list([1.0, 2.0, 3.0])).unwrap().is_empty());
        assert!(collect(&point_list([[1.0, 2.0]])).unwrap().is_empty());
        assert!(collect(&point_list([(1.0, 2.0)])).unwrap().is_empty());
    }

    #[test]
    fn test_odd_flat_list_rejected() {
        let err = collect(&point_list([1.0, 2.0, 3.0, 4.0, 5.0])).unwrap_err();
        assert!(matches!(err, CanvasError::MalformedPointList { .. }));
    }

    #[test]
    fn test_mixed_encodings_rejected() {
        let mut points = point_list([[1.0, 2.0], [3.0, 4.0]]);
        points.push(PointElement::Object { x: 5.0, y: 6.0 });
        let err = collect(&points).unwrap_err();
        match err {
            CanvasError::MalformedPointList { expected, found } => {
                assert_eq!(expected, "an [x, y] tuple");
                assert!(found.contains("Object"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let mut flat = point_list([1.0, 2.0, 3.0]);
        flat.push(PointElement::Tuple(vec![4.0, 5.0]));
        assert!(collect(&flat).is_err());
    }

    #[test]
    fn test_bad_tuple_arity_rejected() {
        let points = vec![
            PointElement::Tuple(vec![1.0, 2.0]),
            PointElement::Tuple(vec![3.0]),
        ];
        assert!(collect(&points).is_err());
    }

    #[test]
    fn test_error_visits_nothing() {
        let mut points = point_list([(1.0, 2.0), (3.0, 4.0)]);
        points.push(PointElement::Number(5.0));
        let mut visited = 0;
        assert!(for_points(&points, |_, _, _| visited += 1).is_err());
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_kurbo_points() {
        let points = point_list([kurbo::Point::new(0.5, 1.5), kurbo::Point::new(2.0, 3.0)]);
        assert_eq!(
            collect(&points).unwrap(),
            vec![(0.5, 1.5, 0), (2.0, 3.0, 1)]
        );
    }
}
