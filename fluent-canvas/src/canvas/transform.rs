//! Transform operations for Canvas.
//!
//! Only translations are lengths: `translate` offsets and the `e`/`f` terms of a matrix
//! are density-scaled, while angles, scale factors and the linear terms are not.

use super::Canvas;
use crate::context::RenderingContext2d;
use crate::density::Density;
use kurbo::Affine;

impl<C: RenderingContext2d> Canvas<C> {
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        let (x, y) = self.density.point_to_device(x, y);
        self.ctx.translate(x, y);
        self
    }

    /// Rotate by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        log::debug!(target: "canvas", "rotate {}", angle);
        self.ctx.rotate(angle);
        self
    }

    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.ctx.scale(x, y);
        self
    }

    /// Multiply the current transform by `matrix`.
    pub fn transform(&mut self, matrix: Affine) -> &mut Self {
        log::debug!(target: "canvas", "transform {:?}", matrix);
        self.ctx.transform(matrix_to_device(matrix, self.density));
        self
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, matrix: Affine) -> &mut Self {
        log::debug!(target: "canvas", "setTransform {:?}", matrix);
        self.ctx.set_transform(matrix_to_device(matrix, self.density));
        self
    }

    pub fn reset_transform(&mut self) -> &mut Self {
        log::debug!(target: "canvas", "resetTransform");
        self.ctx.set_transform(Affine::IDENTITY);
        self
    }

    /// The current transform with its translation in logical units.
    pub fn get_transform(&self) -> Affine {
        let [a, b, c, d, e, f] = self.ctx.get_transform().as_coeffs();
        Affine::new([
            a,
            b,
            c,
            d,
            self.density.to_logical(e),
            self.density.to_logical(f),
        ])
    }
}

fn matrix_to_device(matrix: Affine, density: Density) -> Affine {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    Affine::new([a, b, c, d, density.to_device(e), density.to_device(f)])
}
