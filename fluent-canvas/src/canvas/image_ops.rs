//! Image, pixel, gradient, pattern and hit-testing operations for Canvas.

use super::Canvas;
use crate::context::{ImageData, RenderingContext2d};
use crate::geometry::{ImageDrawParams, RadialGradientParams, RectParams};
use crate::gradient::Gradient;
use crate::style::{FillRule, PatternHandle, Repetition};

impl<C: RenderingContext2d> Canvas<C> {
    // --- Images ---

    /// Draw an image at natural size with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, image: &C::Image, x: f64, y: f64) -> &mut Self {
        self.draw_image_params(image, ImageDrawParams::At { dx: x, dy: y })
    }

    /// Draw an image scaled into the destination rectangle.
    pub fn draw_image_scaled(
        &mut self,
        image: &C::Image,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        self.draw_image_params(
            image,
            ImageDrawParams::Scaled {
                dest: RectParams::new(x, y, width, height),
            },
        )
    }

    /// Draw the `source` region of an image, given in image pixels, into `dest`.
    pub fn draw_image_cropped(
        &mut self,
        image: &C::Image,
        source: RectParams,
        dest: RectParams,
    ) -> &mut Self {
        self.draw_image_params(image, ImageDrawParams::Cropped { source, dest })
    }

    fn draw_image_params(&mut self, image: &C::Image, params: ImageDrawParams) -> &mut Self {
        log::debug!(target: "canvas", "drawImage {:?}", params);
        self.ctx.draw_image(image, &params.to_device(self.density));
        self
    }

    // --- Pixel data ---

    /// Read the pixels under a logical region. The result is in device pixels.
    pub fn get_image_data(&self, x: f64, y: f64, width: f64, height: f64) -> ImageData {
        let (x, y) = self.density.point_to_device(x, y);
        let width = super::device_extent(self.density.to_device(width));
        let height = super::device_extent(self.density.to_device(height));
        log::debug!(target: "canvas", "getImageData {} {} {} {}", x, y, width, height);
        self.ctx
            .get_image_data(x.round() as i32, y.round() as i32, width, height)
    }

    /// Write device pixels with their top-left corner at logical `(x, y)`.
    pub fn put_image_data(&mut self, data: &ImageData, x: f64, y: f64) -> &mut Self {
        let (x, y) = self.density.point_to_device(x, y);
        log::debug!(target: "canvas", "putImageData {} {}", x, y);
        self.ctx.put_image_data(data, x.round() as i32, y.round() as i32);
        self
    }

    /// Blank pixel data covering a logical area.
    pub fn create_image_data(&self, width: f64, height: f64) -> ImageData {
        let width = super::device_extent(self.density.to_device(width));
        let height = super::device_extent(self.density.to_device(height));
        self.ctx.create_image_data(width, height)
    }

    // --- Gradients and patterns ---

    /// Linear gradient between two logical points.
    pub fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Gradient {
        let (x0, y0) = self.density.point_to_device(x0, y0);
        let (x1, y1) = self.density.point_to_device(x1, y1);
        Gradient::new_linear(x0, y0, x1, y1)
    }

    /// Radial gradient between two logical circles.
    pub fn create_radial_gradient(&self, params: &RadialGradientParams) -> Gradient {
        Gradient::new_radial(&params.to_device(self.density))
    }

    /// Create a pattern from an image. `None` if the context rejects the image.
    pub fn create_pattern(
        &mut self,
        image: &C::Image,
        repetition: Repetition,
    ) -> Option<PatternHandle> {
        log::debug!(target: "canvas", "createPattern {}", repetition.as_str());
        self.ctx.create_pattern(image, repetition)
    }

    // --- Hit testing ---

    pub fn is_point_in_path(&self, x: f64, y: f64) -> bool {
        self.is_point_in_path_with(x, y, FillRule::NonZero)
    }

    pub fn is_point_in_path_with(&self, x: f64, y: f64, rule: FillRule) -> bool {
        let (x, y) = self.density.point_to_device(x, y);
        self.ctx.is_point_in_path(x, y, rule)
    }

    pub fn is_point_in_stroke(&self, x: f64, y: f64) -> bool {
        let (x, y) = self.density.point_to_device(x, y);
        self.ctx.is_point_in_stroke(x, y)
    }
}

#[cfg(test)]
mod tests {
    use crate::canvas::Canvas;
    use crate::context::ImageData;
    use crate::geometry::{ImageDrawParams, RadialGradientParams, RectParams};
    use crate::gradient::GradientType;
    use crate::recording::{Call, RecordingContext};
    use crate::style::{Paint, Repetition};

    fn canvas(density: f64) -> Canvas<RecordingContext> {
        Canvas::<RecordingContext>::builder()
            .density(density)
            .build_with_context(RecordingContext::new(100, 100))
    }

    #[test]
    fn test_image_source_not_scaled() {
        let mut canvas = canvas(2.0);
        let image = ImageData::new(8, 8);
        canvas.draw_image_cropped(
            &image,
            RectParams::new(0.0, 0.0, 4.0, 4.0),
            RectParams::new(1.0, 1.0, 2.0, 2.0),
        );
        assert_eq!(
            canvas.context().calls(),
            &[Call::DrawImage(ImageDrawParams::Cropped {
                source: RectParams::new(0.0, 0.0, 4.0, 4.0),
                dest: RectParams::new(2.0, 2.0, 4.0, 4.0),
            })]
        );
    }

    #[test]
    fn test_image_data_region_scaled() {
        let mut canvas = canvas(2.0);
        let data = canvas.get_image_data(0.0, 0.0, 3.0, 2.0);
        assert_eq!((data.width, data.height), (6, 4));
        assert_eq!(canvas.create_image_data(1.5, 1.0).width, 3);

        canvas.put_image_data(&data, 5.0, 5.0);
        assert_eq!(
            canvas.context().calls(),
            &[Call::PutImageData {
                x: 10,
                y: 10,
                width: 6,
                height: 4
            }]
        );
    }

    #[test]
    fn test_gradients_in_device_space() {
        let canvas = canvas(2.0);
        let linear = canvas.create_linear_gradient(0.0, 0.0, 10.0, 5.0);
        assert_eq!(
            linear.gradient_type,
            GradientType::Linear {
                x0: 0.0,
                y0: 0.0,
                x1: 20.0,
                y1: 10.0
            }
        );

        let radial = canvas.create_radial_gradient(&RadialGradientParams {
            x0: 1.0,
            y0: 1.0,
            r0: 0.0,
            x1: 1.0,
            y1: 1.0,
            r1: 5.0,
        });
        match radial.gradient_type {
            GradientType::Radial(params) => assert_eq!(params.r1, 10.0),
            other => panic!("expected radial gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_as_fill_style() {
        let mut canvas = canvas(1.0);
        let pattern = canvas
            .create_pattern(&ImageData::new(2, 2), Repetition::RepeatX)
            .unwrap();
        canvas.set_fill_style(pattern);
        assert_eq!(canvas.fill_style(), Paint::Pattern(pattern));
    }

    #[test]
    fn test_hit_tests_use_device_coordinates() {
        let mut canvas = canvas(2.0);
        canvas.begin_path().rect(10.0, 10.0, 10.0, 10.0);
        assert!(canvas.is_point_in_path(15.0, 15.0));
        assert!(!canvas.is_point_in_path(25.0, 25.0));
        canvas.set_line_width(2.0);
        assert!(canvas.is_point_in_stroke(15.0, 10.5));
    }
}
