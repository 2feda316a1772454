//! Resolution-aware, chainable facade over a Canvas 2D rendering context.
//!
//! [`Canvas`] sits between drawing code and a [`RenderingContext2d`]. It lets callers
//! work in logical units while the context receives device pixels, parses the CSS font
//! shorthand into addressable parts, draws shapes the context has no primitive for
//! (polygons, stars, bursts, rounded rectangles, ellipses), and wraps multi-line text.
//! It uses:
//! - `kurbo` for points, rectangles and affine transforms
//! - `cosmic-text` and `fontdb` for context-free text measurement ([`CosmicMeasure`])
//!
//! # Example
//!
//! ```rust
//! use fluent_canvas::{Canvas, RecordingContext};
//!
//! let mut canvas = Canvas::<RecordingContext>::builder()
//!     .density(2.0)
//!     .build_with_context(RecordingContext::new(400, 300));
//! canvas
//!     .fill_rect_with(10.0, 10.0, 100.0, 50.0, "red")
//!     .set_font("bold 12px Helvetica")
//!     .fill_text("Hello", 10.0, 80.0)
//!     .stroke_star(150.0, 75.0, 40.0, 5, false);
//! assert_eq!(canvas.font_size().map(|s| s.value), Some(12.0));
//! ```

mod canvas;
mod context;
mod density;
mod error;
mod font;
mod geometry;
mod gradient;
mod layout;
pub mod math;
mod measure;
mod points;
mod recording;
pub mod shapes;
mod style;

// Re-export public API
pub use canvas::{Canvas, CanvasBuilder, IterationControl, TextBlockOptions};
pub use context::{
    ContextSource, ImageData, NumberProperty, RenderingContext2d, TextMetrics, TextProperty,
};
pub use density::Density;
pub use error::{CanvasError, CanvasResult};
pub use font::{
    format_font, parse_font, FontDescriptor, FontGrammar, FontParts, FontSize, FontSlot,
    SystemFont,
};
pub use geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, ImageDrawParams,
    QuadraticBezierParams, RadialGradientParams, RectParams,
};
pub use gradient::{Gradient, GradientStop, GradientType};
pub use layout::{layout, BreakMode, LayoutOptions, TextLayout, TextLine, TextMeasure};
pub use measure::{CosmicMeasure, CosmicMeasureBuilder};
pub use points::{for_points, point_list, PointElement};
pub use recording::{Call, RecordingContext};
pub use shapes::PathCommand;
pub use style::{
    FillArg, FillRule, LineCap, LineJoin, Paint, PatternHandle, Repetition, TextAlign,
    TextBaseline,
};
