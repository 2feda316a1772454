//! Style types and keyword enums.

use crate::error::CanvasError;
use crate::gradient::Gradient;
use std::str::FromStr;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $keyword:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The CSS keyword for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $keyword ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CanvasError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $keyword => Ok($name::$variant), )+
                    _ => Err(CanvasError::InvalidKeyword {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

keyword_enum! {
    /// Line cap style for stroke operations.
    LineCap, "line cap" {
        /// Flat edge at the endpoint.
        #[default]
        Butt => "butt",
        /// Rounded edge extending past the endpoint.
        Round => "round",
        /// Square edge extending past the endpoint.
        Square => "square",
    }
}

keyword_enum! {
    /// Line join style for stroke operations.
    LineJoin, "line join" {
        /// Sharp corner.
        #[default]
        Miter => "miter",
        /// Rounded corner.
        Round => "round",
        /// Beveled corner.
        Bevel => "bevel",
    }
}

keyword_enum! {
    /// Text alignment relative to the anchor point.
    TextAlign, "text align" {
        #[default]
        Start => "start",
        End => "end",
        Left => "left",
        Right => "right",
        Center => "center",
    }
}

keyword_enum! {
    /// Text baseline for text rendering.
    TextBaseline, "text baseline" {
        Top => "top",
        Hanging => "hanging",
        Middle => "middle",
        #[default]
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Bottom => "bottom",
    }
}

keyword_enum! {
    /// Fill rule for fill, clip and hit-test operations.
    FillRule, "fill rule" {
        /// Non-zero winding rule (default).
        #[default]
        NonZero => "nonzero",
        /// Even-odd rule.
        EvenOdd => "evenodd",
    }
}

keyword_enum! {
    /// Pattern repetition mode.
    Repetition, "repetition" {
        /// Repeat in both directions (default).
        #[default]
        Repeat => "repeat",
        /// Repeat only horizontally.
        RepeatX => "repeat-x",
        /// Repeat only vertically.
        RepeatY => "repeat-y",
        /// No repetition (single instance).
        NoRepeat => "no-repeat",
    }
}

impl FillRule {
    /// Whether `s` is a fill-rule keyword rather than a color.
    ///
    /// This is the predicate that resolves the `fill(color)` / `fill(rule)` overload.
    pub fn from_keyword(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

/// Opaque reference to a pattern created by the rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternHandle(pub u32);

/// Fill or stroke paint.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Any CSS color string; interpretation is left to the context.
    Color(String),
    Gradient(Gradient),
    Pattern(PatternHandle),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Color("#000000".to_string())
    }
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Color(color.to_string())
    }
}

impl From<String> for Paint {
    fn from(color: String) -> Self {
        Paint::Color(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}

impl From<PatternHandle> for Paint {
    fn from(pattern: PatternHandle) -> Self {
        Paint::Pattern(pattern)
    }
}

/// Trailing argument of `fill_with` / `clip_with`: either a fill rule or a paint.
#[derive(Debug, Clone, PartialEq)]
pub enum FillArg {
    Rule(FillRule),
    Paint(Paint),
}

impl From<&str> for FillArg {
    fn from(s: &str) -> Self {
        match FillRule::from_keyword(s) {
            Some(rule) => FillArg::Rule(rule),
            None => FillArg::Paint(Paint::Color(s.to_string())),
        }
    }
}

impl From<String> for FillArg {
    fn from(s: String) -> Self {
        FillArg::from(s.as_str())
    }
}

impl From<FillRule> for FillArg {
    fn from(rule: FillRule) -> Self {
        FillArg::Rule(rule)
    }
}

impl From<Paint> for FillArg {
    fn from(paint: Paint) -> Self {
        FillArg::Paint(paint)
    }
}

impl From<Gradient> for FillArg {
    fn from(gradient: Gradient) -> Self {
        FillArg::Paint(Paint::Gradient(gradient))
    }
}

impl From<PatternHandle> for FillArg {
    fn from(pattern: PatternHandle) -> Self {
        FillArg::Paint(Paint::Pattern(pattern))
    }
}
