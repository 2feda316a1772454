//! Multi-line text layout.
//!
//! [`layout`] splits text into lines that fit a maximum width according to a
//! [`BreakMode`]. It never measures pixels itself: widths come from a [`TextMeasure`],
//! which lets the same algorithm run against a live context or a test stub.

use crate::error::CanvasError;
use std::str::FromStr;

/// Measures the advance width of a string.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f64,
{
    fn measure(&mut self, text: &str) -> f64 {
        self(text)
    }
}

/// Where a line may be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakMode {
    /// Break at whitespace only; overlong words overflow.
    #[default]
    Normal,
    /// Break at whitespace, and split words that cannot fit on a line of their own.
    BreakWord,
    /// Break between any two characters.
    BreakAll,
}

impl BreakMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakMode::Normal => "normal",
            BreakMode::BreakWord => "break-word",
            BreakMode::BreakAll => "break-all",
        }
    }
}

impl FromStr for BreakMode {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(BreakMode::Normal),
            "break-word" => Ok(BreakMode::BreakWord),
            "break-all" => Ok(BreakMode::BreakAll),
            _ => Err(CanvasError::InvalidKeyword {
                kind: "break mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Options for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Wrap width. `None` only breaks at explicit newlines.
    pub max_width: Option<f64>,
    /// Vertical distance between consecutive lines.
    pub line_height: f64,
    pub break_mode: BreakMode,
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Offset from the first line's baseline.
    pub y: f64,
}

/// The result of [`layout`]. Always holds at least one line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<TextLine>,
}

impl TextLayout {
    /// Line strings in order.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total height covered by the lines.
    pub fn height(&self, line_height: f64) -> f64 {
        self.lines.len() as f64 * line_height
    }
}

/// Lay out `text` into lines.
pub fn layout<M>(text: &str, options: &LayoutOptions, measure: &mut M) -> TextLayout
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();

    for segment in text.split('\n') {
        let segment = segment.strip_suffix('\r').unwrap_or(segment);
        match options.max_width {
            None => lines.push(segment.to_string()),
            Some(max_width) => match options.break_mode {
                BreakMode::Normal => wrap_words(segment, max_width, false, measure, &mut lines),
                BreakMode::BreakWord => wrap_words(segment, max_width, true, measure, &mut lines),
                BreakMode::BreakAll => {
                    let last = pack_chars(segment, String::new(), max_width, measure, &mut lines);
                    lines.push(last);
                }
            },
        }
    }

    TextLayout {
        lines: lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextLine {
                text,
                y: i as f64 * options.line_height,
            })
            .collect(),
    }
}

fn wrap_words<M>(
    segment: &str,
    max_width: f64,
    split_long_words: bool,
    measure: &mut M,
    lines: &mut Vec<String>,
) where
    M: TextMeasure + ?Sized,
{
    let mut line = String::new();

    for word in segment.split_whitespace() {
        if !line.is_empty() {
            let candidate = format!("{line} {word}");
            if measure.measure(&candidate) <= max_width {
                line = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut line));
        }

        line = if split_long_words && measure.measure(word) > max_width {
            pack_chars(word, String::new(), max_width, measure, lines)
        } else {
            word.to_string()
        };
    }

    lines.push(line);
}

/// Append characters to `line`, flushing full lines into `lines`. Returns the
/// unfinished last line. Every flushed line holds at least one character.
fn pack_chars<M>(
    text: &str,
    mut line: String,
    max_width: f64,
    measure: &mut M,
    lines: &mut Vec<String>,
) -> String
where
    M: TextMeasure + ?Sized,
{
    for ch in text.chars() {
        let mut candidate = line.clone();
        candidate.push(ch);
        if !line.is_empty() && measure.measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, ch.to_string()));
        } else {
            line = candidate;
        }
    }
    line
}
