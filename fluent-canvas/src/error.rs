//! Error types for fluent-canvas.

use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur while driving the facade.
///
/// Malformed font strings and degenerate shape parameters are not errors: they fall back
/// to the default font and to drawing nothing, so a long drawing chain is never aborted
/// by a single bad style value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanvasError {
    /// A point list did not follow one of the supported encodings.
    #[error("Malformed point list: expected {expected}, got {found}")]
    MalformedPointList {
        /// Shape the list was expected to have at the failing element.
        expected: &'static str,
        /// Debug rendering of the offending value.
        found: String,
    },

    /// An operation taking a variable number of numeric arguments got an arity it does not
    /// support.
    #[error("Invalid argument count for {operation}: {count}")]
    InvalidArgumentCount {
        /// Name of the operation.
        operation: &'static str,
        /// Number of arguments received.
        count: usize,
    },

    /// No 2D context could be obtained from the drawing surface.
    #[error("2D rendering context unavailable")]
    ContextUnavailable,

    /// A keyword string did not name a known value.
    #[error("Invalid {kind} keyword: '{value}'")]
    InvalidKeyword {
        /// What kind of keyword was being parsed (e.g. "line cap").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
