//! Validation errors.
//!
//! Only caller input that can never reach the geometry math ends up here.
//! Geometric "no result" outcomes (parallel lines, collinear points, a line
//! clipped to nothing) are `None` or an empty `Vec`, never a `KernelError`.

use thiserror::Error;

/// Errors raised when constructing kernel value types from caller input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("hatch spacing must be positive, got {0}")]
    NonPositiveSpacing(f64),

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("{what} must be finite")]
    NonFinite { what: &'static str },

    #[error("polygon bounds need at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("rectangle is inverted: min ({min_x}, {min_y}) exceeds max ({max_x}, {max_y})")]
    InvertedRect {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("SVG parse error: {0}")]
    Svg(String),

    #[error("path data error: {0}")]
    PathData(String),

    #[error("invalid color: {0}")]
    Color(String),

    #[error("no closed boundary found in input")]
    NoBounds,
}

/// Convenience alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;

/// Reject non-finite or non-positive lengths typed by a user.
pub fn require_positive(what: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(KernelError::NonFinite { what });
    }
    if value <= 0.0 {
        return Err(KernelError::NonPositive { what, value });
    }
    Ok(value)
}
