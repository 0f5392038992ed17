//! Error types for the cornerfield core.

use thiserror::Error;

/// Errors produced by grid, field, and evaluator operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The sampling resolution was below the 2-point minimum.
    #[error("invalid resolution: {0} (a sampling grid needs at least 2 points per axis)")]
    InvalidResolution(usize),

    /// The rectangle left no room for the logo on at least one axis.
    #[error("invalid geometry: outer {outer_width}x{outer_height} must exceed logo {logo_width}x{logo_height} on both axes")]
    InvalidGeometry {
        outer_width: f64,
        outer_height: f64,
        logo_width: f64,
        logo_height: f64,
    },

    /// Speed was not a positive finite number.
    #[error("invalid speed: {0} (must be positive and finite)")]
    InvalidSpeed(f64),

    /// Mirror-index search depth was zero.
    #[error("invalid mirror range: {0} (must be at least 1)")]
    InvalidMirrorRange(usize),

    /// Alignment tolerance was outside the open interval (0, 0.5).
    #[error("invalid tolerance: {0} (must lie strictly between 0 and 0.5)")]
    InvalidTolerance(f64),

    /// Sentinel was not a positive finite number.
    #[error("invalid sentinel: {0} (must be positive and finite)")]
    InvalidSentinel(f64),

    /// Width or height was zero when creating a TimeField.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A data vector did not match the declared field dimensions.
    #[error("dimension mismatch: {width}x{height} field cannot hold {len} values")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A requested engine name was not recognized by the registry.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
