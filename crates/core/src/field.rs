//! Two-dimensional field of corner-alignment times.
//!
//! A `TimeField` stores `width * height` f64 values in row-major layout:
//! row index = q (vertical start position), column index = p (horizontal
//! start position). Values are non-negative; a cell holds either the minimum
//! valid reflection time for that start position or the caller's sentinel.
//! Unlike a periodic simulation lattice, reflection times are not periodic
//! in the start position, so indexing is bounds-checked rather than wrapped.

use crate::error::FieldError;

/// A 2D scalar field of non-negative times, row-major with row = q index.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl TimeField {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Creates a field filled with `value`; negative values clamp to 0.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, FieldError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value.max(0.0); len],
        })
    }

    /// Creates a field from a pre-built data vector, validating that
    /// `data.len() == width * height`.
    ///
    /// Values are **not** clamped; the caller is responsible for ensuring
    /// they are non-negative.
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, FieldError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(FieldError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Field width in cells (the p axis).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells (the q axis).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Values written here bypass the non-negativity clamp. Evaluator hot
    /// paths that manage their own invariants can use this directly.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Gets the value at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} field",
            self.width,
            self.height
        );
        self.data[y * self.width + x]
    }

    /// Sets the value at column `x`, row `y`; negative values clamp to 0.
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} field",
            self.width,
            self.height
        );
        self.data[y * self.width + x] = value.max(0.0);
    }

    /// Smallest value in the field.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest value in the field.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns a copy with every value mapped through `log10(v + 1)`.
    ///
    /// This is the presentation-side dynamic-range compression applied before
    /// color mapping; it is well-defined because field values never go
    /// negative. The evaluator itself never applies it.
    pub fn log_compressed(&self) -> TimeField {
        TimeField {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| (v + 1.0).log10()).collect(),
        }
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, v)
        })
    }
}

/// Validates dimensions and returns `width * height`.
fn checked_len(width: usize, height: usize) -> Result<usize, FieldError> {
    if width == 0 || height == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(FieldError::InvalidDimensions)
}
