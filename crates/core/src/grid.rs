//! Sampling grid of initial logo positions.
//!
//! `resolution` evenly spaced positions per axis, endpoints included, so the
//! four exact corner starts are always part of the lattice.

use crate::error::FieldError;
use crate::geometry::Rectangle;

/// Ordered start-position coordinates: `p_coords` over `[0, L]` and
/// `q_coords` over `[0, M]`, each of length `resolution`.
///
/// Immutable once built; the builder is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    p_coords: Vec<f64>,
    q_coords: Vec<f64>,
}

impl SampleGrid {
    /// Builds the lattice for `rectangle` at `resolution` points per axis.
    ///
    /// Rejects `resolution < 2` (a single point cannot represent a
    /// distribution) and invalid geometry.
    pub fn build(rectangle: &Rectangle, resolution: usize) -> Result<Self, FieldError> {
        if resolution < 2 {
            return Err(FieldError::InvalidResolution(resolution));
        }
        rectangle.validate()?;
        Ok(Self {
            p_coords: linspace(0.0, rectangle.span_x(), resolution),
            q_coords: linspace(0.0, rectangle.span_y(), resolution),
        })
    }

    /// Number of sample points per axis.
    pub fn resolution(&self) -> usize {
        self.p_coords.len()
    }

    /// Horizontal start positions in `[0, L]`, ascending.
    pub fn p_coords(&self) -> &[f64] {
        &self.p_coords
    }

    /// Vertical start positions in `[0, M]`, ascending.
    pub fn q_coords(&self) -> &[f64] {
        &self.q_coords
    }
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// Requires `count >= 2`; the endpoints are written exactly rather than
/// accumulated, so `linspace(0, L, n)` always ends on precisely `L`.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    debug_assert!(count >= 2);
    let step = (end - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect()
}
