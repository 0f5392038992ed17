//! Screen-and-logo rectangle geometry.
//!
//! The logo's top-left corner travels inside `[0, L] x [0, M]` where
//! `L = outer_width - logo_width` and `M = outer_height - logo_height`.
//! All of the reflection arithmetic works on those spans, never on the raw
//! outer dimensions.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Default outer (screen) width in pixels.
pub const DEFAULT_OUTER_WIDTH: f64 = 1920.0;
/// Default outer (screen) height in pixels.
pub const DEFAULT_OUTER_HEIGHT: f64 = 1080.0;
/// Default logo width in pixels.
pub const DEFAULT_LOGO_WIDTH: f64 = 300.0;
/// Default logo height in pixels.
pub const DEFAULT_LOGO_HEIGHT: f64 = 200.0;

/// Immutable screen-and-logo geometry.
///
/// `Default` is the drop-in 1920x1080 screen with a 300x200 logo used by the
/// surrounding visualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub outer_width: f64,
    pub outer_height: f64,
    pub logo_width: f64,
    pub logo_height: f64,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            outer_width: DEFAULT_OUTER_WIDTH,
            outer_height: DEFAULT_OUTER_HEIGHT,
            logo_width: DEFAULT_LOGO_WIDTH,
            logo_height: DEFAULT_LOGO_HEIGHT,
        }
    }
}

impl Rectangle {
    /// Creates a rectangle, validating that both travel spans are positive.
    pub fn new(
        outer_width: f64,
        outer_height: f64,
        logo_width: f64,
        logo_height: f64,
    ) -> Result<Self, FieldError> {
        let rect = Self {
            outer_width,
            outer_height,
            logo_width,
            logo_height,
        };
        rect.validate()?;
        Ok(rect)
    }

    /// Horizontal travel span `L = outer_width - logo_width`.
    pub fn span_x(&self) -> f64 {
        self.outer_width - self.logo_width
    }

    /// Vertical travel span `M = outer_height - logo_height`.
    pub fn span_y(&self) -> f64 {
        self.outer_height - self.logo_height
    }

    /// Validates the `L > 0, M > 0` invariant.
    ///
    /// Non-finite inputs fail this check too, since a NaN span is not
    /// greater than zero.
    pub fn validate(&self) -> Result<(), FieldError> {
        if !(self.span_x() > 0.0 && self.span_y() > 0.0)
            || !self.span_x().is_finite()
            || !self.span_y().is_finite()
        {
            return Err(FieldError::InvalidGeometry {
                outer_width: self.outer_width,
                outer_height: self.outer_height,
                logo_width: self.logo_width,
                logo_height: self.logo_height,
            });
        }
        Ok(())
    }

    /// True when the two travel spans are equal (the transpose-symmetric case).
    pub fn is_square_span(&self) -> bool {
        (self.span_x() - self.span_y()).abs() < f64::EPSILON
    }
}
