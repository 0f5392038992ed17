//! Color types for heatmap rendering.
//!
//! Two representations: `Srgb` (gamma-encoded, what PNGs store) and
//! `LinearRgb` (gamma-decoded, where interpolation happens). Colorscale ramps
//! are short and ordered, so gamma-correct linear interpolation is enough;
//! no perceptual color space is involved. Uses `f64` throughout.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses a hex color string like "#08306b" or "08306b" (case insensitive).
    ///
    /// Returns `FieldError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| FieldError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| FieldError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| FieldError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn from_hex_parses_with_hash_prefix() {
        let c = Srgb::from_hex("#ff0080").unwrap();
        assert!((c.r - 1.0).abs() < EPSILON);
        assert!(c.g.abs() < EPSILON);
        assert!((c.b - 128.0 / 255.0).abs() < EPSILON);
    }

    #[test]
    fn from_hex_parses_without_prefix() {
        let c = Srgb::from_hex("08306b").unwrap();
        assert!((c.r - 8.0 / 255.0).abs() < EPSILON);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let lower = Srgb::from_hex("#a1b2c3").unwrap();
        let upper = Srgb::from_hex("#A1B2C3").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("#ff00aa0").is_err());
        assert!(Srgb::from_hex("").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn hex_round_trip() {
        let original = "#4292c6";
        let c = Srgb::from_hex(original).unwrap();
        assert_eq!(c.to_hex(), original);
    }

    #[test]
    fn to_hex_clamps_out_of_range_components() {
        let c = Srgb {
            r: 1.5,
            g: -0.2,
            b: 0.5,
        };
        assert_eq!(c.to_hex(), "#ff0080");
    }

    #[test]
    fn gamma_round_trip_preserves_components() {
        let original = Srgb {
            r: 0.25,
            g: 0.5,
            b: 0.75,
        };
        let back = linear_to_srgb(srgb_to_linear(original));
        assert!((back.r - original.r).abs() < 1e-12);
        assert!((back.g - original.g).abs() < 1e-12);
        assert!((back.b - original.b).abs() < 1e-12);
    }

    #[test]
    fn black_and_white_are_gamma_fixed_points() {
        let black = srgb_to_linear(Srgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        });
        assert_eq!(black.r, 0.0);
        let white = srgb_to_linear(Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        });
        assert!((white.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gamma_decode_darkens_midtones() {
        // Linear value of mid gray is well below 0.5.
        let mid = srgb_to_linear(Srgb {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        });
        assert!(mid.r < 0.25, "expected linear mid gray < 0.25, got {}", mid.r);
    }

    #[test]
    fn serde_round_trips_as_hex_string() {
        let c = Srgb::from_hex("#2171b5").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#2171b5\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn serde_rejects_malformed_hex() {
        assert!(serde_json::from_str::<Srgb>("\"#zz0000\"").is_err());
    }
}
