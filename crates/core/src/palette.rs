//! Heatmap colorscales: ordered sRGB stops sampled by interpolation.
//!
//! Stops are evenly spaced along the `t` parameter and interpolated in
//! linear RGB (gamma decoded at the stops, re-encoded at the sample) so
//! ramps stay smooth without banding at the stop boundaries.

use crate::color::{linear_to_srgb, srgb_to_linear, Srgb};
use crate::error::FieldError;

/// Names of the built-in colorscales, as accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["blues", "viridis", "magma", "grayscale"];

/// A colorscale of ordered sRGB stops, sampled by interpolation.
///
/// `sample(0.0)` returns the first stop, `sample(1.0)` the last.
#[derive(Debug, Clone)]
pub struct Palette {
    stops: Vec<Srgb>,
}

impl Palette {
    /// Creates a new palette from a vector of sRGB stops.
    ///
    /// Requires at least one stop.
    pub fn new(stops: Vec<Srgb>) -> Result<Self, FieldError> {
        if stops.is_empty() {
            return Err(FieldError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Creates a palette by parsing hex color strings.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    pub fn from_hex(hexes: &[&str]) -> Result<Self, FieldError> {
        let stops: Result<Vec<Srgb>, FieldError> =
            hexes.iter().map(|h| Srgb::from_hex(h)).collect();
        Self::new(stops?)
    }

    /// Looks up a built-in palette by name.
    ///
    /// Returns `FieldError::InvalidPalette` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "blues" => Ok(Self::blues()),
            "viridis" => Ok(Self::viridis()),
            "magma" => Ok(Self::magma()),
            "grayscale" => Ok(Self::grayscale()),
            other => Err(FieldError::InvalidPalette(format!(
                "unknown palette '{other}', expected one of: {}",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    /// Returns the names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Returns the number of color stops in this palette.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if this palette has no stops. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples the palette at parameter `t` in [0, 1].
    ///
    /// Interpolates between the two surrounding stops in linear RGB.
    /// `t` is clamped to [0, 1]; NaN samples the first stop.
    /// For a single-stop palette, returns that stop for any `t`.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();

        if n == 1 {
            return self.stops[0];
        }

        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;

        let c0 = srgb_to_linear(self.stops[idx]);
        let c1 = srgb_to_linear(self.stops[idx + 1]);

        linear_to_srgb(crate::color::LinearRgb {
            r: c0.r + frac * (c1.r - c0.r),
            g: c0.g + frac * (c1.g - c0.g),
            b: c0.b + frac * (c1.b - c0.b),
        })
    }

    // -- Built-in colorscales --

    /// ColorBrewer Blues, light to dark. Low times read pale, sentinel
    /// cells deep navy.
    pub fn blues() -> Self {
        Self::from_hex(&[
            "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
            "#08519c", "#08306b",
        ])
        .expect("blues palette hex values are valid")
    }

    /// Viridis, dark purple to yellow.
    pub fn viridis() -> Self {
        Self::from_hex(&["#440154", "#414487", "#2a788e", "#22a884", "#7ad151", "#fde725"])
            .expect("viridis palette hex values are valid")
    }

    /// Magma, near-black to pale yellow.
    pub fn magma() -> Self {
        Self::from_hex(&["#000004", "#3b0f70", "#8c2981", "#de4968", "#fe9f6d", "#fcfdbf"])
            .expect("magma palette hex values are valid")
    }

    /// Black to white.
    pub fn grayscale() -> Self {
        Self::from_hex(&["#000000", "#ffffff"]).expect("grayscale palette hex values are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    // -- Construction --

    #[test]
    fn new_with_empty_vec_returns_error() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(FieldError::InvalidPalette(_))
        ));
    }

    #[test]
    fn from_hex_with_empty_slice_returns_error() {
        assert!(Palette::from_hex(&[]).is_err());
    }

    #[test]
    fn from_hex_propagates_bad_color() {
        assert!(matches!(
            Palette::from_hex(&["#ffffff", "#nothex"]),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_name_resolves_every_listed_palette() {
        for name in Palette::list_names() {
            assert!(Palette::from_name(name).is_ok(), "palette {name} missing");
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        let result = Palette::from_name("sunburn");
        assert!(matches!(result, Err(FieldError::InvalidPalette(_))));
    }

    #[test]
    fn blues_is_the_default_heatmap_scale() {
        let blues = Palette::blues();
        assert_eq!(blues.len(), 9);
        assert!(!blues.is_empty());
    }

    // -- Sampling --

    #[test]
    fn sample_at_zero_returns_first_stop() {
        let p = Palette::blues();
        let c = p.sample(0.0);
        assert_eq!(c.to_hex(), "#f7fbff");
    }

    #[test]
    fn sample_at_one_returns_last_stop() {
        let p = Palette::blues();
        let c = p.sample(1.0);
        assert_eq!(c.to_hex(), "#08306b");
    }

    #[test]
    fn sample_clamps_out_of_range_t() {
        let p = Palette::grayscale();
        assert_eq!(p.sample(-3.0).to_hex(), p.sample(0.0).to_hex());
        assert_eq!(p.sample(7.0).to_hex(), p.sample(1.0).to_hex());
    }

    #[test]
    fn sample_nan_returns_first_stop() {
        let p = Palette::grayscale();
        assert_eq!(p.sample(f64::NAN).to_hex(), "#000000");
    }

    #[test]
    fn sample_single_stop_palette_is_constant() {
        let p = Palette::from_hex(&["#123456"]).unwrap();
        for t in [0.0, 0.3, 0.99, 1.0] {
            assert_eq!(p.sample(t).to_hex(), "#123456");
        }
    }

    #[test]
    fn grayscale_midpoint_is_perceptual_mid_gray() {
        // Linear-space midpoint between black and white encodes to ~0.735 sRGB.
        let c = Palette::grayscale().sample(0.5);
        assert!((c.r - 0.735).abs() < 0.01, "got {}", c.r);
        assert!((c.r - c.g).abs() < EPSILON);
        assert!((c.g - c.b).abs() < EPSILON);
    }

    #[test]
    fn sample_is_monotone_in_lightness_for_grayscale() {
        let p = Palette::grayscale();
        let mut prev = -1.0;
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let c = p.sample(t);
            assert!(c.r >= prev, "lightness dipped at t={t}");
            prev = c.r;
        }
    }

    #[test]
    fn sample_interior_stop_is_hit_exactly() {
        // With 9 stops, t = 2/8 lands exactly on the third stop.
        let p = Palette::blues();
        assert_eq!(p.sample(2.0 / 8.0).to_hex(), "#c6dbef");
    }

    #[test]
    fn all_builtins_produce_in_range_components() {
        for name in Palette::list_names() {
            let p = Palette::from_name(name).unwrap();
            for i in 0..=50 {
                let c = p.sample(i as f64 / 50.0);
                for (label, v) in [("r", c.r), ("g", c.g), ("b", c.b)] {
                    assert!(
                        (-1e-9..=1.0 + 1e-9).contains(&v),
                        "{name} {label}={v} out of range at sample {i}"
                    );
                }
            }
        }
    }
}
