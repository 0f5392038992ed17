//! CPU-side PNG rendering of a [`TimeField`] heatmap.
//!
//! Feature-gated behind `png` (default on) so embedders can depend on this
//! crate without pulling in the `image` crate. The pixel buffer conversion
//! itself lives in [`crate::pixel`] (always available).

use cornerfield_core::error::FieldError;
use cornerfield_core::field::TimeField;
use cornerfield_core::palette::Palette;
use std::path::Path;

use crate::pixel::field_to_rgba;

/// Writes a field as a PNG heatmap, mapping log-compressed values through
/// the given palette.
///
/// Returns `FieldError::InvalidDimensions` if the field dimensions overflow
/// `u32`, or `FieldError::Io` on write failure.
pub fn write_png(
    field: &TimeField,
    palette: &Palette,
    sentinel: f64,
    path: &Path,
) -> Result<(), FieldError> {
    let rgba = field_to_rgba(field, palette, sentinel);
    let w = u32::try_from(field.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(field.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_png_round_trip() {
        let field = TimeField::filled(16, 16, 42.0).unwrap();
        let palette = Palette::blues();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");

        write_png(&field, &palette, 10_000.0, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
    }

    #[test]
    fn write_png_to_bad_path_returns_io_error() {
        let field = TimeField::new(4, 4).unwrap();
        let result = write_png(
            &field,
            &Palette::blues(),
            10_000.0,
            Path::new("/nonexistent-dir/heatmap.png"),
        );
        assert!(matches!(result, Err(FieldError::Io(_))));
    }
}
