//! Pure-computation pixel buffer conversion from [`TimeField`] + [`Palette`].
//!
//! Time fields span several orders of magnitude between fast-converging
//! cells and sentinel cells, so values are log-compressed before color
//! mapping: `t = log10(v + 1) / log10(sentinel + 1)`. The compression is
//! well-defined because the evaluator never emits negative values.

use cornerfield_core::field::TimeField;
use cornerfield_core::palette::Palette;

/// Maps field values through log compression and a palette to an RGBA8 buffer.
///
/// `sentinel` is the field's "unreachable" marker, which normalizes to 1.0
/// (the palette's last stop). Each cell is written as four bytes
/// (R, G, B, 255); the buffer length is `width * height * 4`.
pub fn field_to_rgba(field: &TimeField, palette: &Palette, sentinel: f64) -> Vec<u8> {
    let denom = (sentinel + 1.0).log10();
    field
        .data()
        .iter()
        .flat_map(|&v| {
            let t = ((v + 1.0).log10() / denom).clamp(0.0, 1.0);
            let srgb = palette.sample(t);
            let r = (srgb.r * 255.0).round() as u8;
            let g = (srgb.g * 255.0).round() as u8;
            let b = (srgb.b * 255.0).round() as u8;
            [r, g, b, 255u8]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_has_four_bytes_per_cell() {
        let field = TimeField::new(8, 4).unwrap();
        let buf = field_to_rgba(&field, &Palette::blues(), 10_000.0);
        assert_eq!(buf.len(), 8 * 4 * 4);
    }

    #[test]
    fn alpha_is_always_opaque() {
        let field = TimeField::filled(4, 4, 123.0).unwrap();
        let buf = field_to_rgba(&field, &Palette::viridis(), 10_000.0);
        for (i, &byte) in buf.iter().enumerate() {
            if i % 4 == 3 {
                assert_eq!(byte, 255, "alpha at pixel {} should be 255", i / 4);
            }
        }
    }

    #[test]
    fn zero_time_maps_to_first_palette_stop() {
        let field = TimeField::new(1, 1).unwrap();
        let buf = field_to_rgba(&field, &Palette::grayscale(), 10_000.0);
        // log10(0 + 1) = 0 -> t = 0 -> black.
        assert!(buf[0] < 5, "r at t=0: {}", buf[0]);
        assert!(buf[1] < 5 && buf[2] < 5);
    }

    #[test]
    fn sentinel_maps_to_last_palette_stop() {
        let sentinel = 10_000.0;
        let field = TimeField::filled(1, 1, sentinel).unwrap();
        let buf = field_to_rgba(&field, &Palette::grayscale(), sentinel);
        assert!(buf[0] > 250, "r at sentinel: {}", buf[0]);
        assert!(buf[1] > 250 && buf[2] > 250);
    }

    #[test]
    fn compression_orders_small_before_large() {
        // Two cells: a quick alignment and a slow one. After log compression
        // the quick cell must sit strictly closer to the palette start.
        let field = TimeField::from_data(2, 1, vec![3.0, 5_000.0]).unwrap();
        let buf = field_to_rgba(&field, &Palette::grayscale(), 10_000.0);
        assert!(
            buf[0] < buf[4],
            "quick cell ({}) should be darker than slow cell ({})",
            buf[0],
            buf[4]
        );
    }

    #[test]
    fn values_above_sentinel_clamp_to_last_stop() {
        // The evaluator never produces these, but the mapping stays total.
        let field = TimeField::filled(1, 1, 99_999.0).unwrap();
        let buf = field_to_rgba(&field, &Palette::grayscale(), 10_000.0);
        assert!(buf[0] > 250);
    }
}
