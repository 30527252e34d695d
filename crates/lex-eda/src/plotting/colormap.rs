//! Reversed red-blue diverging colour scale on [-1, 1].

use plotters::style::RGBColor;

/// ColorBrewer RdBu stops from -1 (dark blue) to +1 (dark red).
const RDBU_R: [(u8, u8, u8); 11] = [
    (0x05, 0x30, 0x61),
    (0x21, 0x66, 0xac),
    (0x43, 0x93, 0xc3),
    (0x92, 0xc5, 0xde),
    (0xd1, 0xe5, 0xf0),
    (0xf7, 0xf7, 0xf7),
    (0xfd, 0xdb, 0xc7),
    (0xf4, 0xa5, 0x82),
    (0xd6, 0x60, 0x4d),
    (0xb2, 0x18, 0x2b),
    (0x67, 0x00, 0x1f),
];

/// Fill for cells without a defined correlation.
pub const MISSING_COLOR: RGBColor = RGBColor(200, 200, 200);

/// Colour of `value` on the fixed [-1, 1] scale. Values outside the range
/// are clamped; NaN maps to [`MISSING_COLOR`].
pub fn rdbu_r(value: f64) -> RGBColor {
    if value.is_nan() {
        return MISSING_COLOR;
    }

    let t = (value.clamp(-1.0, 1.0) + 1.0) / 2.0;
    let position = t * (RDBU_R.len() - 1) as f64;
    let lower = (position.floor() as usize).min(RDBU_R.len() - 2);
    let fraction = position - lower as f64;

    let (r0, g0, b0) = RDBU_R[lower];
    let (r1, g1, b1) = RDBU_R[lower + 1];
    RGBColor(
        lerp(r0, r1, fraction),
        lerp(g0, g1, fraction),
        lerp(b0, b1, fraction),
    )
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(rdbu_r(-1.0), RGBColor(0x05, 0x30, 0x61));
        assert_eq!(rdbu_r(0.0), RGBColor(0xf7, 0xf7, 0xf7));
        assert_eq!(rdbu_r(1.0), RGBColor(0x67, 0x00, 0x1f));
    }

    #[test]
    fn test_clamped_and_nan() {
        assert_eq!(rdbu_r(3.0), rdbu_r(1.0));
        assert_eq!(rdbu_r(-7.0), rdbu_r(-1.0));
        assert_eq!(rdbu_r(f64::NAN), MISSING_COLOR);
    }

    #[test]
    fn test_positive_is_red_negative_is_blue() {
        let warm = rdbu_r(0.7);
        let cold = rdbu_r(-0.7);
        assert!(warm.0 > warm.2);
        assert!(cold.2 > cold.0);
    }
}
