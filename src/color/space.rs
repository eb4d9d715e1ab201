//! Conversion math between color spaces.
//!
//! All paths go through gamma-encoded sRGB except the polar/rectangular pairs
//! (`lab`/`lch`, `oklab`/`oklch`), which convert directly. Transfer functions
//! are sign preserving so out-of-gamut values survive a round trip.
//!
//! # Conversion failure
//!
//! A conversion whose output contains a non-finite channel does not error.
//! It yields [`ConversionResult::Fallback`] carrying zeroed coordinates in the
//! target space (alpha kept), so there is always something renderable.

use super::model::{Color, Coords, Mode};

/// Chroma below which a color is treated as achromatic (hue forced to 0).
const ACHROMATIC: f64 = 1e-6;

/// sRGB channel spread below which a color is a gray.
const GRAY: f64 = 1e-9;

/// CIE constants for the CIELAB companding function.
const LAB_E: f64 = 216.0 / 24389.0;
const LAB_K: f64 = 24389.0 / 27.0;

/// D50 reference white, from its xy chromaticity (0.3457, 0.3585).
const D50: [f64; 3] = [0.3457 / 0.3585, 1.0, (1.0 - 0.3457 - 0.3585) / 0.3585];

/// Outcome of converting a color into another space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionResult {
    Exact(Color),
    /// Zeroed stand-in; the real conversion produced non-finite channels.
    Fallback(Color),
}

impl ConversionResult {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub const fn into_color(self) -> Color {
        match self {
            Self::Exact(c) | Self::Fallback(c) => c,
        }
    }
}

/// Convert `color` into `target`.
pub fn convert(color: &Color, target: Mode) -> ConversionResult {
    let coords = convert_coords(color.coords, target);
    if coords.is_finite() {
        ConversionResult::Exact(Color::new(coords, color.alpha))
    } else {
        ConversionResult::Fallback(Color::new(target.zero(), color.alpha))
    }
}

/// Re-express `color` in OKLCh, the storage form for the editor.
pub fn to_canonical_oklch(color: &Color) -> ConversionResult {
    convert(color, Mode::Oklch)
}

/// Fold a hue angle into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if h >= 360.0 { 0.0 } else { h }
}

fn convert_coords(coords: Coords, target: Mode) -> Coords {
    if coords.mode() == target {
        return coords;
    }

    match (coords, target) {
        (Coords::Lab { l, a, b }, Mode::Lch) => {
            let (c, h) = rect_to_polar(a, b);
            Coords::Lch { l, c, h }
        }
        (Coords::Lch { l, c, h }, Mode::Lab) => {
            let (a, b) = polar_to_rect(c, h);
            Coords::Lab { l, a, b }
        }
        (Coords::Oklab { l, a, b }, Mode::Oklch) => {
            let (c, h) = rect_to_polar(a, b);
            Coords::Oklch { l, c, h }
        }
        (Coords::Oklch { l, c, h }, Mode::Oklab) => {
            let (a, b) = polar_to_rect(c, h);
            Coords::Oklab { l, a, b }
        }
        _ => from_srgb(to_srgb(coords), target),
    }
}

/// Gamma-encoded sRGB channels for any coordinates.
pub fn to_srgb(coords: Coords) -> [f64; 3] {
    match coords {
        Coords::Rgb { r, g, b } => [r, g, b],
        Coords::Hsl { h, s, l } => hsl_to_srgb(h, s, l),
        Coords::Hwb { h, w, b } => hwb_to_srgb(h, w, b),
        Coords::Lab { l, a, b } => encode(lab_to_linear(l, a, b)),
        Coords::Lch { l, c, h } => {
            let (a, b) = polar_to_rect(c, h);
            encode(lab_to_linear(l, a, b))
        }
        Coords::Oklab { l, a, b } => encode(oklab_to_linear(l, a, b)),
        Coords::Oklch { l, c, h } => {
            let (a, b) = polar_to_rect(c, h);
            encode(oklab_to_linear(l, a, b))
        }
    }
}

fn from_srgb([r, g, b]: [f64; 3], target: Mode) -> Coords {
    match target {
        Mode::Rgb => Coords::Rgb { r, g, b },
        Mode::Hsl => {
            let [h, s, l] = srgb_to_hsl(r, g, b);
            Coords::Hsl { h, s, l }
        }
        Mode::Hwb => {
            let [h, w, b] = srgb_to_hwb(r, g, b);
            Coords::Hwb { h, w, b }
        }
        Mode::Lab => {
            let [l, a, b] = linear_to_lab(decode([r, g, b]));
            Coords::Lab { l, a, b }
        }
        Mode::Lch => {
            let [l, a, b] = linear_to_lab(decode([r, g, b]));
            let (c, h) = rect_to_polar(a, b);
            Coords::Lch { l, c, h }
        }
        Mode::Oklab => {
            let [l, a, b] = linear_to_oklab(decode([r, g, b]));
            Coords::Oklab { l, a, b }
        }
        Mode::Oklch => {
            let [l, a, b] = linear_to_oklab(decode([r, g, b]));
            let (c, h) = rect_to_polar(a, b);
            Coords::Oklch { l, c, h }
        }
    }
}

// ============================================================================
// sRGB transfer (IEC 61966-2-1)
// ============================================================================

fn srgb_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.04045 {
        c / 12.92
    } else {
        c.signum() * ((abs + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    let abs = c.abs();
    if abs > 0.003_130_8 {
        c.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
    } else {
        c * 12.92
    }
}

fn decode(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(srgb_to_linear)
}

fn encode(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(linear_to_srgb)
}

// ============================================================================
// Polar <-> rectangular
// ============================================================================

fn rect_to_polar(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    let h = if c < ACHROMATIC {
        0.0
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    (c, h)
}

fn polar_to_rect(c: f64, h: f64) -> (f64, f64) {
    let rad = h.to_radians();
    (c * rad.cos(), c * rad.sin())
}

// ============================================================================
// HSL / HWB
// ============================================================================

/// Hue of an sRGB triple in degrees; 0 for grays.
fn srgb_hue(r: f64, g: f64, b: f64, max: f64, min: f64) -> f64 {
    let d = max - min;
    if d < GRAY {
        return 0.0;
    }
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    sector * 60.0
}

fn srgb_to_hsl(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let s = if max - min < GRAY || l < GRAY || l > 1.0 - GRAY {
        0.0
    } else {
        (max - min) / (1.0 - (max + min - 1.0).abs())
    };
    [srgb_hue(r, g, b, max, min), s, l]
}

fn hsl_to_srgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = normalize_hue(h);
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    [f(0.0), f(8.0), f(4.0)]
}

fn srgb_to_hwb(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    [srgb_hue(r, g, b, max, min), min, 1.0 - max]
}

fn hwb_to_srgb(h: f64, w: f64, b: f64) -> [f64; 3] {
    if w + b >= 1.0 {
        let gray = w / (w + b);
        return [gray; 3];
    }
    hsl_to_srgb(h, 1.0, 0.5).map(|c| c * (1.0 - w - b) + w)
}

// ============================================================================
// CIELAB (D50)
// ============================================================================

// linear sRGB -> XYZ is Bradford-adapted to D50; each row sums to the
// matching `D50` component so grays land on a = b = 0.
fn linear_to_lab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let x = 0.436_065_746_874_269_36 * r + 0.385_151_509_590_159_6 * g + 0.143_078_419_965_138_68 * b;
    let y = 0.222_493_177_110_565_18 * r + 0.716_887_013_094_482_4 * g + 0.060_619_809_794_952_36 * b;
    let z = 0.013_923_921_463_169_396 * r + 0.097_081_324_231_410_17 * g + 0.714_099_356_815_880_7 * b;

    let f = |v: f64| {
        if v > LAB_E {
            v.cbrt()
        } else {
            (LAB_K * v + 16.0) / 116.0
        }
    };
    let fx = f(x / D50[0]);
    let fy = f(y / D50[1]);
    let fz = f(z / D50[2]);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn lab_to_linear(l: f64, a: f64, b: f64) -> [f64; 3] {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let inv = |t: f64| {
        let cube = t * t * t;
        if cube > LAB_E {
            cube
        } else {
            (116.0 * t - 16.0) / LAB_K
        }
    };
    let x = inv(fx) * D50[0];
    let y = inv(fy) * D50[1];
    let z = inv(fz) * D50[2];

    [
        3.134_135_852_900_117_8 * x - 1.617_385_998_018_042 * y - 0.490_662_217_911_097_54 * z,
        -0.978_795_476_555_777_7 * x + 1.916_254_377_395_988_4 * y + 0.033_442_873_390_366_93 * z,
        0.071_955_392_557_947_35 * x - 0.228_976_759_815_182_03 * y + 1.405_386_035_113_118_2 * z,
    ]
}

// ============================================================================
// OKLab
// ============================================================================

// M1 rows sum to 1 and the a/b rows of M2 sum to 0, so grays map to
// a = b = 0. The inverses are exact inverses of these two matrices.
fn linear_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = (0.412_221_469_470_763 * r + 0.536_332_537_261_734_8 * g + 0.051_445_993_267_502_2 * b).cbrt();
    let m = (0.211_903_495_817_825_2 * r + 0.680_699_550_645_234_2 * g + 0.107_396_953_536_940_54 * b).cbrt();
    let s = (0.088_302_459_190_056_41 * r + 0.281_718_839_136_121_45 * g + 0.629_978_701_673_822_1 * b).cbrt();

    [
        0.210_454_268_309_314 * l + 0.793_617_774_702_305_3 * m - 0.004_072_043_011_619_299 * s,
        1.977_998_532_431_168_4 * l - 2.428_592_242_048_579_5 * m + 0.450_593_709_617_411 * s,
        0.025_904_042_465_547_8 * l + 0.782_771_712_457_529_6 * m - 0.808_675_754_923_077_4 * s,
    ]
}

fn oklab_to_linear(l: f64, a: f64, b: f64) -> [f64; 3] {
    let l_ = l + 0.396_337_777_376_175 * a + 0.215_803_757_309_913_6 * b;
    let m_ = l - 0.105_561_345_815_658_56 * a - 0.063_854_172_825_813_34 * b;
    let s_ = l - 0.089_484_177_529_811_83 * a - 1.291_485_548_019_409_4 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    [
        4.076_741_636_075_958 * l - 3.307_711_539_258_063 * m + 0.230_969_903_182_104_47 * s,
        -1.268_437_973_285_032 * l + 2.609_757_349_287_689 * m - 0.341_319_376_002_657_3 * s,
        -0.004_196_076_138_675_48 * l - 0.703_418_617_935_936_4 * m + 1.707_614_694_074_612 * s,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn assert_channels(coords: Coords, expected: [f64; 3], eps: f64) {
        let got = coords.channels();
        for (g, e) in got.iter().zip(expected) {
            assert!(close(*g, e, eps), "got {got:?}, expected {expected:?}");
        }
    }

    #[test]
    fn test_red_to_oklch() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let oklch = to_canonical_oklch(&red);
        assert!(!oklch.is_fallback());
        assert_channels(oklch.into_color().coords, [0.628, 0.2577, 29.23], 0.01);
    }

    #[test]
    fn test_red_to_lab_d50() {
        let lab = convert(&Color::rgb(1.0, 0.0, 0.0), Mode::Lab).into_color();
        assert_channels(lab.coords, [54.29, 80.82, 69.91], 0.05);
    }

    #[test]
    fn test_white_is_achromatic() {
        let white = Color::rgb(1.0, 1.0, 1.0);
        let oklch = convert(&white, Mode::Oklch).into_color();
        let [l, c, h] = oklch.coords.channels();
        assert!(close(l, 1.0, 1e-6));
        assert!(c < ACHROMATIC);
        assert_eq!(h, 0.0);

        let lch = convert(&white, Mode::Lch).into_color();
        assert_channels(lch.coords, [100.0, 0.0, 0.0], 1e-6);
    }

    #[test]
    fn test_grays_stay_achromatic_through_oklch() {
        for v in [0u8, 1, 0x77, 0x80, 0xC0, 254, 255] {
            let stored = to_canonical_oklch(&Color::rgb8(v, v, v)).into_color();
            assert_eq!(stored.coords.channels()[2], 0.0, "#{v:02X}");

            let [h, s, _] = convert(&stored, Mode::Hsl).into_color().coords.channels();
            assert_eq!((h, s), (0.0, 0.0), "#{v:02X}");

            let [h, ..] = convert(&stored, Mode::Hwb).into_color().coords.channels();
            assert_eq!(h, 0.0, "#{v:02X}");

            let [_, c, h] = convert(&stored, Mode::Lch).into_color().coords.channels();
            assert!(c < 1e-9, "#{v:02X}: c = {c}");
            assert_eq!(h, 0.0, "#{v:02X}");

            let [r, g, b] = convert(&stored, Mode::Rgb).into_color().coords.channels();
            assert!((r - g).abs() < GRAY && (g - b).abs() < GRAY, "#{v:02X}");
        }
    }

    #[test]
    fn test_saturation_stays_in_range() {
        for rgb in [[1.0, 1.0, 1.0 - 1e-12], [1e-12, 0.0, 0.0], [0.9, 0.1, 0.4]] {
            let [_, s, _] = srgb_to_hsl(rgb[0], rgb[1], rgb[2]);
            assert!((0.0..=1.0).contains(&s), "{rgb:?}: s = {s}");
        }
    }

    #[test]
    fn test_hsl_to_rgb() {
        let hsl = Color::new(Coords::Hsl { h: 210.0, s: 0.5, l: 0.5 }, None);
        let rgb = convert(&hsl, Mode::Rgb).into_color();
        assert_channels(rgb.coords, [0.25, 0.5, 0.75], 1e-12);
    }

    #[test]
    fn test_rgb_to_hsl_and_hwb() {
        let c = Color::rgb(0.25, 0.5, 0.75);
        let hsl = convert(&c, Mode::Hsl).into_color();
        assert_channels(hsl.coords, [210.0, 0.5, 0.5], 1e-12);

        let hwb = convert(&c, Mode::Hwb).into_color();
        assert_channels(hwb.coords, [210.0, 0.25, 0.25], 1e-12);
    }

    #[test]
    fn test_hwb_gray_when_whiteness_and_blackness_saturate() {
        let hwb = Color::new(Coords::Hwb { h: 120.0, w: 0.6, b: 0.6 }, None);
        let rgb = convert(&hwb, Mode::Rgb).into_color();
        assert_channels(rgb.coords, [0.5, 0.5, 0.5], 1e-12);
    }

    #[test]
    fn test_round_trip_through_every_space() {
        let start = Color::rgb(0.2, 0.6, 0.9);
        for mode in Mode::ALL {
            let there = convert(&start, mode).into_color();
            let back = convert(&there, Mode::Rgb).into_color();
            assert_channels(back.coords, [0.2, 0.6, 0.9], 1e-7);
        }
    }

    #[test]
    fn test_alpha_survives_conversion() {
        let c = Color::rgb(0.1, 0.2, 0.3).with_alpha(Some(0.4));
        for mode in Mode::ALL {
            assert_eq!(convert(&c, mode).into_color().alpha, Some(0.4));
        }
    }

    #[test]
    fn test_non_finite_result_falls_back_to_zero() {
        // cubing 1e200 overflows; this is the lossy path, not an error
        let huge = Color::new(Coords::Oklab { l: 1e200, a: 0.0, b: 0.0 }, Some(0.5));
        let result = convert(&huge, Mode::Rgb);
        assert!(result.is_fallback());
        assert_eq!(
            result.into_color(),
            Color::new(Coords::Rgb { r: 0.0, g: 0.0, b: 0.0 }, Some(0.5))
        );
    }

    #[test]
    fn test_fallback_keeps_missing_alpha_opaque() {
        let bad = Color::new(Coords::Lab { l: f64::NAN, a: 0.0, b: 0.0 }, None);
        let result = to_canonical_oklch(&bad);
        assert!(result.is_fallback());
        assert_eq!(result.into_color(), Color::oklch(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_same_mode_non_finite_falls_back() {
        let bad = Color::oklch(f64::INFINITY, 0.1, 10.0);
        assert!(to_canonical_oklch(&bad).is_fallback());
    }

    #[test]
    fn test_normalize_hue() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(-30.0), 330.0);
        assert_eq!(normalize_hue(725.0), 5.0);
        assert_eq!(normalize_hue(-1e-17), 0.0);
    }

    #[test]
    fn test_out_of_gamut_round_trip_is_preserved() {
        // oklch with chroma beyond sRGB produces negative channels; no clamping here
        let vivid = Color::oklch(0.7, 0.35, 150.0);
        let rgb = convert(&vivid, Mode::Rgb).into_color();
        assert!(rgb.coords.channels().iter().any(|&c| !(0.0..=1.0).contains(&c)));
        let back = convert(&rgb, Mode::Oklch).into_color();
        assert_channels(back.coords, [0.7, 0.35, 150.0], 1e-7);
    }
}
