//! WCAG 2.1 relative luminance and contrast ratio.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::color::{Color, ColorParseError, Mode, convert, parse};

/// Which half of a contrast pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Foreground,
    Background,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        })
    }
}

/// What an unparseable side contributes to the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnparsedPolicy {
    /// Treat as black (luminance 0) and flag the side.
    #[default]
    Black,
    /// Refuse to compute.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContrastError {
    #[error("{side} color `{input}` is not recognized")]
    Unparseable {
        side: Side,
        input: String,
        #[source]
        source: ColorParseError,
    },
}

/// WCAG relative luminance of a color, in `[0, 1]`.
///
/// Channels are clamped into the sRGB gamut before linearization.
pub fn relative_luminance(color: &Color) -> f64 {
    let rgb = convert(color, Mode::Rgb).into_color();
    let [r, g, b] = rgb.coords.channels().map(|c| linearize(c.clamp(0.0, 1.0)));
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Inverse sRGB transfer with the WCAG 2.1 threshold.
fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Contrast ratio of two luminances; symmetric, in `[1, 21]`.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Ratio rendered with a fixed number of decimals, e.g. `21.00`.
pub fn format_ratio(ratio: f64, precision: usize) -> String {
    format!("{ratio:.precision$}")
}

/// One side of a contrast pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Swatch {
    pub color: Color,
    pub luminance: f64,
    /// `false` when the input did not parse and black was substituted.
    pub parsed: bool,
}

impl Swatch {
    pub fn new(color: Color) -> Self {
        Self {
            luminance: relative_luminance(&color),
            color,
            parsed: true,
        }
    }

    fn unparsed() -> Self {
        Self {
            color: Color::rgb(0.0, 0.0, 0.0),
            luminance: 0.0,
            parsed: false,
        }
    }
}

/// Foreground/background pair with derived luminances and ratio.
///
/// Recomputed from scratch on every input change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastPair {
    pub foreground: Swatch,
    pub background: Swatch,
    pub ratio: f64,
}

impl ContrastPair {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self::from_swatches(Swatch::new(foreground), Swatch::new(background))
    }

    fn from_swatches(foreground: Swatch, background: Swatch) -> Self {
        Self {
            ratio: contrast_ratio(foreground.luminance, background.luminance),
            foreground,
            background,
        }
    }

    /// Parse both sides, applying `policy` to unrecognized input.
    pub fn from_text(fg: &str, bg: &str, policy: UnparsedPolicy) -> Result<Self, ContrastError> {
        let swatch = |text: &str, side: Side| match parse(text) {
            Ok(color) => Ok(Swatch::new(color)),
            Err(source) => match policy {
                UnparsedPolicy::Black => Ok(Swatch::unparsed()),
                UnparsedPolicy::Error => Err(ContrastError::Unparseable {
                    side,
                    input: text.to_string(),
                    source,
                }),
            },
        };

        Ok(Self::from_swatches(
            swatch(fg, Side::Foreground)?,
            swatch(bg, Side::Background)?,
        ))
    }

    /// Exchange roles. The ratio is unchanged.
    #[must_use]
    pub fn swap(self) -> Self {
        Self::from_swatches(self.background, self.foreground)
    }

    /// Sides that fell back to black.
    pub fn unparsed_sides(&self) -> Vec<Side> {
        let mut sides = Vec::new();
        if !self.foreground.parsed {
            sides.push(Side::Foreground);
        }
        if !self.background.parsed {
            sides.push(Side::Background);
        }
        sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::model::Coords;

    fn pair(fg: &str, bg: &str) -> ContrastPair {
        ContrastPair::from_text(fg, bg, UnparsedPolicy::Error).unwrap()
    }

    #[test]
    fn test_black_on_white_is_exactly_21() {
        let p = pair("#000000", "#FFFFFF");
        assert_eq!(p.foreground.luminance, 0.0);
        assert_eq!(p.background.luminance, 1.0);
        assert_eq!(p.ratio, 21.0);
        assert_eq!(format_ratio(p.ratio, 2), "21.00");
    }

    #[test]
    fn test_identical_colors_are_1() {
        for c in ["#000", "#777777", "oklch(0.6 0.2 40)", "white", "hsl(10 90% 40%)"] {
            assert_eq!(pair(c, c).ratio, 1.0, "{c}");
        }
    }

    #[test]
    fn test_gray_on_white() {
        let p = pair("#777777", "#ffffff");
        assert!((p.ratio - 4.478).abs() < 0.001);
        assert_eq!(format_ratio(p.ratio, 2), "4.48");

        let p = pair("#767676", "#ffffff");
        assert!((p.ratio - 4.54).abs() < 0.01);
    }

    #[test]
    fn test_symmetry_and_bounds() {
        let samples = [
            "#000", "#fff", "#f00", "#0f0", "#00f", "#777", "#3b82f6",
            "oklch(0.9 0.4 140)", "lab(20 80 -90)", "hwb(300 10% 60%)",
        ];
        for fg in samples {
            for bg in samples {
                let a = pair(fg, bg);
                let b = pair(bg, fg);
                assert_eq!(a.ratio, b.ratio, "{fg} / {bg}");
                assert!((1.0..=21.0).contains(&a.ratio), "{fg} / {bg}: {}", a.ratio);
            }
        }
    }

    #[test]
    fn test_new_from_parsed_colors() {
        let p = ContrastPair::new(Color::rgb8(0, 0, 0), Color::rgb8(255, 255, 255));
        assert_eq!(p, pair("#000", "#fff"));
        assert!(p.unparsed_sides().is_empty());
    }

    #[test]
    fn test_swap_keeps_ratio() {
        let p = pair("#3b82f6", "#111827");
        let swapped = p.swap();
        assert_eq!(swapped.ratio, p.ratio);
        assert_eq!(swapped.foreground, p.background);
        assert_eq!(swapped.background, p.foreground);
    }

    #[test]
    fn test_out_of_gamut_is_clamped() {
        // far outside sRGB; luminance must stay within [0, 1]
        let wild = Color::new(Coords::Oklch { l: 1.2, c: 0.9, h: 30.0 }, None);
        let l = relative_luminance(&wild);
        assert!((0.0..=1.0).contains(&l));
    }

    #[test]
    fn test_unparsed_acts_as_black() {
        let p = ContrastPair::from_text("not a color", "#ffffff", UnparsedPolicy::Black).unwrap();
        assert_eq!(p.ratio, 21.0);
        assert_eq!(p.unparsed_sides(), vec![Side::Foreground]);
    }

    #[test]
    fn test_unparsed_error_policy() {
        let err = ContrastPair::from_text("#fff", "bogus", UnparsedPolicy::Error).unwrap_err();
        let ContrastError::Unparseable { side, input, .. } = &err;
        assert_eq!(*side, Side::Background);
        assert_eq!(input, "bogus");
        assert!(err.to_string().contains("background"));
    }

    #[test]
    fn test_linearize_threshold() {
        assert_eq!(linearize(0.0), 0.0);
        assert_eq!(linearize(0.03928), 0.03928 / 12.92);
        assert_eq!(linearize(1.0), 1.0);
    }
}
