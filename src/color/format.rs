//! Textual serializations and their static descriptors.
//!
//! | Format  | Channels              | Hue | Alpha |
//! |---------|-----------------------|-----|-------|
//! | `hex`   | 2 hex digits, 0..=255 | -   | -     |
//! | `rgb`   | integer 0..=255       | -   | -     |
//! | `rgba`  | integer 0..=255       | -   | 3     |
//! | `hsl`   | percent, 2 decimals   | 1   | -     |
//! | `hsla`  | percent, 2 decimals   | 1   | 3     |
//! | `hwb`   | percent, 2 decimals   | 1   | 3     |
//! | `lab`   | L 2, a/b 3 decimals   | -   | 3     |
//! | `lch`   | L 2, C 3 decimals     | 1   | 3     |
//! | `oklab` | L 3, a/b 4 decimals   | -   | 3     |
//! | `oklch` | L 3, C 4 decimals     | 1   | 3     |
//!
//! Trailing zeros are stripped. `hwb` and the lab family append ` / A` only
//! when the color is translucent.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::model::{Color, Mode};
use super::space::{convert, normalize_hue};

/// Identifier of one textual format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatId {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hwb,
    Lab,
    Lch,
    Oklab,
    Oklch,
}

impl FormatId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Hsl => "hsl",
            Self::Hsla => "hsla",
            Self::Hwb => "hwb",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
        }
    }

    /// Color space the format is rendered from.
    pub const fn mode(self) -> Mode {
        match self {
            Self::Hex | Self::Rgb | Self::Rgba => Mode::Rgb,
            Self::Hsl | Self::Hsla => Mode::Hsl,
            Self::Hwb => Mode::Hwb,
            Self::Lab => Mode::Lab,
            Self::Lch => Mode::Lch,
            Self::Oklab => Mode::Oklab,
            Self::Oklch => Mode::Oklch,
        }
    }

    /// Whether the rendered text can hold an alpha below 1.
    pub const fn carries_alpha(self) -> bool {
        !matches!(self, Self::Hex | Self::Rgb | Self::Hsl)
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format `{0}` (expected one of: hex, rgb, rgba, hsl, hsla, hwb, lab, lch, oklab, oklch)")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatId {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FORMATS
            .iter()
            .map(|d| d.id)
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Static metadata for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub id: FormatId,
    pub label: &'static str,
    pub example: &'static str,
}

/// Every supported format, in display order.
///
/// Display order is `FormatId` declaration order, so `id as usize` indexes it.
pub const FORMATS: [FormatDescriptor; 10] = [
    FormatDescriptor { id: FormatId::Hex, label: "HEX", example: "#3B82F6" },
    FormatDescriptor { id: FormatId::Rgb, label: "RGB", example: "rgb(59, 130, 246)" },
    FormatDescriptor { id: FormatId::Rgba, label: "RGBA", example: "rgba(59, 130, 246, 0.5)" },
    FormatDescriptor { id: FormatId::Hsl, label: "HSL", example: "hsl(217.2, 91.22%, 59.8%)" },
    FormatDescriptor { id: FormatId::Hsla, label: "HSLA", example: "hsla(217.2, 91.22%, 59.8%, 0.5)" },
    FormatDescriptor { id: FormatId::Hwb, label: "HWB", example: "hwb(217.2 23.14% 3.53%)" },
    FormatDescriptor { id: FormatId::Lab, label: "LAB", example: "lab(54.62 8.763 -65.791)" },
    FormatDescriptor { id: FormatId::Lch, label: "LCH", example: "lch(54.62 66.372 277.6)" },
    FormatDescriptor { id: FormatId::Oklab, label: "OKLAB", example: "oklab(0.623 -0.0332 -0.1851)" },
    FormatDescriptor { id: FormatId::Oklch, label: "OKLCH", example: "oklch(0.623 0.188 259.8)" },
];

/// A serialized color, noting whether the lossy fallback was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub text: String,
    pub fallback: bool,
}

/// Serialize `color` in the given format.
pub fn format(color: &Color, id: FormatId) -> String {
    render(color, id).text
}

/// Serialize `color`, reporting a conversion fallback.
pub fn render(color: &Color, id: FormatId) -> Rendered {
    let converted = convert(color, id.mode());
    let fallback = converted.is_fallback();
    let color = converted.into_color();
    let [c0, c1, c2] = color.coords.channels();
    let alpha = color.display_alpha();
    let translucent = alpha < 1.0;
    let slash = || {
        if translucent {
            format!(" / {}", num(alpha, 3))
        } else {
            String::new()
        }
    };

    let text = match id {
        FormatId::Hex => {
            format!("#{:02X}{:02X}{:02X}", byte(c0), byte(c1), byte(c2))
        }
        FormatId::Rgb => format!("rgb({}, {}, {})", byte(c0), byte(c1), byte(c2)),
        FormatId::Rgba => format!(
            "rgba({}, {}, {}, {})",
            byte(c0),
            byte(c1),
            byte(c2),
            num(alpha, 3)
        ),
        FormatId::Hsl => format!("hsl({}, {}%, {}%)", hue(c0), pct(c1), pct(c2)),
        FormatId::Hsla => format!(
            "hsla({}, {}%, {}%, {})",
            hue(c0),
            pct(c1),
            pct(c2),
            num(alpha, 3)
        ),
        FormatId::Hwb => format!("hwb({} {}% {}%{})", hue(c0), pct(c1), pct(c2), slash()),
        FormatId::Lab => format!("lab({} {} {}{})", num(c0, 2), num(c1, 3), num(c2, 3), slash()),
        FormatId::Lch => format!("lch({} {} {}{})", num(c0, 2), num(c1, 3), hue(c2), slash()),
        FormatId::Oklab => format!(
            "oklab({} {} {}{})",
            num(c0, 3),
            num(c1, 4),
            num(c2, 4),
            slash()
        ),
        FormatId::Oklch => format!("oklch({} {} {}{})", num(c0, 3), num(c1, 4), hue(c2), slash()),
    };

    Rendered { text, fallback }
}

/// Render every format in [`FORMATS`] order.
pub fn render_all(color: &Color) -> Vec<(FormatId, Rendered)> {
    FORMATS.iter().map(|d| (d.id, render(color, d.id))).collect()
}

// ============================================================================
// Number formatting
// ============================================================================

fn finite(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Fixed precision, trailing zeros stripped, never `-0`.
fn num(v: f64, decimals: usize) -> String {
    let mut s = format!("{:.*}", decimals, finite(v));
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn byte(channel: f64) -> u8 {
    // clamp() keeps the cast in range; finite() keeps NaN out of clamp()
    (finite(channel).clamp(0.0, 1.0) * 255.0).round() as u8
}

fn pct(fraction: f64) -> String {
    num(finite(fraction) * 100.0, 2)
}

fn hue(h: f64) -> String {
    let s = num(normalize_hue(finite(h)), 1);
    if s == "360" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::model::Coords;
    use crate::color::parse::parse;

    fn fmt(text: &str, id: FormatId) -> String {
        format(&parse(text).unwrap(), id)
    }

    #[test]
    fn test_num_strips_zeros() {
        assert_eq!(num(1.5, 3), "1.5");
        assert_eq!(num(2.0, 3), "2");
        assert_eq!(num(0.12345, 4), "0.1235");
        assert_eq!(num(-0.00001, 2), "0");
        assert_eq!(num(f64::NAN, 2), "0");
        assert_eq!(num(100.0, 0), "100");
    }

    #[test]
    fn test_hex_round_trip_is_uppercase() {
        for hex in ["#000000", "#ffffff", "#3b82f6", "#777777", "#a1b2c3", "#0f0f0f"] {
            assert_eq!(fmt(hex, FormatId::Hex), hex.to_uppercase());
        }
    }

    #[test]
    fn test_hex_drops_alpha() {
        assert_eq!(fmt("#11223380", FormatId::Hex), "#112233");
    }

    #[test]
    fn test_rgb_and_rgba() {
        assert_eq!(fmt("#3b82f6", FormatId::Rgb), "rgb(59, 130, 246)");
        assert_eq!(fmt("#3b82f6", FormatId::Rgba), "rgba(59, 130, 246, 1)");
        assert_eq!(fmt("rgb(59 130 246 / 0.5)", FormatId::Rgba), "rgba(59, 130, 246, 0.5)");
    }

    #[test]
    fn test_hsl_family() {
        assert_eq!(fmt("hsl(210 50% 50%)", FormatId::Hsl), "hsl(210, 50%, 50%)");
        assert_eq!(fmt("hsl(210 50% 50% / 0.25)", FormatId::Hsla), "hsla(210, 50%, 50%, 0.25)");
        assert_eq!(fmt("#ff0000", FormatId::Hsl), "hsl(0, 100%, 50%)");
        assert_eq!(fmt("#808080", FormatId::Hsl), "hsl(0, 0%, 50.2%)");
    }

    #[test]
    fn test_hwb() {
        assert_eq!(fmt("#ff0000", FormatId::Hwb), "hwb(0 0% 0%)");
        assert_eq!(fmt("rgb(255 0 0 / 50%)", FormatId::Hwb), "hwb(0 0% 0% / 0.5)");
    }

    #[test]
    fn test_lab_family() {
        assert_eq!(fmt("#ffffff", FormatId::Lab), "lab(100 0 0)");
        assert_eq!(fmt("#000000", FormatId::Lch), "lch(0 0 0)");
        assert_eq!(fmt("#ffffff", FormatId::Oklab), "oklab(1 0 0)");
        assert_eq!(fmt("#ff0000", FormatId::Oklch), "oklch(0.628 0.2577 29.2)");
        assert_eq!(fmt("oklch(0.5 0.1 200 / 0.3)", FormatId::Oklch), "oklch(0.5 0.1 200 / 0.3)");
    }

    #[test]
    fn test_hue_is_normalized_for_display() {
        assert_eq!(fmt("hsl(-90 50% 50%)", FormatId::Hsl), "hsl(270, 50%, 50%)");
        assert_eq!(fmt("oklch(0.5 0.1 725)", FormatId::Oklch), "oklch(0.5 0.1 5)");
        assert_eq!(fmt("oklch(0.5 0.1 359.97)", FormatId::Oklch), "oklch(0.5 0.1 0)");
    }

    #[test]
    fn test_alpha_is_clamped_for_display() {
        assert_eq!(fmt("rgb(0 0 0 / 1.7)", FormatId::Rgba), "rgba(0, 0, 0, 1)");
        assert_eq!(fmt("rgb(0 0 0 / -2)", FormatId::Rgba), "rgba(0, 0, 0, 0)");
        let nan_alpha = Color::rgb(0.0, 0.0, 0.0).with_alpha(Some(f64::NAN));
        assert_eq!(format(&nan_alpha, FormatId::Rgba), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_fallback_renders_zeroed_value() {
        let broken = Color::new(Coords::Oklab { l: 1e200, a: 0.0, b: 0.0 }, Some(0.5));
        let rendered = render(&broken, FormatId::Rgba);
        assert!(rendered.fallback);
        assert_eq!(rendered.text, "rgba(0, 0, 0, 0.5)");

        // same-space formatting has nothing to convert, so no fallback
        let fine = render(&Color::oklch(0.5, 0.1, 10.0), FormatId::Oklch);
        assert!(!fine.fallback);
    }

    #[test]
    fn test_every_format_parses_back() {
        let color = parse("#3b82f6").unwrap();
        for (id, rendered) in render_all(&color) {
            let back = parse(&rendered.text).unwrap_or_else(|e| panic!("{id}: {e}"));
            assert_eq!(format(&back, FormatId::Hex), "#3B82F6", "{id}");
        }
    }

    #[test]
    fn test_alpha_only_in_alpha_capable_formats() {
        let translucent = parse("#3b82f680").unwrap();
        for (id, rendered) in render_all(&translucent) {
            let back = parse(&rendered.text).unwrap();
            assert_eq!(back.alpha.is_some(), id.carries_alpha(), "{}", rendered.text);
        }
    }

    #[test]
    fn test_format_id_from_str() {
        assert_eq!("OKLCH".parse::<FormatId>().unwrap(), FormatId::Oklch);
        assert_eq!(" hex ".parse::<FormatId>().unwrap(), FormatId::Hex);
        assert!("cmyk".parse::<FormatId>().is_err());
    }

    #[test]
    fn test_descriptors_are_in_id_order() {
        for (i, d) in FORMATS.iter().enumerate() {
            assert_eq!(d.id as usize, i);
        }
    }

    #[test]
    fn test_descriptor_examples_parse() {
        for d in &FORMATS {
            assert!(parse(d.example).is_ok(), "{}", d.example);
        }
    }
}
