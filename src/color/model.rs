//! Color model: one tagged variant per color space.
//!
//! Channel semantics depend on the space:
//!
//! | Mode    | Channels  | Nominal range                      |
//! |---------|-----------|------------------------------------|
//! | `rgb`   | r, g, b   | gamma-encoded sRGB, `0..=1`        |
//! | `hsl`   | h, s, l   | hue in degrees, s/l `0..=1`        |
//! | `hwb`   | h, w, b   | hue in degrees, w/b `0..=1`        |
//! | `lab`   | l, a, b   | CIELAB (D50), l `0..=100`          |
//! | `lch`   | l, c, h   | CIE LCh (D50), l `0..=100`         |
//! | `oklab` | l, a, b   | OKLab, l `0..=1`                   |
//! | `oklch` | l, c, h   | OKLCh, l `0..=1`                   |
//!
//! Hue may be stored unnormalized (negative or above 360). It is folded into
//! `[0, 360)` by the serializers in [`super::format`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color space tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Rgb,
    Hsl,
    Hwb,
    Lab,
    Lch,
    Oklab,
    Oklch,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Rgb,
        Mode::Hsl,
        Mode::Hwb,
        Mode::Lab,
        Mode::Lch,
        Mode::Oklab,
        Mode::Oklch,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Hwb => "hwb",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
        }
    }

    /// Zero-valued coordinates in this space.
    pub const fn zero(self) -> Coords {
        match self {
            Self::Rgb => Coords::Rgb { r: 0.0, g: 0.0, b: 0.0 },
            Self::Hsl => Coords::Hsl { h: 0.0, s: 0.0, l: 0.0 },
            Self::Hwb => Coords::Hwb { h: 0.0, w: 0.0, b: 0.0 },
            Self::Lab => Coords::Lab { l: 0.0, a: 0.0, b: 0.0 },
            Self::Lch => Coords::Lch { l: 0.0, c: 0.0, h: 0.0 },
            Self::Oklab => Coords::Oklab { l: 0.0, a: 0.0, b: 0.0 },
            Self::Oklch => Coords::Oklch { l: 0.0, c: 0.0, h: 0.0 },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel values, tagged by color space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Coords {
    Rgb { r: f64, g: f64, b: f64 },
    Hsl { h: f64, s: f64, l: f64 },
    Hwb { h: f64, w: f64, b: f64 },
    Lab { l: f64, a: f64, b: f64 },
    Lch { l: f64, c: f64, h: f64 },
    Oklab { l: f64, a: f64, b: f64 },
    Oklch { l: f64, c: f64, h: f64 },
}

impl Coords {
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Rgb { .. } => Mode::Rgb,
            Self::Hsl { .. } => Mode::Hsl,
            Self::Hwb { .. } => Mode::Hwb,
            Self::Lab { .. } => Mode::Lab,
            Self::Lch { .. } => Mode::Lch,
            Self::Oklab { .. } => Mode::Oklab,
            Self::Oklch { .. } => Mode::Oklch,
        }
    }

    /// The three channels in declaration order.
    pub const fn channels(&self) -> [f64; 3] {
        match *self {
            Self::Rgb { r, g, b } => [r, g, b],
            Self::Hsl { h, s, l } => [h, s, l],
            Self::Hwb { h, w, b } => [h, w, b],
            Self::Lab { l, a, b } | Self::Oklab { l, a, b } => [l, a, b],
            Self::Lch { l, c, h } | Self::Oklch { l, c, h } => [l, c, h],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.channels().iter().all(|v| v.is_finite())
    }
}

/// A color in one specific space, with optional alpha.
///
/// Values are replaced, never edited in place: every conversion or alpha
/// change produces a new `Color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(flatten)]
    pub coords: Coords,
    /// `None` means fully opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl Color {
    pub const fn new(coords: Coords, alpha: Option<f64>) -> Self {
        Self { coords, alpha }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Coords::Rgb { r, g, b }, None)
    }

    /// Build from 8-bit sRGB channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self::new(Coords::Oklch { l, c, h }, None)
    }

    pub const fn mode(&self) -> Mode {
        self.coords.mode()
    }

    /// Alpha with the opaque default applied. May be out of range or NaN.
    pub fn alpha_or_opaque(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }

    /// Alpha as shown to users: clamped to `[0, 1]`, NaN treated as opaque.
    pub fn display_alpha(&self) -> f64 {
        let a = self.alpha_or_opaque();
        if a.is_nan() { 1.0 } else { a.clamp(0.0, 1.0) }
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: Option<f64>) -> Self {
        self.alpha = alpha;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_through_coords() {
        for mode in Mode::ALL {
            assert_eq!(mode.zero().mode(), mode);
        }
    }

    #[test]
    fn test_display_alpha_clamps() {
        let c = Color::rgb(0.0, 0.0, 0.0);
        assert_eq!(c.display_alpha(), 1.0);
        assert_eq!(c.with_alpha(Some(1.7)).display_alpha(), 1.0);
        assert_eq!(c.with_alpha(Some(-0.2)).display_alpha(), 0.0);
        assert_eq!(c.with_alpha(Some(f64::NAN)).display_alpha(), 1.0);
        assert_eq!(c.with_alpha(Some(0.25)).display_alpha(), 0.25);
    }

    #[test]
    fn test_rgb8_scales_channels() {
        let c = Color::rgb8(255, 0, 51);
        assert_eq!(c.coords.channels(), [1.0, 0.0, 0.2]);
        assert!(c.alpha.is_none());
    }

    #[test]
    fn test_is_finite() {
        assert!(Coords::Lab { l: 50.0, a: -20.0, b: 10.0 }.is_finite());
        assert!(!Coords::Oklab { l: f64::INFINITY, a: 0.0, b: 0.0 }.is_finite());
        assert!(!Coords::Hsl { h: f64::NAN, s: 0.0, l: 0.0 }.is_finite());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Color::oklch(0.5, 0.1, 200.0)).unwrap();
        assert_eq!(json, r#"{"mode":"oklch","l":0.5,"c":0.1,"h":200.0}"#);
    }
}
