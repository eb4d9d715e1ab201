//! CSS color syntax parser.
//!
//! Accepted forms:
//! - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - named colors and `transparent`
//! - `rgb()`/`rgba()` and `hsl()`/`hsla()`, legacy comma or modern space syntax
//! - `hwb()`, `lab()`, `lch()`, `oklab()`, `oklch()`, space syntax only
//!
//! Modern syntax takes an optional `/ alpha`. Components may be `none`
//! (read as 0). Values are stored as written: out-of-range alpha or channels
//! are not clamped here.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::model::{Color, Coords};
use super::named;

/// Failure to recognize a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color `#{0}`")]
    InvalidHex(String),

    #[error("unknown color name `{0}`")]
    UnknownName(String),

    #[error("unknown color function `{0}()`")]
    UnknownFunction(String),

    #[error("unbalanced parentheses")]
    Unbalanced,

    #[error("`{func}()` does not accept comma-separated arguments")]
    CommasNotAllowed { func: &'static str },

    #[error("`{func}()` expects 3 components, found {found}")]
    ComponentCount { func: &'static str, found: usize },

    #[error("missing alpha after `/`")]
    MissingAlpha,

    #[error("invalid component `{0}`")]
    InvalidComponent(String),

    #[error("component `{0}` is not a finite number")]
    NonFinite(String),
}

type Result<T> = std::result::Result<T, ColorParseError>;

/// `<number>` optionally followed by a unit or `%`. Input is lowercased.
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:e[+-]?[0-9]+)?)(%|deg|grad|rad|turn)?$")
        .expect("component regex is valid")
});

/// Parse any supported CSS color expression.
pub fn parse(text: &str) -> Result<Color> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ColorParseError::Empty);
    }
    let lower = text.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }

    match lower.split_once('(') {
        Some((name, rest)) => {
            let args = rest.strip_suffix(')').ok_or(ColorParseError::Unbalanced)?;
            if args.contains(['(', ')']) {
                return Err(ColorParseError::Unbalanced);
            }
            let func = Func::from_name(name.trim())
                .ok_or_else(|| ColorParseError::UnknownFunction(name.trim().to_string()))?;
            parse_function(func, args)
        }
        None => named::lookup(&lower).ok_or_else(|| ColorParseError::UnknownName(lower.clone())),
    }
}

// ============================================================================
// Hex
// ============================================================================

fn parse_hex(hex: &str) -> Result<Color> {
    let invalid = || ColorParseError::InvalidHex(hex.to_string());

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    let (rgb, alpha) = match hex.len() {
        3 | 4 => {
            let rgb = [digit(0)? * 17, digit(1)? * 17, digit(2)? * 17];
            let alpha = if hex.len() == 4 { Some(digit(3)? * 17) } else { None };
            (rgb, alpha)
        }
        6 | 8 => {
            let rgb = [pair(0)?, pair(2)?, pair(4)?];
            let alpha = if hex.len() == 8 { Some(pair(6)?) } else { None };
            (rgb, alpha)
        }
        _ => return Err(invalid()),
    };

    let [r, g, b] = rgb;
    Ok(Color::rgb8(r, g, b).with_alpha(alpha.map(|a| f64::from(a) / 255.0)))
}

// ============================================================================
// Functional notation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Rgb,
    Hsl,
    Hwb,
    Lab,
    Lch,
    Oklab,
    Oklch,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "rgb" | "rgba" => Self::Rgb,
            "hsl" | "hsla" => Self::Hsl,
            "hwb" => Self::Hwb,
            "lab" => Self::Lab,
            "lch" => Self::Lch,
            "oklab" => Self::Oklab,
            "oklch" => Self::Oklch,
            _ => return None,
        })
    }

    const fn name(self) -> &'static str {
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

    const fn allows_commas(self) -> bool {
        matches!(self, Self::Rgb | Self::Hsl)
    }
}

/// A single lexed component.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    None,
    Number(f64),
    Percent(f64),
    /// Already converted to degrees.
    Angle(f64),
}

fn parse_function(func: Func, args: &str) -> Result<Color> {
    let (channels, alpha) = split_args(func, args)?;

    let [c0, c1, c2] = match channels.as_slice() {
        [a, b, c] => [*a, *b, *c],
        _ => {
            return Err(ColorParseError::ComponentCount {
                func: func.name(),
                found: channels.len(),
            });
        }
    };
    let [c0, c1, c2] = [lex(c0)?, lex(c1)?, lex(c2)?];
    let alpha = match alpha {
        Some(raw) => Some(alpha_value(lex(raw)?, raw)?),
        None => None,
    };

    let coords = match func {
        Func::Rgb => Coords::Rgb {
            r: rgb_channel(c0, channels[0])?,
            g: rgb_channel(c1, channels[1])?,
            b: rgb_channel(c2, channels[2])?,
        },
        Func::Hsl => Coords::Hsl {
            h: hue(c0, channels[0])?,
            s: fraction(c1, channels[1])?,
            l: fraction(c2, channels[2])?,
        },
        Func::Hwb => Coords::Hwb {
            h: hue(c0, channels[0])?,
            w: fraction(c1, channels[1])?,
            b: fraction(c2, channels[2])?,
        },
        Func::Lab => Coords::Lab {
            l: scaled(c0, 100.0, channels[0])?,
            a: scaled(c1, 125.0, channels[1])?,
            b: scaled(c2, 125.0, channels[2])?,
        },
        Func::Lch => Coords::Lch {
            l: scaled(c0, 100.0, channels[0])?,
            c: scaled(c1, 150.0, channels[1])?,
            h: hue(c2, channels[2])?,
        },
        Func::Oklab => Coords::Oklab {
            l: scaled(c0, 1.0, channels[0])?,
            a: scaled(c1, 0.4, channels[1])?,
            b: scaled(c2, 0.4, channels[2])?,
        },
        Func::Oklch => Coords::Oklch {
            l: scaled(c0, 1.0, channels[0])?,
            c: scaled(c1, 0.4, channels[1])?,
            h: hue(c2, channels[2])?,
        },
    };

    Ok(Color::new(coords, alpha))
}

/// Split arguments into channel tokens and an optional alpha token.
fn split_args(func: Func, args: &str) -> Result<(Vec<&str>, Option<&str>)> {
    if args.contains(',') {
        if !func.allows_commas() {
            return Err(ColorParseError::CommasNotAllowed { func: func.name() });
        }
        if args.contains('/') {
            return Err(ColorParseError::InvalidComponent(args.trim().to_string()));
        }
        let mut parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let alpha = if parts.len() == 4 { parts.pop() } else { None };
        return Ok((parts, alpha));
    }

    match args.split_once('/') {
        Some((channels, alpha)) => {
            let alpha = alpha.trim();
            if alpha.is_empty() {
                return Err(ColorParseError::MissingAlpha);
            }
            if alpha.contains(char::is_whitespace) || alpha.contains('/') {
                return Err(ColorParseError::InvalidComponent(alpha.to_string()));
            }
            Ok((channels.split_whitespace().collect(), Some(alpha)))
        }
        None => Ok((args.split_whitespace().collect(), None)),
    }
}

fn lex(token: &str) -> Result<Component> {
    if token == "none" {
        return Ok(Component::None);
    }
    let caps = COMPONENT
        .captures(token)
        .ok_or_else(|| ColorParseError::InvalidComponent(token.to_string()))?;

    let value: f64 = caps[1]
        .parse()
        .map_err(|_| ColorParseError::InvalidComponent(token.to_string()))?;
    if !value.is_finite() {
        return Err(ColorParseError::NonFinite(token.to_string()));
    }

    Ok(match caps.get(2).map(|m| m.as_str()) {
        None => Component::Number(value),
        Some("%") => Component::Percent(value),
        Some("deg") => Component::Angle(value),
        Some("rad") => Component::Angle(value.to_degrees()),
        Some("grad") => Component::Angle(value * 0.9),
        Some("turn") => Component::Angle(value * 360.0),
        Some(_) => unreachable!("unit alternatives are fixed by the regex"),
    })
}

fn alpha_value(component: Component, raw: &str) -> Result<f64> {
    match component {
        Component::None => Ok(0.0),
        Component::Number(n) => Ok(n),
        Component::Percent(p) => Ok(p / 100.0),
        Component::Angle(_) => Err(ColorParseError::InvalidComponent(raw.to_string())),
    }
}

fn rgb_channel(component: Component, raw: &str) -> Result<f64> {
    match component {
        Component::None => Ok(0.0),
        Component::Number(n) => Ok(n / 255.0),
        Component::Percent(p) => Ok(p / 100.0),
        Component::Angle(_) => Err(ColorParseError::InvalidComponent(raw.to_string())),
    }
}

fn hue(component: Component, raw: &str) -> Result<f64> {
    match component {
        Component::None => Ok(0.0),
        Component::Number(deg) | Component::Angle(deg) => Ok(deg),
        Component::Percent(_) => Err(ColorParseError::InvalidComponent(raw.to_string())),
    }
}

/// Saturation, lightness, whiteness, blackness: `50%` and `50` both mean 0.5.
fn fraction(component: Component, raw: &str) -> Result<f64> {
    match component {
        Component::None => Ok(0.0),
        Component::Number(n) | Component::Percent(n) => Ok(n / 100.0),
        Component::Angle(_) => Err(ColorParseError::InvalidComponent(raw.to_string())),
    }
}

/// Plain numbers pass through; percentages scale against `full`.
fn scaled(component: Component, full: f64, raw: &str) -> Result<f64> {
    match component {
        Component::None => Ok(0.0),
        Component::Number(n) => Ok(n),
        Component::Percent(p) => Ok(p / 100.0 * full),
        Component::Angle(_) => Err(ColorParseError::InvalidComponent(raw.to_string())),
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self> {
        parse(value)
    }
}
