//! Config field path.

use owo_colors::{OwoColorize, Stream};
use std::fmt;

/// Dotted path of a config key, e.g. `contrast.precision`.
///
/// Sections expose their paths as associated constants so diagnostics
/// never spell a key by hand:
///
/// ```ignore
/// diag.error(ContrastConfig::PRECISION_FIELD, "too large");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}`",
            self.0.if_supports_color(Stream::Stderr, |t| t.bright_blue())
        )
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

