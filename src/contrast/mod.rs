//! Luminance, contrast ratio and WCAG compliance.
//!
//! | Module      | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `luminance` | relative luminance, ratio, `ContrastPair`      |
//! | `wcag`      | AA/AAA thresholds, `Verdict`, `Compliance`     |

mod luminance;
mod wcag;

pub use luminance::{ContrastPair, Side, Swatch, UnparsedPolicy, format_ratio};
pub use wcag::Compliance;
