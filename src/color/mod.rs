//! Color model, parsing, conversion and serialization.
//!
//! # Module Structure
//!
//! ```text
//! color/
//! ├── model    # Color, Coords, Mode
//! ├── space    # conversion math, ConversionResult
//! ├── parse    # CSS color syntax -> Color
//! ├── named    # CSS named colors
//! └── format   # Color -> text, FormatId, FORMATS
//! ```
//!
//! Every parsed color can be rendered in any of the ten formats; the editor
//! stores its state in OKLCh (see [`to_canonical_oklch`]).

pub mod format;
pub mod model;
mod named;
pub mod parse;
pub mod space;

pub use format::{FORMATS, FormatId, format, render, render_all};
pub use model::{Color, Mode};
pub use parse::{ColorParseError, parse};
pub use space::{convert, to_canonical_oklch};
