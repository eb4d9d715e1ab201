//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tinct.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `convert`  | `[convert]`    | Default output formats               |
//! | `contrast` | `[contrast]`   | Ratio precision, unparsed-input rule |
//! | `editor`   | `[editor]`     | Starting color for `tinct edit`      |

mod contrast;
mod convert;
mod editor;

pub use contrast::ContrastConfig;
pub use convert::ConvertConfig;
pub use editor::EditorConfig;
