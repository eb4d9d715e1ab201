//! Format round-trip editor.
//!
//! One `SharedColor` feeds ten `FormatField`s. Fields only write to the
//! shared color through a commit; every successful write is broadcast to
//! the other fields synchronously.

mod field;
mod state;

pub use field::ColorEditor;
