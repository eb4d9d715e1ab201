//! Command-line interface module.

mod args;
pub mod common;
pub mod contrast;
pub mod convert;
pub mod edit;
pub mod formats;

pub use args::{Cli, Commands};
