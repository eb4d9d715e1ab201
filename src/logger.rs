//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` / `debug_do!` for output gated on `--verbose`
//! - `status_success` / `status_error` for ✓/✗ result lines
//!
//! Everything goes to stderr so stdout stays clean for command output.
//!
//! # Example
//!
//! ```ignore
//! log!("config"; "using {}", path.display());
//! status_success("hsl committed");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{AnsiColors, OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Execute code only when --verbose is enabled
///
/// # Usage
/// ```ignore
/// debug_do! {
///     let summary = expensive_computation();
///     debug!("module"; "result: {:?}", summary);
/// }
/// ```
#[macro_export]
macro_rules! debug_do {
    ($($body:tt)*) => {{
        if $crate::logger::is_verbose() {
            $($body)*
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stderr = stderr().lock();
    execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let color = match module_lower {
        "edit" => AnsiColors::BrightBlue,
        "contrast" => AnsiColors::BrightGreen,
        "error" => AnsiColors::BrightRed,
        _ => AnsiColors::BrightYellow,
    };
    format!("[{module}]")
        .if_supports_color(Stream::Stderr, |p| p.style(Style::new().color(color).bold()))
        .to_string()
}

// ============================================================================
// Status lines
// ============================================================================

/// `✓ message` or `✗ summary` followed by an indented detail block.
fn status_line(ok: bool, summary: &str, detail: &str) -> String {
    let symbol = if ok {
        "✓".if_supports_color(Stream::Stderr, |s| s.green()).to_string()
    } else {
        "✗".if_supports_color(Stream::Stderr, |s| s.red()).to_string()
    };

    let mut line = format!("{symbol} {summary}");
    for detail_line in detail.lines() {
        line.push_str("\n  ");
        line.push_str(
            &detail_line
                .if_supports_color(Stream::Stderr, |d| d.dimmed())
                .to_string(),
        );
    }
    line
}

fn print_status(line: &str) {
    let mut stderr = stderr().lock();
    writeln!(stderr, "{line}").ok();
    stderr.flush().ok();
}

/// Print a success line (✓ prefix, green).
pub fn status_success(message: &str) {
    print_status(&status_line(true, message, ""));
}

/// Print an error line (✗ prefix, red) with optional detail.
pub fn status_error(summary: &str, detail: &str) {
    print_status(&status_line(false, summary, detail));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_success() {
        owo_colors::set_override(false);
        assert_eq!(status_line(true, "hex committed", ""), "✓ hex committed");
    }

    #[test]
    fn test_status_line_error_with_detail() {
        owo_colors::set_override(false);
        let line = status_line(false, "lab", "Unrecognized color value\nlab(nope)");
        assert_eq!(line, "✗ lab\n  Unrecognized color value\n  lab(nope)");
        assert_eq!(line.matches('\n').count(), 2);
    }

    #[test]
    fn test_prefix_contains_module() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("config", "config"), "[config]");
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
