//! `tinct formats`: list the supported formats.

use std::io::Write;

use anyhow::Result;

use super::common::write_json;
use crate::color::FORMATS;

/// Entry point for the `formats` subcommand.
pub fn run_formats(json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        return write_json(out, &FORMATS, true);
    }

    for d in &FORMATS {
        writeln!(out, "{:<6} {:<6} {}", d.id, d.label, d.example)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_table() {
        let mut out = Vec::new();
        run_formats(false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), FORMATS.len());
        assert_eq!(text.lines().next(), Some("hex    HEX    #3B82F6"));
        assert!(text.contains("oklch  OKLCH  oklch(0.623 0.188 259.8)"));
    }

    #[test]
    fn test_formats_json() {
        let mut out = Vec::new();
        run_formats(true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 10);
        assert_eq!(list[3]["id"], "hsl");
        assert_eq!(list[3]["label"], "HSL");
    }
}
