//! Common utilities shared across CLI commands.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde::Serialize;

/// Serialize `value` as one JSON document followed by a newline.
pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    let formatted = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{}", formatted)?;
    Ok(())
}

/// Replace a lone `-` argument with the non-empty lines of `reader`.
pub fn expand_stdin_args(args: &[String], reader: impl BufRead) -> Result<Vec<String>> {
    if args.len() == 1 && args[0] == "-" {
        return read_lines(reader);
    }
    Ok(args.to_vec())
}

/// Read trimmed, non-empty lines.
pub fn read_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

/// Lock stdin for [`expand_stdin_args`].
pub fn stdin_reader() -> io::StdinLock<'static> {
    io::stdin().lock()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_expand_stdin_args() {
        let input = Cursor::new("#fff\n\n  red  \n");
        let args = vec!["-".to_string()];
        assert_eq!(expand_stdin_args(&args, input).unwrap(), vec!["#fff", "red"]);
    }

    #[test]
    fn test_expand_leaves_plain_args() {
        let args = vec!["#fff".to_string(), "-".to_string()];
        let expanded = expand_stdin_args(&args, Cursor::new("ignored")).unwrap();
        assert_eq!(expanded, args);
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1}), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n");

        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1}), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
