//! `tinct edit`: line-driven round-trip session.
//!
//! Every input line is one Enter press:
//!
//! ```text
//! hsl hsl(210, 50%, 50%)   # commit text into the hsl field
//! draft rgb rgb(1, 2, 3)   # type into a field without committing
//! alpha 0.5                # slider
//! pick #ff8800             # color picker
//! show                     # print every field
//! quit
//! ```
//!
//! After each change the full field table is written to stdout.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use thiserror::Error;

use crate::color::FormatId;
use crate::config::TinctConfig;
use crate::editor::ColorEditor;
use crate::logger::{status_error, status_success};
use crate::{debug, debug_do, log};

const HELP: &str = "<format> <text> | draft <format> <text> | alpha <0-1> | pick <hex> | show | quit";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Commit(FormatId, String),
    Draft(FormatId, String),
    Alpha(f64),
    Pick(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a value")]
    MissingValue(&'static str),
    #[error("alpha `{0}` is not a number")]
    InvalidAlpha(String),
}

/// Parse one input line. Blank lines yield `None`.
fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "alpha" => {
            let value = required(rest, "alpha")?;
            let alpha = value
                .parse::<f64>()
                .map_err(|_| CommandError::InvalidAlpha(value.to_string()))?;
            Command::Alpha(alpha)
        }
        "pick" => Command::Pick(required(rest, "pick")?.to_string()),
        "draft" => {
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let id = id
                .parse::<FormatId>()
                .map_err(|_| CommandError::Unknown(format!("draft {id}")))?;
            Command::Draft(id, text.trim().to_string())
        }
        other => {
            let id = other
                .parse::<FormatId>()
                .map_err(|_| CommandError::Unknown(head.to_string()))?;
            Command::Commit(id, rest.to_string())
        }
    };
    Ok(Some(command))
}

fn required<'a>(value: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingValue(command))
    } else {
        Ok(value)
    }
}

/// Print every field, with its error underneath when present.
fn write_fields(editor: &ColorEditor, out: &mut impl Write) -> Result<()> {
    for field in editor.fields() {
        writeln!(out, "{:<6} {}", field.id, field.draft)?;
        if let Some(err) = &field.error {
            writeln!(out, "       ! {err}")?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Drive `editor` from `input` until EOF or `quit`.
///
/// Returns the number of rejected lines.
pub fn run_session(
    editor: &ColorEditor,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<usize> {
    let mut rejected = 0;
    write_fields(editor, out)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                status_error(&e.to_string(), "");
                rejected += 1;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => log!("edit"; "{}", HELP),
            Command::Show => write_fields(editor, out)?,
            Command::Draft(id, text) => {
                editor.edit(id, text);
                write_fields(editor, out)?;
            }
            Command::Commit(id, text) => {
                editor.edit(id, text);
                match editor.commit(id) {
                    Ok(()) => status_success(&format!("{id} committed")),
                    Err(e) => {
                        status_error(&format!("{id}: {e}"), &e.source.to_string());
                        rejected += 1;
                    }
                }
                write_fields(editor, out)?;
            }
            Command::Alpha(alpha) => {
                editor.set_alpha(alpha);
                write_fields(editor, out)?;
            }
            Command::Pick(hex) => {
                match editor.pick(&hex) {
                    Ok(()) => status_success(&format!("picked {hex}")),
                    Err(e) => {
                        status_error(&format!("pick: {e}"), "");
                        rejected += 1;
                    }
                }
                write_fields(editor, out)?;
            }
        }
        out.flush()?;
    }

    Ok(rejected)
}

/// Entry point for the `edit` subcommand.
pub fn run_edit(config: &TinctConfig, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let initial = config
        .editor
        .initial_color()
        .ok_or_else(|| anyhow!("invalid initial color `{}`", config.editor.initial))?;

    let editor = ColorEditor::new(&initial);
    editor.shared().subscribe(|color, origin| {
        debug!("edit"; "{:?} -> {}", origin, crate::color::format(color, FormatId::Oklch));
    });

    log!("edit"; "{}", HELP);
    let rejected = run_session(&editor, input, out).context("edit session failed")?;

    debug_do! {
        let revisions = editor.shared().revision();
        debug!("edit"; "{} change{}, {} rejected", revisions, if revisions == 1 { "" } else { "s" }, rejected);
    }
    Ok(())
}
