//! `tinct convert`: render colors in every requested format.

use std::io::Write;

use anyhow::{Result, bail};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::args::ConvertArgs;
use super::common::{expand_stdin_args, stdin_reader, write_json};
use crate::color::{Color, FormatId, parse, render, to_canonical_oklch};
use crate::config::TinctConfig;
use crate::{debug, log};

/// One converted input.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub input: String,
    /// The OKLCh form the editor would store.
    pub canonical: Color,
    /// Format id to text, in request order.
    pub formats: Map<String, JsonValue>,
    /// Formats that hit the zeroed conversion fallback.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallback: Vec<FormatId>,
}

impl Conversion {
    pub fn new(input: &str, color: &Color, formats: &[FormatId]) -> Self {
        let mut rendered = Map::new();
        let mut fallback = Vec::new();

        for &id in formats {
            let r = render(color, id);
            if r.fallback {
                fallback.push(id);
            }
            rendered.insert(id.as_str().to_string(), JsonValue::String(r.text));
        }

        Self {
            input: input.to_string(),
            canonical: to_canonical_oklch(color).into_color(),
            formats: rendered,
            fallback,
        }
    }

    fn write_text(&self, out: &mut impl Write, header: bool) -> Result<()> {
        let indent = if header {
            writeln!(out, "{}", self.input)?;
            "  "
        } else {
            ""
        };

        for (id, text) in &self.formats {
            let text = text.as_str().unwrap_or_default();
            let lossy = self.fallback.iter().any(|f| f.as_str() == id);
            let marker = if lossy { "  (fallback)" } else { "" };
            writeln!(out, "{indent}{id:<6} {text}{marker}")?;
        }
        Ok(())
    }
}

/// Entry point for the `convert` subcommand.
pub fn run_convert(args: &ConvertArgs, config: &TinctConfig, out: &mut impl Write) -> Result<()> {
    let inputs = expand_stdin_args(&args.colors, stdin_reader())?;
    convert_all(&inputs, &config.convert.formats, args.json, args.pretty, out)
}

/// Convert each input; unparseable inputs are reported and skipped.
fn convert_all(
    inputs: &[String],
    formats: &[FormatId],
    json: bool,
    pretty: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut results = Vec::with_capacity(inputs.len());
    let mut failed = 0usize;

    for input in inputs {
        match parse(input) {
            Ok(color) => {
                debug!("convert"; "`{}` parsed as {}", input, color.mode());
                results.push(Conversion::new(input, &color, formats));
            }
            Err(e) => {
                log!("error"; "`{}`: {}", input, e);
                failed += 1;
            }
        }
    }

    if json {
        write_json(out, &results, pretty)?;
    } else {
        let header = inputs.len() > 1;
        for conversion in &results {
            conversion.write_text(out, header)?;
        }
    }

    if failed > 0 {
        bail!(
            "{} of {} color{} could not be parsed",
            failed,
            inputs.len(),
            if inputs.len() == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
