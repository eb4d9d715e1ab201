//! `tinct contrast`: WCAG ratio and compliance for a color pair.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::args::ContrastArgs;
use super::common::write_json;
use crate::color::{FormatId, format};
use crate::config::TinctConfig;
use crate::contrast::{Compliance, ContrastPair, Side, Swatch, UnparsedPolicy, format_ratio};
use crate::log;

/// One side of the report.
#[derive(Debug, Clone, Serialize)]
pub struct SideReport {
    pub input: String,
    pub hex: String,
    pub luminance: f64,
    pub parsed: bool,
}

impl SideReport {
    fn new(input: &str, swatch: &Swatch) -> Self {
        Self {
            input: input.to_string(),
            hex: format(&swatch.color, FormatId::Hex),
            luminance: swatch.luminance,
            parsed: swatch.parsed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContrastReport {
    pub foreground: SideReport,
    pub background: SideReport,
    pub ratio: f64,
    /// Ratio at the configured precision, e.g. `"21.00"`.
    pub ratio_text: String,
    pub compliance: Compliance,
}

impl ContrastReport {
    /// Build the report; `swap` exchanges roles after parsing.
    pub fn build(
        fg: &str,
        bg: &str,
        swap: bool,
        policy: UnparsedPolicy,
        precision: usize,
    ) -> Result<Self> {
        let mut pair = ContrastPair::from_text(fg, bg, policy)
            .context("cannot compute contrast")?;
        let (mut fg, mut bg) = (fg, bg);
        if swap {
            pair = pair.swap();
            (fg, bg) = (bg, fg);
        }

        for side in pair.unparsed_sides() {
            let input = match side {
                Side::Foreground => fg,
                Side::Background => bg,
            };
            log!("warning"; "{} `{}` is not a color, treated as black", side, input);
        }

        Ok(Self {
            foreground: SideReport::new(fg, &pair.foreground),
            background: SideReport::new(bg, &pair.background),
            ratio: pair.ratio,
            ratio_text: format_ratio(pair.ratio, precision),
            compliance: Compliance::evaluate(pair.ratio),
        })
    }

    fn write_text(&self, out: &mut impl Write) -> Result<()> {
        for (label, side) in [
            ("foreground", &self.foreground),
            ("background", &self.background),
        ] {
            let note = if side.parsed { "" } else { "  (unparsed)" };
            writeln!(out, "{label:<16} {}{note}", side.hex)?;
        }
        writeln!(out, "{:<16} {}", "ratio", self.ratio_text)?;
        for (level, verdict) in self.compliance.iter() {
            writeln!(out, "{:<16} {verdict}", level.label())?;
        }
        Ok(())
    }
}

/// Entry point for the `contrast` subcommand.
pub fn run_contrast(args: &ContrastArgs, config: &TinctConfig, out: &mut impl Write) -> Result<()> {
    let report = ContrastReport::build(
        &args.foreground,
        &args.background,
        args.swap,
        config.contrast.unparsed,
        config.contrast.precision,
    )?;

    if args.json {
        write_json(out, &report, args.pretty)
    } else {
        report.write_text(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(fg: &str, bg: &str, swap: bool) -> ContrastReport {
        ContrastReport::build(fg, bg, swap, UnparsedPolicy::Black, 2).unwrap()
    }

    #[test]
    fn test_black_on_white_report() {
        let r = report("#000000", "#FFFFFF", false);
        assert_eq!(r.ratio_text, "21.00");
        assert!(r.compliance.all_pass());

        let mut out = Vec::new();
        r.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "foreground       #000000\n\
             background       #FFFFFF\n\
             ratio            21.00\n\
             AA normal text   Pass\n\
             AA large text    Pass\n\
             AAA normal text  Pass\n\
             AAA large text   Pass\n"
        );
    }

    #[test]
    fn test_gray_on_white_report() {
        let r = report("#777777", "#FFFFFF", false);
        assert_eq!(r.ratio_text, "4.48");
        assert!(!r.compliance.aa_normal.is_pass());
        assert!(r.compliance.aa_large.is_pass());
        assert!(!r.compliance.aaa_normal.is_pass());
        assert!(!r.compliance.aaa_large.is_pass());
    }

    #[test]
    fn test_swap_exchanges_roles_only() {
        let plain = report("#3b82f6", "#111827", false);
        let swapped = report("#3b82f6", "#111827", true);
        assert_eq!(plain.ratio, swapped.ratio);
        assert_eq!(swapped.foreground.input, "#111827");
        assert_eq!(swapped.foreground.hex, plain.background.hex);
        assert_eq!(swapped.background.hex, plain.foreground.hex);
    }

    #[test]
    fn test_unparsed_side_is_flagged() {
        let r = report("#FFFFFF", "what", false);
        assert_eq!(r.ratio_text, "21.00");
        assert!(!r.background.parsed);
        assert_eq!(r.background.hex, "#000000");
    }

    #[test]
    fn test_unparsed_error_policy() {
        let err = ContrastReport::build("#fff", "what", false, UnparsedPolicy::Error, 2)
            .unwrap_err();
        assert!(format!("{err:#}").contains("background color `what` is not recognized"));
    }

    #[test]
    fn test_precision() {
        let r = ContrastReport::build("#777777", "#FFFFFF", false, UnparsedPolicy::Black, 4)
            .unwrap();
        assert_eq!(r.ratio_text.len(), "4.4781".len());
        assert!(r.ratio_text.starts_with("4.47"));
    }

    #[test]
    fn test_json_report() {
        let r = report("#000", "#fff", false);
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["ratio"], 21.0);
        assert_eq!(value["compliance"]["aaa_normal"], "Pass");
        assert_eq!(value["foreground"]["luminance"], 0.0);
    }
}
