//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::color::FormatId;

/// Color conversion, WCAG contrast and format round-trip tool
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tinct.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "tinct.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert colors into every supported format
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// WCAG contrast ratio and AA/AAA compliance of two colors
    #[command(visible_alias = "r")]
    Contrast {
        #[command(flatten)]
        args: ContrastArgs,
    },

    /// List supported formats with an example of each
    #[command(visible_alias = "f")]
    Formats {
        /// Output JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Interactive session: commit text in any format, see all others update
    #[command(visible_alias = "e")]
    Edit {
        /// Starting color (overrides `[editor] initial`)
        #[arg(short, long)]
        initial: Option<String>,
    },
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Colors in any supported syntax.
    /// Use `-` to read colors from stdin (one per line).
    #[arg(value_name = "COLOR", required = true)]
    pub colors: Vec<String>,

    /// Output formats (comma-separated, overrides `[convert] formats`)
    #[arg(short, long, value_delimiter = ',')]
    pub to: Option<Vec<FormatId>>,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}

/// Contrast command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ContrastArgs {
    /// Foreground (text) color
    #[arg(value_name = "FG")]
    pub foreground: String,

    /// Background color
    #[arg(value_name = "BG")]
    pub background: String,

    /// Exchange foreground and background
    #[arg(short, long)]
    pub swap: bool,

    /// Decimals in the printed ratio (overrides `[contrast] precision`)
    #[arg(long)]
    pub precision: Option<usize>,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tinct").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args() {
        let cli = parse(&["convert", "#fff", "red", "--to", "hex,oklch", "--json"]);
        let Commands::Convert { args } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.colors, vec!["#fff", "red"]);
        assert_eq!(args.to, Some(vec![FormatId::Hex, FormatId::Oklch]));
        assert!(args.json);
    }

    #[test]
    fn test_convert_rejects_unknown_format() {
        let result = Cli::try_parse_from(["tinct", "convert", "red", "--to", "cmyk"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_contrast_alias_and_globals() {
        let cli = parse(&["r", "#777", "white", "--swap", "-v", "--color", "never"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        let Commands::Contrast { args } = cli.command else {
            panic!("expected contrast");
        };
        assert_eq!(args.foreground, "#777");
        assert_eq!(args.background, "white");
        assert!(args.swap);
    }

    #[test]
    fn test_pretty_requires_json() {
        assert!(Cli::try_parse_from(["tinct", "contrast", "a", "b", "--pretty"]).is_err());
    }
}
