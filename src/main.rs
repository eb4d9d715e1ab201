//! Tinct - color conversion, WCAG contrast and format round-trip tool.

mod cli;
mod color;
mod config;
mod contrast;
mod editor;
mod logger;

use std::io::{self, Write};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::TinctConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = TinctConfig::load(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Convert { args } => cli::convert::run_convert(args, &config, &mut out),
        Commands::Contrast { args } => cli::contrast::run_contrast(args, &config, &mut out),
        Commands::Formats { json } => cli::formats::run_formats(*json, &mut out),
        Commands::Edit { .. } => cli::edit::run_edit(&config, io::stdin().lock(), &mut out),
    }?;

    out.flush()?;
    Ok(())
}
