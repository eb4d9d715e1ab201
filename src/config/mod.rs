//! Configuration management for `tinct.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── convert    # [convert]
//! │   ├── contrast   # [contrast]
//! │   └── editor     # [editor]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # TinctConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                       |
//! |--------------|-----------------------------------------------|
//! | `[convert]`  | Formats printed when `--to` is omitted        |
//! | `[contrast]` | Ratio precision, handling of unparsed colors  |
//! | `[editor]`   | Starting color of the edit session            |
//!
//! The file is optional: without one every section takes its defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ContrastConfig, ConvertConfig, EditorConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "tinct.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tinct.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TinctConfig {
    /// Absolute path of the loaded file, `None` when running on defaults.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub convert: ConvertConfig,

    #[serde(default)]
    pub contrast: ContrastConfig,

    #[serde(default)]
    pub editor: EditorConfig,
}

impl TinctConfig {
    /// Load configuration for the parsed command line.
    ///
    /// Searches upward from cwd for the config file. A missing default
    /// file is fine; a missing file named with `--config` is an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None if cli.config != Path::new(DEFAULT_CONFIG) => {
                bail!(ConfigError::NotFound(cli.config.clone()));
            }
            None => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG);
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate(&cli.command)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Convert { args } => {
                Self::update_option(&mut self.convert.formats, args.to.as_ref());
            }
            Commands::Contrast { args } => {
                Self::update_option(&mut self.contrast.precision, args.precision.as_ref());
            }
            Commands::Edit { initial } => {
                Self::update_option(&mut self.editor.initial, initial.as_ref());
            }
            Commands::Formats { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the sections `command` reads.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, command: &Commands) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        match command {
            Commands::Convert { .. } => self.convert.validate(&mut diag),
            Commands::Contrast { .. } => self.contrast.validate(&mut diag),
            Commands::Edit { .. } => self.editor.validate(&mut diag),
            Commands::Formats { .. } => {}
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> TinctConfig {
    let (parsed, ignored) = TinctConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
