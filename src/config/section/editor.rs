//! `[editor]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [editor]
//! initial = "oklch(0.7 0.15 200)"   # any supported color syntax
//! ```

use serde::{Deserialize, Serialize};

use crate::color::{Color, parse};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color the `edit` session starts from.
    pub initial: String,
}

impl EditorConfig {
    pub const INITIAL_FIELD: FieldPath = FieldPath::new("editor.initial");

    /// The parsed starting color. Valid after [`Self::validate`] passed.
    pub fn initial_color(&self) -> Option<Color> {
        parse(&self.initial).ok()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(e) = parse(&self.initial) {
            diag.error_with_hint(
                Self::INITIAL_FIELD,
                format!("`{}`: {e}", self.initial),
                "use hex, a CSS color function or a named color",
            );
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial: "#3B82F6".to_string(),
        }
    }
}
