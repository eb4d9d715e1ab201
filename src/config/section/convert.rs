//! `[convert]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [convert]
//! formats = ["hex", "rgb", "oklch"]   # used when `--to` is omitted
//! ```

use serde::{Deserialize, Serialize};

use crate::color::{FORMATS, FormatId};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Output formats, in order.
    pub formats: Vec<FormatId>,
}

impl ConvertConfig {
    pub const FORMATS_FIELD: FieldPath = FieldPath::new("convert.formats");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.formats.is_empty() {
            diag.error_with_hint(
                Self::FORMATS_FIELD,
                "no output formats selected",
                "remove the key to convert to every format",
            );
        }

        let mut seen = Vec::with_capacity(self.formats.len());
        for id in &self.formats {
            if seen.contains(id) {
                diag.warn(Self::FORMATS_FIELD, format!("`{id}` listed more than once"));
            } else {
                seen.push(*id);
            }
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            formats: FORMATS.iter().map(|d| d.id).collect(),
        }
    }
}
