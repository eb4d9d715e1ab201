//! `[contrast]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [contrast]
//! precision = 2          # decimals in the printed ratio
//! unparsed = "black"     # "black" | "error"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::contrast::UnparsedPolicy;

/// Upper bound for `precision`.
pub const MAX_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Decimals in the printed ratio.
    pub precision: usize,

    /// What an unrecognized color contributes.
    /// - `black` (default): luminance 0, reported as a warning
    /// - `error`: abort the command
    pub unparsed: UnparsedPolicy,
}

impl ContrastConfig {
    pub const PRECISION_FIELD: FieldPath = FieldPath::new("contrast.precision");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.precision > MAX_PRECISION {
            diag.error_with_hint(
                Self::PRECISION_FIELD,
                format!("precision {} is too large", self.precision),
                format!("use a value between 0 and {MAX_PRECISION}"),
            );
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            unparsed: UnparsedPolicy::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_contrast_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.contrast.precision, 2);
        assert_eq!(config.contrast.unparsed, UnparsedPolicy::Black);
    }

    #[test]
    fn test_contrast_config() {
        let config = test_parse_config("[contrast]\nprecision = 3\nunparsed = \"error\"");
        assert_eq!(config.contrast.precision, 3);
        assert_eq!(config.contrast.unparsed, UnparsedPolicy::Error);
    }

    #[test]
    fn test_contrast_precision_out_of_range() {
        let config = test_parse_config("[contrast]\nprecision = 12");
        let mut diag = ConfigDiagnostics::new();
        config.contrast.validate(&mut diag);
        assert!(!diag.is_empty());
        assert_eq!(diag.errors()[0].field, ContrastConfig::PRECISION_FIELD);
    }
}
