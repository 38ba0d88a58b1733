//! Assertion configuration.
//!
//! Limits for the default pretty-printer and the initial assertion mode.
//! Loadable from YAML; missing keys take their defaults.
//!
//! ```yaml
//! max_pretty_print_depth: 4
//! max_pretty_print_chars: 200
//! soft: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::result::{DomError, DomResult};

/// Default nesting depth printed before eliding
pub const DEFAULT_MAX_PRETTY_PRINT_DEPTH: usize = 8;
/// Default number of array entries printed before eliding
pub const DEFAULT_MAX_PRETTY_PRINT_ARRAY_LENGTH: usize = 50;
/// Default printed size before truncation
pub const DEFAULT_MAX_PRETTY_PRINT_CHARS: usize = 1000;

/// Configuration for DOM assertions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Nesting depth printed before `Array` / `Object` placeholders
    pub max_pretty_print_depth: usize,
    /// Array entries printed before `...`
    pub max_pretty_print_array_length: usize,
    /// Characters printed before truncation
    pub max_pretty_print_chars: usize,
    /// Start assertions in soft mode (collect failures instead of failing)
    pub soft: bool,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            max_pretty_print_depth: DEFAULT_MAX_PRETTY_PRINT_DEPTH,
            max_pretty_print_array_length: DEFAULT_MAX_PRETTY_PRINT_ARRAY_LENGTH,
            max_pretty_print_chars: DEFAULT_MAX_PRETTY_PRINT_CHARS,
            soft: false,
        }
    }
}

impl DomConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> DomResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| DomError::Config {
            message: e.to_string(),
        })
    }

    /// Read and parse a YAML file
    pub fn load(path: impl AsRef<Path>) -> DomResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        tracing::debug!(path = %path.display(), ?config, "loaded DOM assertion config");
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> DomResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| DomError::Config {
            message: e.to_string(),
        })
    }

    /// Set the printed nesting depth
    #[must_use]
    pub const fn with_max_pretty_print_depth(mut self, depth: usize) -> Self {
        self.max_pretty_print_depth = depth;
        self
    }

    /// Set the printed array length
    #[must_use]
    pub const fn with_max_pretty_print_array_length(mut self, length: usize) -> Self {
        self.max_pretty_print_array_length = length;
        self
    }

    /// Set the printed size limit
    #[must_use]
    pub const fn with_max_pretty_print_chars(mut self, chars: usize) -> Self {
        self.max_pretty_print_chars = chars;
        self
    }

    /// Set the initial soft mode
    #[must_use]
    pub const fn with_soft(mut self, soft: bool) -> Self {
        self.soft = soft;
        self
    }
}
