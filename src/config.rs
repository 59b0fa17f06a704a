//! Engine configuration
//!
//! Two string properties bracket the error messages the include directive
//! may write into rendered output. Both default to absent, so by default a
//! problem produces no output at all; configure visible delimiters (HTML
//! comment markers work well) to surface them to template authors:
//!
//! ```toml
//! errormsg_start = "<!-- include error:"
//! errormsg_end = "-->"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime configuration read once at directive initialization
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Marker written before an include error message, absent by default
    pub errormsg_start: Option<String>,
    /// Marker written after an include error message, absent by default
    pub errormsg_end: Option<String>,
    /// Encoding handed to the resource loader on every fetch
    pub input_encoding: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            errormsg_start: None,
            errormsg_end: None,
            input_encoding: "UTF-8".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both error markers
    pub fn with_error_markers(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.errormsg_start = Some(start.into());
        self.errormsg_end = Some(end.into());
        self
    }

    /// Set the input encoding
    pub fn with_input_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.input_encoding = encoding.into();
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.errormsg_start, None);
        assert_eq!(config.errormsg_end, None);
        assert_eq!(config.input_encoding, "UTF-8");
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_error_markers("<!-- error:", "-->")
            .with_input_encoding("ISO-8859-1");
        assert_eq!(config.errormsg_start.as_deref(), Some("<!-- error:"));
        assert_eq!(config.errormsg_end.as_deref(), Some("-->"));
        assert_eq!(config.input_encoding, "ISO-8859-1");
    }

    #[test]
    fn test_from_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            errormsg_start = "<!-- include error:"
            errormsg_end = "-->"
            "#,
        )
        .expect("toml should parse");
        assert_eq!(
            config.errormsg_start.as_deref(),
            Some("<!-- include error:")
        );
        assert_eq!(config.errormsg_end.as_deref(), Some("-->"));
        // Unset fields keep their defaults.
        assert_eq!(config.input_encoding, "UTF-8");
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let result = EngineConfig::from_toml_str("errormsg_start = [1, 2]");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
