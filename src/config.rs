//! Compiler configuration
//!
//! Controls how `@template` names map to files. Can be loaded from TOML:
//!
//! ```toml
//! [templates]
//! extension = "dem"
//! suffix = "template"
//! max_depth = 32
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// File extension of markup files, without the dot
    pub extension: String,

    /// Infix between a template name and the extension
    pub template_suffix: String,

    /// Deepest allowed chain of templates including templates
    pub max_template_depth: usize,
}

#[derive(Deserialize)]
struct TomlConfig {
    templates: Option<TomlTemplates>,
}

#[derive(Deserialize)]
struct TomlTemplates {
    extension: Option<String>,
    suffix: Option<String>,
    max_depth: Option<usize>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            extension: "dem".to_string(),
            template_suffix: "template".to_string(),
            max_template_depth: 32,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();
        if let Some(templates) = parsed.templates {
            if let Some(extension) = templates.extension {
                config.extension = extension;
            }
            if let Some(suffix) = templates.suffix {
                config.template_suffix = suffix;
            }
            if let Some(max_depth) = templates.max_depth {
                config.max_template_depth = max_depth;
            }
        }
        Ok(config)
    }

    /// Set the markup file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the template file infix
    pub fn with_template_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.template_suffix = suffix.into();
        self
    }

    /// Set the maximum template nesting depth
    pub fn with_max_template_depth(mut self, depth: usize) -> Self {
        self.max_template_depth = depth;
        self
    }

    /// File name for a template: `<name>.<suffix>.<extension>`
    pub fn template_file_name(&self, name: &str) -> String {
        format!("{}.{}.{}", name, self.template_suffix, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.extension, "dem");
        assert_eq!(config.template_suffix, "template");
        assert_eq!(config.max_template_depth, 32);
        assert_eq!(config.template_file_name("base"), "base.template.dem");
    }

    #[test]
    fn test_builder_pattern() {
        let config = CompilerConfig::new()
            .with_extension("txt")
            .with_template_suffix("tpl")
            .with_max_template_depth(4);
        assert_eq!(config.template_file_name("base"), "base.tpl.txt");
        assert_eq!(config.max_template_depth, 4);
    }

    #[test]
    fn test_parse_toml() {
        let config = CompilerConfig::from_str(
            r#"
[templates]
extension = "embed"
max_depth = 8
"#,
        )
        .expect("Should parse");
        assert_eq!(config.extension, "embed");
        assert_eq!(config.template_suffix, "template");
        assert_eq!(config.max_template_depth, 8);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = CompilerConfig::from_str("").expect("Should parse");
        assert_eq!(config, CompilerConfig::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(CompilerConfig::from_str("this is not valid toml {{{{").is_err());
    }
}
