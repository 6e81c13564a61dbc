//! Pipeline configuration parsing.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::expr::ExprError;
use crate::logging::info;
use crate::pipeline::Pipeline;

/// Pipeline configuration loaded from a TOML file.
///
/// ```toml
/// filters = ["gt:0", "lt:1e308"]
/// terminal = "map:neg"
///
/// [logging]
/// level = "info"
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Filter expressions, applied in order.
    pub filters: Vec<String>,
    /// Terminal expression (`map:<op>`, `reduce:<op>` or `each`).
    pub terminal: Option<String>,
    /// Logging settings, used by the CLI.
    pub logging: LoggingConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"with_filter=trace"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"`, or a file path to append to.
    pub output: String,
    /// Use ANSI colors when writing to a terminal.
    pub color: bool,
    pub timestamps: bool,
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            timestamps: false,
            target: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        let config = content.parse()?;
        info!(path = %path.display(), "loaded pipeline config");
        Ok(config)
    }

    /// Build the pipeline described by this configuration.
    ///
    /// A missing terminal defaults to `each`.
    pub fn pipeline(&self) -> Result<Pipeline, ConfigError> {
        let terminal = self.terminal.as_deref().unwrap_or("each");
        Ok(Pipeline::parse(self.filters.as_slice(), terminal)?)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Parse configuration from a TOML string.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    /// TOML parse error.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A filter or terminal expression in the file is invalid.
    #[error("Invalid pipeline in config: {0}")]
    Expr(#[from] ExprError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{FilterExpr, MapExpr, Terminal};

    #[test]
    fn test_parse_config() {
        let toml = r#"
filters = ["gt:0", "lt:1e308"]
terminal = "map:neg"

[logging]
level = "with_filter=trace"
format = "json"
output = "stdout"
"#;
        let config: Config = toml.parse().unwrap();
        assert_eq!(config.filters, vec!["gt:0", "lt:1e308"]);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, "stdout");
        assert!(config.logging.color);

        let pipeline = config.pipeline().unwrap();
        assert_eq!(
            pipeline.filters(),
            &[FilterExpr::Gt(0.0), FilterExpr::Lt(1e308)]
        );
        assert_eq!(pipeline.terminal(), Terminal::Map(MapExpr::Neg));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert!(config.filters.is_empty());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.pipeline().unwrap().terminal(), Terminal::Each);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = "filterz = []".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_expression_surfaces_as_config_error() {
        let config: Config = r#"filters = ["gt:x"]"#.parse().unwrap();
        let err = config.pipeline().unwrap_err();
        assert!(matches!(err, ConfigError::Expr(ExprError::InvalidNumber { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/with-filter.toml").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }
}
