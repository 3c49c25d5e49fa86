use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use social_graph_core::Backend;

use crate::error::{AnalysisError, Result};

/// How answered queries are written to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<result>` ... `</result>` blocks.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" | "jsonl" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Settings for a `run` or `stats` invocation.
///
/// Every field has a default, so a config file only needs the keys it
/// changes. Command-line flags override file values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Edge list, one `A -> B` per line.
    pub dataset: PathBuf,
    /// Query list, one `<type> <userA> <userB> ?` per line.
    pub queries: PathBuf,
    /// Where answered queries are written.
    pub output: PathBuf,
    /// Graph representation: "list" or "matrix".
    pub backend: String,
    pub format: OutputFormat,
    /// Token between the two users of a dataset line.
    pub edge_separator: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("datasets/twitter.txt"),
            queries: PathBuf::from("datasets/queryInput.txt"),
            output: PathBuf::from("datasets/queryOutput.txt"),
            backend: Backend::List.as_str().to_string(),
            format: OutputFormat::Text,
            edge_separator: " -> ".to_string(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dataset: Option<PathBuf>,
    pub queries: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub backend: Option<String>,
    pub format: Option<String>,
}

impl AnalysisConfig {
    /// Resolve the configured backend name.
    pub fn backend(&self) -> Result<Backend> {
        Backend::parse(&self.backend).ok_or_else(|| AnalysisError::Config {
            message: format!(
                "unknown backend '{}' (expected 'list' or 'matrix')",
                self.backend
            ),
        })
    }

    /// Apply command-line overrides on top of file/default values.
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(dataset) = overrides.dataset {
            self.dataset = dataset;
        }
        if let Some(queries) = overrides.queries {
            self.queries = queries;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(format) = overrides.format {
            self.format = OutputFormat::parse(&format).ok_or_else(|| AnalysisError::Config {
                message: format!("unknown format '{}' (expected 'text' or 'json')", format),
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        self.backend()?;
        if self.edge_separator.trim().is_empty() {
            return Err(AnalysisError::Config {
                message: "edge_separator must contain a non-whitespace token".to_string(),
            });
        }
        Ok(())
    }
}

/// Load configuration from a TOML file, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let contents = fs::read_to_string(path).map_err(|e| AnalysisError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: AnalysisConfig = toml::from_str(&contents).map_err(|e| AnalysisError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.dataset, PathBuf::from("datasets/twitter.txt"));
        assert_eq!(config.backend().unwrap(), Backend::List);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.edge_separator, " -> ");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AnalysisConfig = toml::from_str("backend = \"matrix\"\nformat = \"json\"\n").unwrap();
        assert_eq!(config.backend().unwrap(), Backend::Matrix);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.queries, PathBuf::from("datasets/queryInput.txt"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let parsed: std::result::Result<AnalysisConfig, _> = toml::from_str("max_memory_mb = 4\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = AnalysisConfig::default();
        config
            .apply(ConfigOverrides {
                output: Some(PathBuf::from("out.txt")),
                backend: Some("matrix".to_string()),
                format: Some("JSON".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap();
        assert_eq!(config.output, PathBuf::from("out.txt"));
        assert_eq!(config.backend().unwrap(), Backend::Matrix);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_backend_is_config_error() {
        let mut config = AnalysisConfig::default();
        let err = config
            .apply(ConfigOverrides {
                backend: Some("csr".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }

    #[test]
    fn test_bad_format_is_config_error() {
        let mut config = AnalysisConfig::default();
        let err = config
            .apply(ConfigOverrides {
                format: Some("xml".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_blank_separator_rejected() {
        let config = AnalysisConfig {
            edge_separator: "  ".to_string(),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
