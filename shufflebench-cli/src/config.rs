//! Configuration loading from shufflebench.toml
//!
//! Run defaults can be kept in a `shufflebench.toml` file in the project root.
//! The file is discovered by walking up from the current directory.
//! Command-line flags override anything set here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "shufflebench.toml";

/// ShuffleBench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scheduling defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Iteration counts for benchmarks that do not set their own
    #[serde(default)]
    pub iterations: Option<Vec<usize>>,
    /// Samples per iteration count for benchmarks that do not set their own
    #[serde(default)]
    pub samples: Option<usize>,
    /// Fixed scheduling seed; drawn randomly when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Show a progress bar on stderr
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            samples: None,
            seed: None,
            progress: default_progress(),
        }
    }
}

fn default_progress() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "human", "text", "concise", "csv", "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report to this file instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(dir)
    }

    /// Walk up from `dir` and load the first `shufflebench.toml` found
    ///
    /// A file that exists but fails to parse is reported and ignored.
    pub fn discover_from(dir: impl Into<PathBuf>) -> Option<Self> {
        let mut dir = dir.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            "ignoring invalid configuration: {}",
                            e
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# ShuffleBench Configuration

[runner]
# Iteration counts per benchmark (uncomment to override the built-in list)
# iterations = [8, 64, 512, 4096, 8196]
# Samples per iteration count (uncomment to enable)
# samples = 3
# Fixed seed to replay a previous schedule (uncomment to enable)
# seed = 42
# Show a progress bar while running
progress = true

[output]
# Output format: human, text, concise, csv, json
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "target/shufflebench/report.txt"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.runner.iterations, None);
        assert_eq!(config.runner.samples, None);
        assert!(config.runner.progress);
        assert_eq!(config.output.format, "human");
        assert_eq!(config.output.path, None);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            iterations = [10, 100]
            seed = 7

            [output]
            format = "csv"
        "#;

        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.iterations, Some(vec![10, 100]));
        assert_eq!(config.runner.seed, Some(7));
        assert_eq!(config.output.format, "csv");
        // Defaults should still apply
        assert_eq!(config.runner.samples, None);
        assert!(config.runner.progress);
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = BenchConfig::default_toml();
        let config: BenchConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn test_discover_walks_up() {
        let root = std::env::temp_dir().join(format!(
            "shufflebench-config-{}",
            std::process::id()
        ));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(CONFIG_FILE_NAME), "[runner]\nsamples = 4\n").unwrap();

        let config = BenchConfig::discover_from(&nested).unwrap();
        assert_eq!(config.runner.samples, Some(4));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
