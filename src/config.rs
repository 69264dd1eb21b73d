//! TOML-backed configuration with per-field defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "habrmeta.toml";

/// Analysis thresholds and knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum |coefficient| for a correlation pair to be reported
    #[serde(default = "default_correlation_threshold")]
    pub correlation_threshold: f64,

    /// AI-likelihood score above which a record counts as AI-flagged
    #[serde(default = "default_ai_flag_threshold")]
    pub ai_flag_threshold: f64,

    /// Publication year the analysis sample is restricted to
    #[serde(default = "default_sample_year")]
    pub sample_year: i32,

    /// Number of entries in the top-N summary lists
    #[serde(default = "default_top_count")]
    pub top_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: default_correlation_threshold(),
            ai_flag_threshold: default_ai_flag_threshold(),
            sample_year: default_sample_year(),
            top_count: default_top_count(),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the report pages and exports are written into
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Top-level configuration, loadable from `habrmeta.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl MetaConfig {
    /// Load configuration: an explicit path must exist and parse; otherwise
    /// `habrmeta.toml` in the working directory is used when present, and
    /// defaults apply when it is not.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse config {}: {e}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn default_correlation_threshold() -> f64 {
    0.15
}

fn default_ai_flag_threshold() -> f64 {
    235.0
}

fn default_sample_year() -> i32 {
    2024
}

fn default_top_count() -> usize {
    5
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
