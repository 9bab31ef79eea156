//! Configuration management
//!
//! Every knob the pipeline uses (column names, row policy, threshold,
//! seeds, recode tables) lives here and is threaded through explicitly.

use crate::collab::LayoutShape;
use crate::data::{RowPolicy, SelfLoopPolicy};
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Input table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub actor_a_column: String,
    pub actor_b_column: String,
    pub year_column: String,
    pub delimiter: char,
    pub row_policy: RowPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            actor_a_column: "actor_a".to_string(),
            actor_b_column: "actor_b".to_string(),
            year_column: "year".to_string(),
            delimiter: ',',
            row_policy: RowPolicy::Strict,
        }
    }
}

impl IngestConfig {
    /// Required column names in (actor_a, actor_b, year) order
    pub fn required_columns(&self) -> [&str; 3] {
        [
            self.actor_a_column.as_str(),
            self.actor_b_column.as_str(),
            self.year_column.as_str(),
        ]
    }
}

/// Canonicalization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalConfig {
    pub self_loops: SelfLoopPolicy,
}

/// Partition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// First time step of the "post" partition
    pub threshold: u32,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        // Midpoint of a 9-period series
        Self { threshold: 5 }
    }
}

/// Synthetic network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub nodes: usize,
    pub edges_per_node: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 100,
            edges_per_node: 2,
            seed: 42,
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub seed: u64,
    pub shape: LayoutShape,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shape: LayoutShape::Square,
        }
    }
}

/// Survey preparation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Cell values treated as missing
    pub missing_markers: Vec<String>,
    /// Column name -> (raw value -> label)
    pub recode: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            missing_markers: vec!["".to_string(), "NA".to_string()],
            recode: BTreeMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub canonical: CanonicalConfig,
    pub partition: PartitionConfig,
    pub generator: GeneratorConfig,
    pub layout: LayoutConfig,
    pub survey: SurveyConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create default configuration file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Config::default();
        config.save(path)
    }

    /// Check values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.partition.threshold == 0 {
            return Err(PipelineError::Config(
                "partition.threshold must be >= 1 (time steps start at 1)".into(),
            ));
        }
        if !self.ingest.delimiter.is_ascii() {
            return Err(PipelineError::Config(format!(
                "ingest.delimiter must be a single ASCII character, got {:?}",
                self.ingest.delimiter
            )));
        }
        let columns = self.ingest.required_columns();
        if columns[0] == columns[1] {
            return Err(PipelineError::Config(
                "ingest.actor_a_column and ingest.actor_b_column must differ".into(),
            ));
        }
        Ok(())
    }
}
