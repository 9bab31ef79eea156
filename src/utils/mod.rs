//! Utility modules
//!
//! Configuration, logging setup and file export.

mod config;
pub mod export;
mod logging;

pub use config::{
    CanonicalConfig, Config, GeneratorConfig, IngestConfig, LayoutConfig, LoggingConfig,
    PartitionConfig, SurveyConfig,
};
pub use logging::setup_logging;
