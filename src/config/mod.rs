//! Configuration management for Argus.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Argus uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ARGUS_*` environment variable overrides
//! - Default values for every setting
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use argus::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("argus.toml")?;
//!
//! println!("Workers: {}", config.dispatch.workers);
//! println!("Deadline: {}s", config.dispatch.deadline_seconds);
//! println!("Threshold: {}", config.analysis.confidence_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [extraction]
//! min_length_structured = 50
//! min_length_simple = 10
//!
//! [analysis]
//! confidence_threshold = 0.1
//!
//! [dispatch]
//! workers = 4
//! deadline_seconds = 60
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    AnalysisConfig, ApplicationConfig, ArgusConfig, DispatchSettings, ExtractionConfig,
    LoggingConfig,
};
