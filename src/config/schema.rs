//! Configuration schema types
//!
//! This module defines the configuration structure for Argus. Every section
//! has working defaults so a fresh checkout can scan documents with the
//! embedded models and no config file at all.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Argus configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgusConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Text extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Segment analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Worker pool settings
    #[serde(default)]
    pub dispatch: DispatchSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArgusConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.extraction.validate()?;
        self.analysis.validate()?;
        self.dispatch.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Text extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Acceptance gate for structurally-complex kinds (PDF)
    #[serde(default = "default_min_length_structured")]
    pub min_length_structured: usize,

    /// Acceptance gate for simpler kinds
    #[serde(default = "default_min_length_simple")]
    pub min_length_simple: usize,

    /// Scratch directory for the per-document temporary copy;
    /// system default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_length_structured: default_min_length_structured(),
            min_length_simple: default_min_length_simple(),
            scratch_dir: None,
        }
    }
}

impl ExtractionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.min_length_simple > self.min_length_structured {
            return Err(format!(
                "min_length_simple ({}) must not exceed min_length_structured ({})",
                self.min_length_simple, self.min_length_structured
            ));
        }
        if let Some(dir) = &self.scratch_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "scratch_dir is not a directory: {}",
                    dir.display()
                ));
            }
        }
        Ok(())
    }
}

/// Segment analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum scorer confidence for a label to pass the first gate
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Path to a pattern/keyword library TOML; embedded default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,

    /// Path to a scorer artifact JSON; embedded default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorer_artifact: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            pattern_library: None,
            scorer_artifact: None,
        }
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            ));
        }
        if let Some(path) = &self.pattern_library {
            if !path.is_file() {
                return Err(format!("pattern_library not found: {}", path.display()));
            }
        }
        if let Some(path) = &self.scorer_artifact {
            if !path.is_file() {
                return Err(format!("scorer_artifact not found: {}", path.display()));
            }
        }
        Ok(())
    }
}

/// Worker pool configuration
///
/// Worker count and deadline are injected at startup; the pipeline never
/// hard-codes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Number of segment evaluations allowed in flight at once
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Fan-in barrier deadline in seconds
    #[serde(default = "default_deadline_seconds")]
    pub deadline_seconds: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            deadline_seconds: default_deadline_seconds(),
        }
    }
}

impl DispatchSettings {
    fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("dispatch.workers must be at least 1".to_string());
        }
        if self.deadline_seconds == 0 {
            return Err("dispatch.deadline_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation: "daily" or "hourly"
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_min_length_structured() -> usize {
    50
}

fn default_min_length_simple() -> usize {
    10
}

fn default_confidence_threshold() -> f64 {
    0.1
}

fn default_workers() -> usize {
    4
}

fn default_deadline_seconds() -> u64 {
    60
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
