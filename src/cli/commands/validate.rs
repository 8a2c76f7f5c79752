//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid: {config_path}");
                println!(
                    "  workers = {}, deadline = {}s, threshold = {}",
                    config.dispatch.workers,
                    config.dispatch.deadline_seconds,
                    config.analysis.confidence_threshold
                );
                Ok(0)
            }
            Err(e) => {
                eprintln!("Configuration invalid: {e}");
                Ok(5)
            }
        }
    }
}
