//! Init command implementation

use clap::Args;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# Argus configuration

[application]
# trace, debug, info, warn, error
log_level = "info"

[extraction]
# Acceptance gates: minimum trimmed character count for extracted text.
min_length_structured = 50
min_length_simple = 10
# scratch_dir = "/tmp/argus"

[analysis]
confidence_threshold = 0.1
# pattern_library = "patterns/pii_patterns.toml"
# scorer_artifact = "artifacts/scorer.json"

[dispatch]
workers = 4
deadline_seconds = 60

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration file
    #[arg(short, long, default_value = "argus.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        if self.output.exists() && !self.force {
            eprintln!(
                "{} already exists; use --force to overwrite",
                self.output.display()
            );
            return Ok(5);
        }
        std::fs::write(&self.output, TEMPLATE)?;
        println!("Wrote starter configuration to {}", self.output.display());
        Ok(0)
    }
}
