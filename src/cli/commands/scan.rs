//! Scan command implementation

use crate::config::load_config_or_default;
use crate::domain::{ArgusError, ScanReport};
use crate::pipeline::DocumentScanner;
use clap::Args;
use std::path::PathBuf;

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report as JSON
    Json,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the document to scan
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Override the configured confidence threshold
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl ScanArgs {
    /// Execute the scan command
    ///
    /// Exit codes: 0 success, 2 extraction failure, 3 dispatch timeout,
    /// 5 configuration or fatal error.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = load_config_or_default(config_path)?;
        if let Some(threshold) = self.threshold {
            config.analysis.confidence_threshold = threshold;
            config
                .validate()
                .map_err(ArgusError::Configuration)?;
        }

        let bytes = std::fs::read(&self.file).map_err(|e| {
            ArgusError::Io(format!("Failed to read {}: {e}", self.file.display()))
        })?;
        let filename = self
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        let scanner = DocumentScanner::new(&config)?;
        match scanner.process_document(bytes, filename.as_deref()).await {
            Ok(report) => {
                self.render(&report)?;
                Ok(0)
            }
            Err(ArgusError::Extraction(e)) => {
                eprintln!("Extraction failed: {e}");
                Ok(2)
            }
            Err(ArgusError::Timeout(e)) => {
                eprintln!("Scan timed out: {e}");
                Ok(3)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn render(&self, report: &ScanReport) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            OutputFormat::Text => {
                println!(
                    "Scan {} - {} segment(s), {} finding(s) via {}",
                    report.scan_id,
                    report.segment_count,
                    report.total_findings(),
                    report.strategy_used
                );
                for finding in &report.findings {
                    println!(
                        "  [{}] \"{}\" (confidence {:.3}, segment {}, chars {}..{})",
                        finding.label,
                        finding.extracted_value,
                        finding.confidence,
                        finding.segment_index,
                        finding.offset_start,
                        finding.offset_end
                    );
                    if !finding.matched_keywords.is_empty() {
                        println!("      keywords: {}", finding.matched_keywords.join(", "));
                    }
                }
                if !report.has_findings() {
                    println!("  No PII detected.");
                }
            }
        }
        Ok(())
    }
}
