// Argus - Document PII Scanner
// Copyright (c) 2025 Argus Contributors
// Licensed under the MIT License

//! # Argus - Document PII Scanner
//!
//! Argus ingests an arbitrary-format document, extracts its text through a
//! cascading fallback chain, splits it into sentence-level segments, scores
//! the segments in parallel against a multi-label model, and reports PII
//! findings with labels, matched keywords, character offsets, and
//! confidences.
//!
//! ## Architecture
//!
//! Argus follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`pipeline`] - Scan orchestration (dispatch, aggregation, coordinator)
//! - [`extraction`] - Format resolution and the loader fallback chain
//! - [`segmentation`] - Sentence-level text segmentation
//! - [`analysis`] - Scorer, keyword matcher, and pattern extractors
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argus::config::ArgusConfig;
//! use argus::pipeline::DocumentScanner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ArgusConfig::default();
//!     let scanner = DocumentScanner::new(&config)?;
//!
//!     let bytes = std::fs::read("statement.pdf")?;
//!     let report = scanner.process_document(bytes, Some("statement.pdf")).await?;
//!
//!     println!("{} finding(s)", report.total_findings());
//!     Ok(())
//! }
//! ```
//!
//! ## Finding semantics
//!
//! A finding for label L in a segment exists only when three independent
//! gates agree: the scorer's confidence for L clears the configured
//! threshold, at least one keyword alias tagged L matched in the segment,
//! and L's value-extraction pattern matched. Any two of the three is not
//! sufficient.
//!
//! ## Error Handling
//!
//! Argus uses the [`domain::ArgusError`] type for all errors:
//!
//! ```rust,no_run
//! use argus::domain::ArgusError;
//!
//! fn example() -> Result<(), ArgusError> {
//!     let config = argus::config::load_config("argus.toml")?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod extraction;
pub mod logging;
pub mod pipeline;
pub mod segmentation;
