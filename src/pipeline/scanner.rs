//! Document scanner - main orchestrator for the scan pipeline
//!
//! One synchronous control path per document handles extraction and
//! segmentation in sequence; segment analysis fans out to the worker pool
//! and the control task blocks only at the fan-in barrier. The caller
//! receives the full aggregated report or a single terminal error; there is
//! no streaming or partial delivery of findings.

use crate::analysis::ModelSet;
use crate::config::ArgusConfig;
use crate::domain::{ArgusError, Document, Result, ScanReport};
use crate::extraction::{ChainConfig, LoaderFallbackChain};
use crate::pipeline::aggregate;
use crate::pipeline::dispatch::{DispatchConfig, SegmentDispatcher};
use crate::segmentation::Segmenter;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Document scan coordinator
///
/// Holds the shared, read-only models and the pipeline stages. Construct
/// once at startup and reuse across scans; the models are never re-loaded
/// per call.
pub struct DocumentScanner {
    chain: LoaderFallbackChain,
    segmenter: Segmenter,
    dispatcher: SegmentDispatcher,
    models: Arc<ModelSet>,
    confidence_threshold: f64,
}

impl DocumentScanner {
    /// Create a scanner from configuration
    ///
    /// Loads the scorer artifact and pattern library (embedded defaults
    /// when unconfigured) and wires the pipeline stages.
    pub fn new(config: &ArgusConfig) -> Result<Self> {
        let models = ModelSet::load(
            config.analysis.pattern_library.as_deref(),
            config.analysis.scorer_artifact.as_deref(),
        )
        .map_err(|e| ArgusError::Model(format!("{e:#}")))?;

        let chain = LoaderFallbackChain::new(ChainConfig {
            min_length_structured: config.extraction.min_length_structured,
            min_length_simple: config.extraction.min_length_simple,
            scratch_dir: config.extraction.scratch_dir.clone(),
        });

        let dispatcher = SegmentDispatcher::new(DispatchConfig {
            workers: config.dispatch.workers,
            deadline: Duration::from_secs(config.dispatch.deadline_seconds),
        });

        Ok(Self {
            chain,
            segmenter: Segmenter::new(),
            dispatcher,
            models: Arc::new(models),
            confidence_threshold: config.analysis.confidence_threshold,
        })
    }

    /// Create a scanner from explicit parts
    pub fn with_parts(
        chain: LoaderFallbackChain,
        segmenter: Segmenter,
        dispatcher: SegmentDispatcher,
        models: Arc<ModelSet>,
        confidence_threshold: f64,
    ) -> Self {
        Self {
            chain,
            segmenter,
            dispatcher,
            models,
            confidence_threshold,
        }
    }

    /// Scan one document: extract, segment, dispatch, aggregate
    ///
    /// # Errors
    ///
    /// - [`ArgusError::Extraction`] when no strategy passes the acceptance
    ///   gate; carries the attempted kind and every failure reason.
    /// - [`ArgusError::Timeout`] when the fan-in barrier expires; no partial
    ///   result is ever returned.
    ///
    /// Neither error is retried internally; retry policy belongs to the
    /// caller.
    pub async fn process_document(
        &self,
        bytes: Vec<u8>,
        filename: Option<&str>,
    ) -> Result<ScanReport> {
        let start = Instant::now();
        let checksum = hex_sha256(&bytes);
        let document = Document::new(bytes, filename.map(String::from));

        tracing::info!(
            filename = document.filename.as_deref().unwrap_or("<unnamed>"),
            bytes = document.bytes.len(),
            "Starting document scan"
        );

        let outcome = self.chain.extract(&document)?;
        let segments = self.segmenter.segment(&outcome.text);
        let segment_count = segments.len();

        tracing::info!(
            strategy = %outcome.strategy_used,
            segments = segment_count,
            "Extraction complete, dispatching segments"
        );

        let per_segment = self
            .dispatcher
            .dispatch(segments, Arc::clone(&self.models), self.confidence_threshold)
            .await?;
        let findings = aggregate::merge(per_segment);

        let report = ScanReport::new(
            document.filename.clone(),
            checksum,
            outcome.strategy_used,
            segment_count,
            findings,
            start.elapsed().as_millis() as u64,
        );

        tracing::info!(
            scan_id = %report.scan_id,
            findings = report.total_findings(),
            elapsed_ms = report.processing_time_ms,
            "Scan complete"
        );

        Ok(report)
    }
}

fn hex_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
