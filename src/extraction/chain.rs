//! Cascading loader fallback chain
//!
//! Strategies are registered per document kind as an ordered list, tried in
//! priority order (highest-fidelity first). A failing strategy is swallowed,
//! logged at debug level, and the chain moves on; only an exhausted chain
//! escalates. The first strategy whose output passes the kind-specific
//! acceptance gate wins and no further strategies run.

use crate::domain::{Document, DocumentKind, ExtractionError, ExtractionOutcome, StrategyFailure};
use crate::extraction::resolve_kind;
use crate::extraction::strategies::{
    CsvTable, DocxXml, Generic, PdfLenient, PdfStructured, PdfToText, PptxXml, PrintableScavenge,
    SheetCalamine, StrategyInput, TextStrategy, TextUtf8,
};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

/// Chain configuration
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Acceptance gate for structurally-complex kinds (PDF)
    pub min_length_structured: usize,

    /// Acceptance gate for everything else
    pub min_length_simple: usize,

    /// Directory for the temporary on-disk copy; system default when unset
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            min_length_structured: 50,
            min_length_simple: 10,
            scratch_dir: None,
        }
    }
}

/// Ordered strategy table keyed by document kind
pub type StrategyTable = HashMap<DocumentKind, Vec<Box<dyn TextStrategy>>>;

/// The default table: per-kind chains, highest fidelity first
///
/// Unknown kinds route to the single generic best-effort extractor rather
/// than failing immediately.
pub fn default_table() -> StrategyTable {
    let mut table: StrategyTable = HashMap::new();
    table.insert(
        DocumentKind::Pdf,
        vec![
            Box::new(PdfStructured),
            Box::new(PdfLenient),
            Box::new(PdfToText),
        ],
    );
    table.insert(
        DocumentKind::Word,
        vec![Box::new(DocxXml), Box::new(PrintableScavenge)],
    );
    table.insert(
        DocumentKind::Spreadsheet,
        vec![Box::new(SheetCalamine), Box::new(Generic)],
    );
    table.insert(
        DocumentKind::Presentation,
        vec![Box::new(PptxXml), Box::new(Generic)],
    );
    table.insert(DocumentKind::PlainText, vec![Box::new(TextUtf8)]);
    table.insert(
        DocumentKind::Csv,
        vec![Box::new(CsvTable), Box::new(TextUtf8)],
    );
    table.insert(DocumentKind::Unknown, vec![Box::new(Generic)]);
    table
}

/// Cascading text extraction over an ordered strategy table
pub struct LoaderFallbackChain {
    config: ChainConfig,
    table: StrategyTable,
}

impl LoaderFallbackChain {
    /// Creates a chain with the default strategy table
    pub fn new(config: ChainConfig) -> Self {
        Self::with_table(config, default_table())
    }

    /// Creates a chain with a custom strategy table
    pub fn with_table(config: ChainConfig, table: StrategyTable) -> Self {
        Self { config, table }
    }

    /// Extract text from a document, trying each registered strategy in order
    ///
    /// A temporary on-disk copy of the payload is created before the first
    /// attempt and removed on every exit path.
    pub fn extract(&self, document: &Document) -> Result<ExtractionOutcome, ExtractionError> {
        let kind = resolve_kind(document.filename.as_deref());
        let min_length = self.min_length(kind);
        let mut attempts = Vec::new();

        // Scratch copy for path-based strategies; the guard deletes the
        // file when this function returns, success or failure.
        let scratch = match self.write_scratch_copy(document) {
            Ok(scratch) => scratch,
            Err(reason) => {
                attempts.push(StrategyFailure::new("scratch-copy", reason));
                return Err(ExtractionError::new(kind, attempts));
            }
        };

        let strategies = self
            .table
            .get(&kind)
            .or_else(|| self.table.get(&DocumentKind::Unknown));
        let Some(strategies) = strategies else {
            return Err(ExtractionError::new(kind, attempts));
        };

        let input = StrategyInput {
            bytes: &document.bytes,
            scratch_path: scratch.path(),
        };

        for strategy in strategies {
            match strategy.extract(&input) {
                Ok(text) => {
                    let trimmed_len = text.trim().chars().count();
                    if trimmed_len > min_length {
                        tracing::info!(
                            kind = %kind,
                            strategy = strategy.id(),
                            chars = trimmed_len,
                            "Extraction succeeded"
                        );
                        return Ok(ExtractionOutcome::new(text, strategy.id()));
                    }
                    tracing::debug!(
                        kind = %kind,
                        strategy = strategy.id(),
                        chars = trimmed_len,
                        min = min_length,
                        "Output below acceptance gate, trying next strategy"
                    );
                    attempts.push(StrategyFailure::new(
                        strategy.id(),
                        format!("output below acceptance gate ({trimmed_len} <= {min_length} chars)"),
                    ));
                }
                Err(reason) => {
                    tracing::debug!(
                        kind = %kind,
                        strategy = strategy.id(),
                        reason = %reason,
                        "Strategy failed, trying next"
                    );
                    attempts.push(StrategyFailure::new(strategy.id(), reason));
                }
            }
        }

        Err(ExtractionError::new(kind, attempts))
    }

    fn min_length(&self, kind: DocumentKind) -> usize {
        if kind.is_structured() {
            self.config.min_length_structured
        } else {
            self.config.min_length_simple
        }
    }

    fn write_scratch_copy(&self, document: &Document) -> Result<tempfile::NamedTempFile, String> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("argus-");
        let suffix = document.extension().map(|ext| format!(".{ext}"));
        if let Some(suffix) = &suffix {
            builder.suffix(suffix.as_str());
        }

        let mut file = match &self.config.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| format!("failed to create scratch file: {e}"))?;

        file.write_all(&document.bytes)
            .map_err(|e| format!("failed to write scratch file: {e}"))?;
        Ok(file)
    }
}
