//! Document text extraction
//!
//! Maps a filename hint to a [`DocumentKind`] and runs the kind's ordered
//! strategy chain until one attempt passes the acceptance gate. See
//! [`chain::LoaderFallbackChain`] for the fallback semantics.

pub mod chain;
pub mod strategies;

pub use chain::{default_table, ChainConfig, LoaderFallbackChain, StrategyTable};
pub use strategies::{StrategyInput, TextStrategy};

use crate::domain::DocumentKind;
use std::path::Path;

/// Resolve a document kind from a filename hint
///
/// Resolution is by extension, case-insensitive. A missing filename or an
/// unmapped extension resolves to [`DocumentKind::Unknown`], which routes to
/// the generic best-effort extractor rather than failing.
pub fn resolve_kind(filename: Option<&str>) -> DocumentKind {
    let Some(filename) = filename else {
        return DocumentKind::Unknown;
    };
    let extension = Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match extension.as_deref() {
        Some("pdf") => DocumentKind::Pdf,
        Some("docx") | Some("doc") => DocumentKind::Word,
        Some("xlsx") | Some("xls") => DocumentKind::Spreadsheet,
        Some("pptx") | Some("ppt") => DocumentKind::Presentation,
        Some("txt") => DocumentKind::PlainText,
        Some("csv") => DocumentKind::Csv,
        _ => DocumentKind::Unknown,
    }
}
