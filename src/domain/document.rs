//! Document domain types
//!
//! A [`Document`] is the raw ingress payload: bytes plus an optional filename
//! hint. It lives for the duration of one scan request and is discarded after
//! extraction produces an [`ExtractionOutcome`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved document kind, used to select the extraction strategy chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// PDF documents (.pdf)
    Pdf,
    /// Word documents (.docx, .doc)
    Word,
    /// Spreadsheets (.xlsx, .xls)
    Spreadsheet,
    /// Presentations (.pptx, .ppt)
    Presentation,
    /// Plain text (.txt)
    PlainText,
    /// Comma-separated values (.csv)
    Csv,
    /// Anything without a recognized extension; routed to the generic fallback
    Unknown,
}

impl DocumentKind {
    /// Human-readable label for the kind
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::PlainText => "text",
            Self::Csv => "csv",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this kind has complex internal structure
    ///
    /// Structurally-complex kinds use a higher minimum-length acceptance
    /// gate because partial extractions from them are common.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw document as received at ingress
///
/// Immutable once created. The byte payload is owned so that the scan
/// request is self-contained after the upstream handler returns.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw byte payload
    pub bytes: Vec<u8>,

    /// Original filename hint, if the caller supplied one
    pub filename: Option<String>,
}

impl Document {
    /// Creates a new document from a byte payload and optional filename hint
    pub fn new(bytes: Vec<u8>, filename: Option<String>) -> Self {
        Self { bytes, filename }
    }

    /// The filename extension, lowercased, without the dot
    pub fn extension(&self) -> Option<String> {
        let name = self.filename.as_deref()?;
        let ext = std::path::Path::new(name).extension()?;
        Some(ext.to_string_lossy().to_lowercase())
    }
}

/// The text produced by the first extraction strategy to pass the
/// acceptance gate, together with the identifier of that strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Full extracted document text
    pub text: String,

    /// Identifier of the winning strategy (e.g. "pdf-structured")
    pub strategy_used: String,
}

impl ExtractionOutcome {
    /// Creates a new extraction outcome
    pub fn new(text: String, strategy_used: impl Into<String>) -> Self {
        Self {
            text,
            strategy_used: strategy_used.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercased() {
        let doc = Document::new(b"x".to_vec(), Some("Report.PDF".to_string()));
        assert_eq!(doc.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_extension_absent() {
        let doc = Document::new(b"x".to_vec(), None);
        assert_eq!(doc.extension(), None);

        let doc = Document::new(b"x".to_vec(), Some("README".to_string()));
        assert_eq!(doc.extension(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DocumentKind::Pdf.to_string(), "pdf");
        assert_eq!(DocumentKind::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_structured_kinds() {
        assert!(DocumentKind::Pdf.is_structured());
        assert!(!DocumentKind::PlainText.is_structured());
        assert!(!DocumentKind::Csv.is_structured());
    }
}
