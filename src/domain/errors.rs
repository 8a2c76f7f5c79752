//! Domain error types
//!
//! This module defines the error hierarchy for Argus. All errors are
//! domain-specific and don't expose third-party types.

use crate::domain::document::DocumentKind;
use std::time::Duration;
use thiserror::Error;

/// Main Argus error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ArgusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Text extraction exhausted every registered strategy
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// The segment dispatch barrier expired before all workers replied
    #[error("Timeout error: {0}")]
    Timeout(#[from] DispatchTimeout),

    /// Model artifact loading or validation errors
    #[error("Model error: {0}")]
    Model(String),

    /// Segment dispatch failures other than timeout (worker panic, runtime shutdown)
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// A single failed extraction strategy attempt
///
/// Collected by the fallback chain so an exhausted chain can report
/// every reason, not just the last one.
#[derive(Debug, Clone)]
pub struct StrategyFailure {
    /// Identifier of the strategy that failed (e.g. "pdf-structured")
    pub strategy: String,

    /// Why it failed or why its output was rejected
    pub reason: String,
}

impl StrategyFailure {
    /// Creates a new strategy failure record
    pub fn new(strategy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            reason: reason.into(),
        }
    }
}

/// No registered strategy (nor the generic fallback) produced text
/// passing the acceptance gate for a document
///
/// Carries the resolved document kind and the per-strategy failure
/// reasons. Terminal for the document; never retried internally.
#[derive(Debug, Error)]
#[error("no strategy extracted usable text from {kind} document ({})", format_attempts(.attempts))]
pub struct ExtractionError {
    /// The document kind the chain was resolved for
    pub kind: DocumentKind,

    /// Every attempted strategy with its failure reason, in attempt order
    pub attempts: Vec<StrategyFailure>,
}

impl ExtractionError {
    /// Creates a new extraction error
    pub fn new(kind: DocumentKind, attempts: Vec<StrategyFailure>) -> Self {
        Self { kind, attempts }
    }
}

fn format_attempts(attempts: &[StrategyFailure]) -> String {
    if attempts.is_empty() {
        return "no strategies registered".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.strategy, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The fan-in barrier expired before every segment evaluation completed
///
/// All-or-nothing: completed work is discarded, no partial result is
/// surfaced. Workers still running at expiry are not forcibly cancelled.
#[derive(Debug, Error)]
#[error("segment dispatch timed out after {deadline:?}: {completed}/{total} segments returned")]
pub struct DispatchTimeout {
    /// The configured deadline that expired
    pub deadline: Duration,

    /// Segments that had completed when the deadline fired
    pub completed: usize,

    /// Total segments dispatched
    pub total: usize,
}

// Conversion from std::io::Error
impl From<std::io::Error> for ArgusError {
    fn from(err: std::io::Error) -> Self {
        ArgusError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ArgusError {
    fn from(err: serde_json::Error) -> Self {
        ArgusError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ArgusError {
    fn from(err: toml::de::Error) -> Self {
        ArgusError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argus_error_display() {
        let err = ArgusError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_extraction_error_lists_every_attempt() {
        let err = ExtractionError::new(
            DocumentKind::Pdf,
            vec![
                StrategyFailure::new("pdf-structured", "invalid xref table"),
                StrategyFailure::new("pdf-lenient", "no page tree"),
                StrategyFailure::new("pdf-pdftotext", "tool not found"),
            ],
        );
        let msg = err.to_string();
        assert!(msg.contains("pdf-structured"));
        assert!(msg.contains("pdf-lenient"));
        assert!(msg.contains("pdf-pdftotext"));
        assert!(msg.contains("pdf"));
    }

    #[test]
    fn test_extraction_error_conversion() {
        let extraction_err = ExtractionError::new(DocumentKind::Unknown, vec![]);
        let argus_err: ArgusError = extraction_err.into();
        assert!(matches!(argus_err, ArgusError::Extraction(_)));
    }

    #[test]
    fn test_dispatch_timeout_display() {
        let err = DispatchTimeout {
            deadline: Duration::from_secs(60),
            completed: 7,
            total: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("7/10"));
        let argus_err: ArgusError = err.into();
        assert!(matches!(argus_err, ArgusError::Timeout(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let argus_err: ArgusError = io_err.into();
        assert!(matches!(argus_err, ArgusError::Io(_)));
    }

    #[test]
    fn test_argus_error_implements_std_error() {
        let err = ArgusError::Model("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
