//! Domain models and types for Argus.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Document types** ([`Document`], [`DocumentKind`], [`ExtractionOutcome`])
//! - **Segment type** ([`Segment`])
//! - **Finding models** ([`Finding`], [`LabelScore`], [`KeywordMatch`], [`ScanReport`])
//! - **Error types** ([`ArgusError`], [`ExtractionError`], [`DispatchTimeout`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ArgusError>`]:
//!
//! ```rust
//! use argus::domain::{ArgusError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = argus::config::load_config("argus.toml")?;
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod errors;
pub mod finding;
pub mod result;
pub mod segment;

// Re-export commonly used types for convenience
pub use document::{Document, DocumentKind, ExtractionOutcome};
pub use errors::{ArgusError, DispatchTimeout, ExtractionError, StrategyFailure};
pub use finding::{Finding, KeywordMatch, LabelScore, ScanReport};
pub use result::Result;
pub use segment::Segment;
