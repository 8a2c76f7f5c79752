//! Segment domain type
//!
//! A segment is a sentence-granularity slice of document text, the unit of
//! distributed work. Segments are created by the segmenter, owned by the
//! dispatcher, and handed by value to worker tasks; no segment is mutated
//! after creation.

use serde::{Deserialize, Serialize};

/// One sentence-level slice of document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Dense position in the segmentation sequence, starting at 0
    pub index: usize,

    /// Trimmed, non-empty segment text
    pub text: String,
}

impl Segment {
    /// Creates a new segment
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}
