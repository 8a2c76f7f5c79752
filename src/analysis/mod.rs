//! Segment analysis: scoring, keyword matching, and pattern extraction
//!
//! The three analysis capabilities are loaded once at startup into a
//! [`ModelSet`] and shared read-only across every concurrent segment
//! evaluation; nothing in this module mutates shared state after load.

pub mod extractor;
pub mod keywords;
pub mod patterns;
pub mod scorer;

pub use extractor::evaluate_segment;
pub use keywords::{PhraseDetector, PhraseMatcher};
pub use patterns::{PatternLibrary, PatternRegistry};
pub use scorer::{LabelScorer, SegmentScorer};

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// The process-wide, read-only model bundle
///
/// Constructed once at startup and passed by reference into every worker
/// invocation; never re-loaded per call.
pub struct ModelSet {
    /// Multi-label confidence scorer
    pub scorer: Arc<dyn SegmentScorer>,

    /// Keyword alias matcher
    pub matcher: Arc<dyn PhraseDetector>,

    /// Label-specific value-extraction patterns
    pub patterns: Arc<PatternRegistry>,
}

impl ModelSet {
    /// Assemble a model set from its parts
    pub fn new(
        scorer: Arc<dyn SegmentScorer>,
        matcher: Arc<dyn PhraseDetector>,
        patterns: Arc<PatternRegistry>,
    ) -> Self {
        Self {
            scorer,
            matcher,
            patterns,
        }
    }

    /// Load a model set from optional artifact paths
    ///
    /// `None` selects the embedded defaults, so a fresh checkout scans
    /// documents without any external files.
    pub fn load(
        pattern_library: Option<&Path>,
        scorer_artifact: Option<&Path>,
    ) -> Result<Self> {
        let library = match pattern_library {
            Some(path) => PatternLibrary::from_file(path)
                .with_context(|| format!("Failed to load pattern library {}", path.display()))?,
            None => PatternLibrary::default_library()?,
        };

        let scorer: Arc<dyn SegmentScorer> = match scorer_artifact {
            Some(path) => Arc::new(
                LabelScorer::from_file(path)
                    .with_context(|| format!("Failed to load scorer artifact {}", path.display()))?,
            ),
            None => Arc::new(LabelScorer::default_scorer()?),
        };

        let matcher = Arc::new(PhraseMatcher::from_library(&library)?);
        let patterns = Arc::new(PatternRegistry::from_library(&library)?);

        tracing::info!(
            labels = scorer.labels().len(),
            patterns = patterns.len(),
            "Loaded analysis models"
        );

        Ok(Self::new(scorer, matcher, patterns))
    }
}
