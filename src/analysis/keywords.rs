//! Keyword alias matching
//!
//! Detects occurrences of known keyword aliases in segment text, tagged by
//! label. Matching is case-insensitive and whole-word; the literal phrase as
//! it appeared in the segment is preserved for the finding record.

use crate::analysis::patterns::PatternLibrary;
use crate::domain::KeywordMatch;
use anyhow::{Context, Result};
use regex::Regex;

/// Trait for keyword alias detection implementations
///
/// Implementations must be safe to share read-only across worker tasks.
pub trait PhraseDetector: Send + Sync {
    /// Find every alias occurrence in the text, in position order
    fn find_matches(&self, text: &str) -> Vec<KeywordMatch>;
}

/// Regex-based phrase matcher built from the alias table of a pattern library
pub struct PhraseMatcher {
    /// One compiled alternation per label, in deterministic label order
    matchers: Vec<(String, Regex)>,
}

impl PhraseMatcher {
    /// Build a matcher from a parsed library
    pub fn from_library(library: &PatternLibrary) -> Result<Self> {
        let mut matchers = Vec::new();
        for (label, aliases) in library.alias_table() {
            if aliases.is_empty() {
                continue;
            }
            // Longer aliases first so "aadhaar number" wins over "aadhaar"
            // at the same position.
            let mut ordered = aliases.clone();
            ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
            let alternation = ordered
                .iter()
                .map(|alias| regex::escape(alias))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                .with_context(|| format!("Invalid alias set for label '{label}'"))?;
            matchers.push((label, regex));
        }
        Ok(Self { matchers })
    }

    /// Build the matcher from the embedded default library
    pub fn default_matcher() -> Result<Self> {
        Self::from_library(&PatternLibrary::default_library()?)
    }
}

impl PhraseDetector for PhraseMatcher {
    fn find_matches(&self, text: &str) -> Vec<KeywordMatch> {
        let mut hits: Vec<(usize, KeywordMatch)> = Vec::new();
        for (label, regex) in &self.matchers {
            for m in regex.find_iter(text) {
                hits.push((
                    m.start(),
                    KeywordMatch {
                        label: label.clone(),
                        matched_phrase: m.as_str().to_string(),
                    },
                ));
            }
        }
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.label.cmp(&b.1.label)));
        hits.into_iter().map(|(_, m)| m).collect()
    }
}
