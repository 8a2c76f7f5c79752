//! Per-segment finding extraction
//!
//! [`evaluate_segment`] is the pure worker function: no I/O, no mutation of
//! shared state, safe to invoke concurrently from any number of workers
//! against the same shared [`ModelSet`]. It never fails; a segment that
//! cannot be scored simply contributes zero findings.

use crate::analysis::ModelSet;
use crate::domain::{Finding, Segment};

/// Evaluate one segment against the shared models
///
/// A finding for label L is emitted only when three gates agree, checked in
/// order with short-circuiting:
///
/// 1. scorer confidence for L is at least `threshold`;
/// 2. at least one keyword alias with label L matched in the segment;
/// 3. L has a registered value-extraction pattern.
///
/// For a label passing all three, one finding is emitted per pattern match
/// (every match, not just the first). A label passing the first two gates
/// with no pattern hits yields zero findings, not an error.
pub fn evaluate_segment(segment: &Segment, models: &ModelSet, threshold: f64) -> Vec<Finding> {
    let text = segment.text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let scores = models.scorer.score(text);
    let keyword_matches = models.matcher.find_matches(text);

    let mut findings = Vec::new();
    for score in scores {
        if score.confidence < threshold {
            continue;
        }
        if !keyword_matches.iter().any(|m| m.label == score.label) {
            continue;
        }
        let Some(pattern) = models.patterns.pattern_for(&score.label) else {
            continue;
        };

        let matched_keywords: Vec<String> = keyword_matches
            .iter()
            .filter(|m| m.label == score.label)
            .map(|m| m.matched_phrase.clone())
            .collect();

        for hit in pattern.find_iter(text) {
            let hit = match hit {
                Ok(hit) => hit,
                Err(e) => {
                    tracing::debug!(label = %score.label, error = %e, "Pattern scan aborted");
                    break;
                }
            };
            findings.push(Finding {
                segment_index: segment.index,
                segment_text: text.to_string(),
                label: score.label.clone(),
                matched_keywords: matched_keywords.clone(),
                extracted_value: hit.as_str().trim().to_string(),
                offset_start: char_offset(text, hit.start()),
                offset_end: char_offset(text, hit.end()),
                confidence: round3(score.confidence),
            });
        }
    }

    findings
}

/// Convert a byte offset into a character offset
fn char_offset(text: &str, byte: usize) -> usize {
    text.get(..byte).map(|p| p.chars().count()).unwrap_or(0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
