//! PII finding data models
//!
//! A [`Finding`] is the sole externally visible unit of scan output. One is
//! emitted only when three independent gates agree on the same label for a
//! segment: scorer confidence over the threshold, at least one keyword alias
//! match, and at least one pattern match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scorer output for one label on one segment
///
/// Scores are independent per label; they need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Label name (e.g. "AADHAAR_NUMBER")
    pub label: String,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// One keyword alias occurrence in a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Label the matched alias belongs to
    pub label: String,

    /// The literal phrase as it appeared in the segment
    pub matched_phrase: String,
}

/// A single detected PII occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Index of the segment this finding came from
    pub segment_index: usize,

    /// Full text of the segment
    pub segment_text: String,

    /// Detected PII label
    pub label: String,

    /// Matched keyword phrases whose label equals this finding's label
    pub matched_keywords: Vec<String>,

    /// Trimmed pattern-matched substring (the literal PII value)
    pub extracted_value: String,

    /// Start character offset within the segment
    pub offset_start: usize,

    /// End character offset within the segment (exclusive)
    pub offset_end: usize,

    /// Scorer confidence, rounded to 3 decimal places
    pub confidence: f64,
}

/// Aggregated scan result for one document
///
/// Findings are ordered by segment submission order, then pattern-match
/// order within a segment. No cross-segment deduplication is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique id for this scan
    pub scan_id: uuid::Uuid,

    /// Original filename hint, if supplied
    pub filename: Option<String>,

    /// SHA-256 checksum of the raw document bytes
    pub document_checksum: String,

    /// Identifier of the extraction strategy that produced the text
    pub strategy_used: String,

    /// Number of segments the document was split into
    pub segment_count: usize,

    /// Ordered findings spanning the whole document
    pub findings: Vec<Finding>,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,

    /// Timestamp of the scan
    pub timestamp: DateTime<Utc>,
}

impl ScanReport {
    /// Creates a new scan report
    pub fn new(
        filename: Option<String>,
        document_checksum: String,
        strategy_used: String,
        segment_count: usize,
        findings: Vec<Finding>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            scan_id: uuid::Uuid::new_v4(),
            filename,
            document_checksum,
            strategy_used,
            segment_count,
            findings,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Total number of findings
    pub fn total_findings(&self) -> usize {
        self.findings.len()
    }

    /// Whether any PII was detected
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Finding counts keyed by label
    pub fn counts_by_label(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for finding in &self.findings {
            *counts.entry(finding.label.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_finding(index: usize, label: &str) -> Finding {
        Finding {
            segment_index: index,
            segment_text: "My PAN is ABCDE1234F.".to_string(),
            label: label.to_string(),
            matched_keywords: vec!["pan".to_string()],
            extracted_value: "ABCDE1234F".to_string(),
            offset_start: 10,
            offset_end: 20,
            confidence: 0.75,
        }
    }

    #[test]
    fn test_report_counts_by_label() {
        let report = ScanReport::new(
            Some("ids.txt".to_string()),
            "deadbeef".to_string(),
            "text-utf8".to_string(),
            2,
            vec![
                sample_finding(0, "PAN_NUMBER"),
                sample_finding(1, "PAN_NUMBER"),
                sample_finding(1, "PHONE_NUMBER"),
            ],
            12,
        );

        assert_eq!(report.total_findings(), 3);
        assert!(report.has_findings());
        let counts = report.counts_by_label();
        assert_eq!(counts.get("PAN_NUMBER"), Some(&2));
        assert_eq!(counts.get("PHONE_NUMBER"), Some(&1));
    }

    #[test]
    fn test_empty_report_is_not_an_error() {
        let report = ScanReport::new(None, "00".to_string(), "generic".to_string(), 0, vec![], 1);
        assert_eq!(report.total_findings(), 0);
        assert!(!report.has_findings());
    }

    #[test]
    fn test_finding_serializes_offsets() {
        let finding = sample_finding(0, "PAN_NUMBER");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["offset_start"], 10);
        assert_eq!(json["offset_end"], 20);
        assert_eq!(json["label"], "PAN_NUMBER");
    }
}
