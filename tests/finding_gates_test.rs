//! Finding conjunction property: a finding exists iff all three gates agree
//!
//! The three gates for a label in a segment are (a) scorer confidence over
//! the threshold, (b) a keyword alias match for the label, and (c) a pattern
//! match for the label. All eight combinations are exercised with synthetic
//! scorers and matchers; only the all-true case may emit.

use argus::analysis::{evaluate_segment, ModelSet, PatternRegistry, PhraseDetector, SegmentScorer};
use argus::domain::{KeywordMatch, LabelScore, Segment};
use std::sync::Arc;
use test_case::test_case;

const LABEL: &str = "AADHAAR_NUMBER";
const THRESHOLD: f64 = 0.1;

struct SyntheticScorer {
    labels: Vec<String>,
    confidence: f64,
}

impl SegmentScorer for SyntheticScorer {
    fn score(&self, _text: &str) -> Vec<LabelScore> {
        self.labels
            .iter()
            .map(|label| LabelScore {
                label: label.clone(),
                confidence: self.confidence,
            })
            .collect()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

struct SyntheticMatcher {
    hits: Vec<KeywordMatch>,
}

impl PhraseDetector for SyntheticMatcher {
    fn find_matches(&self, _text: &str) -> Vec<KeywordMatch> {
        self.hits.clone()
    }
}

/// Assemble a model set for one gate combination
fn models(confident: bool, keyword_hit: bool, pattern_registered: bool) -> ModelSet {
    let scorer = Arc::new(SyntheticScorer {
        labels: vec![LABEL.to_string()],
        confidence: if confident { 0.8 } else { 0.02 },
    });

    let matcher = Arc::new(SyntheticMatcher {
        hits: if keyword_hit {
            vec![KeywordMatch {
                label: LABEL.to_string(),
                matched_phrase: "aadhaar".to_string(),
            }]
        } else {
            Vec::new()
        },
    });

    // The registry either carries the label's pattern or only an unrelated one.
    let toml = if pattern_registered {
        r#"
[labels.AADHAAR_NUMBER]
pattern = '(?<!\d)(?:\d{4}[-\s]?){2}\d{4}(?!\d)'
keywords = ["aadhaar"]
"#
    } else {
        r#"
[labels.UNRELATED_LABEL]
pattern = '\bZZ\d{2}\b'
keywords = ["unrelated"]
"#
    };
    let patterns = Arc::new(PatternRegistry::from_toml(toml).unwrap());

    ModelSet::new(scorer, matcher, patterns)
}

#[test_case(false, false, false, 0; "none")]
#[test_case(true,  false, false, 0; "confidence only")]
#[test_case(false, true,  false, 0; "keyword only")]
#[test_case(false, false, true,  0; "pattern only")]
#[test_case(true,  true,  false, 0; "confidence and keyword")]
#[test_case(true,  false, true,  0; "confidence and pattern")]
#[test_case(false, true,  true,  0; "keyword and pattern")]
#[test_case(true,  true,  true,  1; "all three")]
fn finding_exists_iff_all_gates_pass(
    confident: bool,
    keyword_hit: bool,
    pattern_registered: bool,
    expected: usize,
) {
    let segment = Segment::new(0, "the value 1234 5678 9012 appears in this sentence");
    let models = models(confident, keyword_hit, pattern_registered);

    let findings = evaluate_segment(&segment, &models, THRESHOLD);
    assert_eq!(findings.len(), expected);

    if expected == 1 {
        let finding = &findings[0];
        assert_eq!(finding.label, LABEL);
        assert_eq!(finding.extracted_value, "1234 5678 9012");
        assert_eq!(finding.matched_keywords, vec!["aadhaar".to_string()]);
        assert_eq!(finding.confidence, 0.8);
    }
}

#[test]
fn gates_pass_but_no_pattern_hit_is_not_an_error() {
    // Pattern registered and gates (a)/(b) pass, but the text carries no value.
    let segment = Segment::new(0, "aadhaar mentioned with no digits at all");
    let models = models(true, true, true);

    let findings = evaluate_segment(&segment, &models, THRESHOLD);
    assert!(findings.is_empty());
}

#[test]
fn offsets_index_the_segment_not_the_document() {
    let segment = Segment::new(7, "prefix text then 1234 5678 9012 at the end");
    let models = models(true, true, true);

    let findings = evaluate_segment(&segment, &models, THRESHOLD);
    assert_eq!(findings.len(), 1);

    let finding = &findings[0];
    let chars: Vec<char> = segment.text.chars().collect();
    let slice: String = chars[finding.offset_start..finding.offset_end].iter().collect();
    assert_eq!(slice.trim(), finding.extracted_value);
    assert_eq!(finding.segment_index, 7);
}

#[test]
fn scorer_labels_without_keyword_support_never_leak() {
    // The scorer knows two labels; only one has keyword support in the text.
    let scorer = Arc::new(SyntheticScorer {
        labels: vec![LABEL.to_string(), "PAN_NUMBER".to_string()],
        confidence: 0.9,
    });
    let matcher = Arc::new(SyntheticMatcher {
        hits: vec![KeywordMatch {
            label: LABEL.to_string(),
            matched_phrase: "aadhaar".to_string(),
        }],
    });
    let patterns = Arc::new(PatternRegistry::default_patterns().unwrap());
    let models = ModelSet::new(scorer, matcher, patterns);

    let segment = Segment::new(0, "aadhaar 1234 5678 9012 and pan ABCDE1234F");
    let findings = evaluate_segment(&segment, &models, THRESHOLD);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].label, LABEL);
}
