//! Result aggregation
//!
//! Merges per-segment finding lists into one ordered result set. Ordering is
//! purely positional: segment submission order, then pattern-match order
//! within a segment. No cross-segment deduplication and no re-sorting by
//! confidence or label is performed; a value repeated across segments is
//! reported once per segment it appears in.

use crate::domain::Finding;

/// Concatenate per-segment finding lists in segment-submission order
///
/// The total finding count is the sum of per-segment counts; an all-empty
/// input yields an empty list, not an error.
pub fn merge(per_segment: Vec<Vec<Finding>>) -> Vec<Finding> {
    per_segment.into_iter().flatten().collect()
}
