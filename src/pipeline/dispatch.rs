//! Segment fan-out and fan-in
//!
//! Submits exactly one work item per segment to a bounded worker pool and
//! waits at a single join barrier with one deadline. Segment evaluations may
//! complete in any order; each result is tagged with its originating segment
//! index so aggregation order is independent of completion order.
//!
//! The barrier is all-or-nothing: if any evaluation has not returned when
//! the deadline fires, the whole dispatch fails and completed work is
//! discarded. Workers still running at expiry are left to finish as orphaned
//! side effects; forceful cancellation is deliberately not attempted.

use crate::analysis::{evaluate_segment, ModelSet};
use crate::domain::{ArgusError, DispatchTimeout, Finding, Result, Segment};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Worker pool configuration, injected at startup
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Number of segment evaluations allowed in flight at once
    pub workers: usize,

    /// Single deadline for the whole fan-in barrier
    pub deadline: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            deadline: Duration::from_secs(60),
        }
    }
}

/// Fans segments out to the worker pool and gathers results in order
pub struct SegmentDispatcher {
    config: DispatchConfig,
}

impl SegmentDispatcher {
    /// Creates a dispatcher with the given pool configuration
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Evaluate every segment against the shared models
    ///
    /// Returns per-segment finding lists indexed by segment index, or
    /// [`DispatchTimeout`] if the barrier expires first.
    pub async fn dispatch(
        &self,
        segments: Vec<Segment>,
        models: Arc<ModelSet>,
        threshold: f64,
    ) -> Result<Vec<Vec<Finding>>> {
        self.dispatch_with(segments, move |segment| {
            evaluate_segment(segment, &models, threshold)
        })
        .await
    }

    /// Same as [`dispatch`](Self::dispatch) with an explicit worker function
    ///
    /// The worker must be pure with respect to shared state; it runs on the
    /// blocking pool so CPU-heavy evaluations don't starve the runtime.
    pub async fn dispatch_with<F>(
        &self,
        segments: Vec<Segment>,
        worker: F,
    ) -> Result<Vec<Vec<Finding>>>
    where
        F: Fn(&Segment) -> Vec<Finding> + Send + Sync + 'static,
    {
        let total = segments.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let worker = Arc::new(worker);
        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let completed = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(total);
        for segment in segments {
            let worker = Arc::clone(&worker);
            let semaphore = Arc::clone(&semaphore);
            let completed = Arc::clone(&completed);
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let index = segment.index;
                let findings =
                    tokio::task::spawn_blocking(move || (*worker)(&segment))
                        .await
                        .map_err(|e| format!("segment {index} evaluation panicked: {e}"))?;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok::<(usize, Vec<Finding>), String>((index, findings))
            }));
        }

        let barrier = futures::future::join_all(handles);
        let joined = match tokio::time::timeout(self.config.deadline, barrier).await {
            Ok(joined) => joined,
            Err(_) => {
                let completed = completed.load(Ordering::SeqCst);
                tracing::warn!(
                    completed,
                    total,
                    deadline_ms = self.config.deadline.as_millis() as u64,
                    "Dispatch deadline expired; discarding completed work"
                );
                return Err(DispatchTimeout {
                    deadline: self.config.deadline,
                    completed,
                    total,
                }
                .into());
            }
        };

        let mut ordered: Vec<Vec<Finding>> = vec![Vec::new(); total];
        for join_result in joined {
            let (index, findings) = join_result
                .map_err(|e| ArgusError::Dispatch(format!("worker task failed: {e}")))?
                .map_err(ArgusError::Dispatch)?;
            let slot = ordered
                .get_mut(index)
                .ok_or_else(|| ArgusError::Dispatch(format!("segment index {index} out of range")))?;
            *slot = findings;
        }
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding_for(segment: &Segment) -> Finding {
        Finding {
            segment_index: segment.index,
            segment_text: segment.text.clone(),
            label: "PHONE_NUMBER".to_string(),
            matched_keywords: vec!["phone".to_string()],
            extracted_value: segment.text.clone(),
            offset_start: 0,
            offset_end: segment.text.chars().count(),
            confidence: 0.5,
        }
    }

    fn segments(n: usize) -> Vec<Segment> {
        (0..n).map(|i| Segment::new(i, format!("segment {i}"))).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_results_in_submission_order() {
        let dispatcher = SegmentDispatcher::new(DispatchConfig {
            workers: 4,
            deadline: Duration::from_secs(60),
        });

        // Earlier segments sleep longer, so completion order is reversed.
        let results = dispatcher
            .dispatch_with(segments(6), |segment| {
                std::thread::sleep(Duration::from_millis(60 - 10 * segment.index as u64));
                vec![finding_for(segment)]
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 6);
        for (index, findings) in results.iter().enumerate() {
            assert_eq!(findings.len(), 1);
            assert_eq!(findings[0].segment_index, index);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_timeout_is_all_or_nothing() {
        let dispatcher = SegmentDispatcher::new(DispatchConfig {
            workers: 2,
            deadline: Duration::from_millis(50),
        });

        // One straggler sleeps far past the deadline.
        let result = dispatcher
            .dispatch_with(segments(4), |segment| {
                if segment.index == 3 {
                    std::thread::sleep(Duration::from_millis(500));
                }
                vec![finding_for(segment)]
            })
            .await;

        match result {
            Err(ArgusError::Timeout(timeout)) => {
                assert_eq!(timeout.total, 4);
                assert!(timeout.completed < 4);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_dispatch_returns_empty() {
        let dispatcher = SegmentDispatcher::new(DispatchConfig::default());
        let results = dispatcher
            .dispatch_with(Vec::new(), |segment| vec![finding_for(segment)])
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pool_bound_is_respected() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let dispatcher = SegmentDispatcher::new(DispatchConfig {
            workers: 2,
            deadline: Duration::from_secs(60),
        });

        let in_flight_clone = Arc::clone(&in_flight);
        let peak_clone = Arc::clone(&peak);
        dispatcher
            .dispatch_with(segments(8), move |_segment| {
                let now = in_flight_clone.fetch_add(1, Ordering::SeqCst) + 1;
                peak_clone.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(20));
                in_flight_clone.fetch_sub(1, Ordering::SeqCst);
                Vec::new()
            })
            .await
            .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
