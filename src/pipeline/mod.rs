//! Scan pipeline: fan-out dispatch, aggregation, and the coordinator
//!
//! Control flow for one document: raw bytes → fallback extraction → full
//! text → segmentation → dispatch (one work item per segment, bounded pool,
//! single deadline) → per-segment results → positional aggregation.

pub mod aggregate;
pub mod dispatch;
pub mod scanner;

pub use dispatch::{DispatchConfig, SegmentDispatcher};
pub use scanner::DocumentScanner;
