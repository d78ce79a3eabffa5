//! # ECGW Common Library
//!
//! Alert classification core for bedside ECG decision support:
//! - Alert level registry (severity scale, default actions)
//! - Heart rate, rhythm composition and RR variability classifiers
//! - Priority-based severity aggregation
//! - Recommendation and follow-up generation
//! - Segment analysis orchestration and batch summaries
//! - Configuration loading

pub mod aggregate;
pub mod alert_level;
pub mod analysis;
pub mod beat;
pub mod classify;
pub mod config;
pub mod error;
pub mod finding;
pub mod guidelines;
pub mod recommend;
pub mod summary;
pub mod time;

pub use alert_level::{registry, AlertLevel, AlertLevelRegistry};
pub use analysis::{analyze_segment, analyze_segment_with, SegmentAnalysis, SegmentInput};
pub use beat::BeatLabel;
pub use error::{Error, Result, ValidationError};
pub use finding::{Finding, FindingKind, FindingSource};
pub use summary::SummaryReport;
