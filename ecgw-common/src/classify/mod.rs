//! Independent segment classifiers
//!
//! Each classifier is a pure function of its own input and returns at most
//! one [`Finding`](crate::finding::Finding). None of them logs or holds state.

pub mod heart_rate;
pub mod rhythm;
pub mod rr_variability;

pub use heart_rate::{classify_heart_rate, validate_heart_rate};
pub use rhythm::{classify_rhythm, BeatComposition};
pub use rr_variability::{
    classify_rr_variability, population_std_dev, rr_intervals_from_indices, validate_rr_intervals,
};
