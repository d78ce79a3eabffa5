//! RR interval variability
//!
//! Dispersion is the population standard deviation of the intervals. This
//! classifier never asserts NORMAL: no finding means no variability signal.

use crate::alert_level::AlertLevel;
use crate::error::ValidationError;
use crate::finding::{Finding, FindingKind};

/// Standard deviation above this (seconds): Irregular Rhythm
pub const IRREGULAR_RR_STD_SECS: f64 = 0.2;
/// Fewer intervals than this carry no variability signal
pub const MIN_RR_INTERVALS: usize = 2;

/// Every interval must be finite and strictly positive
pub fn validate_rr_intervals(intervals: &[f64]) -> Result<(), ValidationError> {
    for (index, &value) in intervals.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteRrInterval { index });
        }
        if value <= 0.0 {
            return Err(ValidationError::NonPositiveRrInterval { index, value });
        }
    }
    Ok(())
}

/// Convert ascending beat sample indices into RR intervals (seconds)
///
/// Each interval is the difference between consecutive indices divided by
/// the sampling rate. Fewer than two indices yield no intervals.
pub fn rr_intervals_from_indices(
    indices: &[usize],
    sampling_rate_hz: f64,
) -> Result<Vec<f64>, ValidationError> {
    if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
        return Err(ValidationError::InvalidSamplingRate(sampling_rate_hz));
    }

    indices
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            if pair[1] <= pair[0] {
                return Err(ValidationError::UnorderedBeatIndices { index: i + 1 });
            }
            Ok((pair[1] - pair[0]) as f64 / sampling_rate_hz)
        })
        .collect()
}

/// Population standard deviation (divides by n); 0.0 for an empty slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Classify RR interval dispersion
///
/// Returns `None` with fewer than [`MIN_RR_INTERVALS`] intervals or when
/// dispersion is within range.
pub fn classify_rr_variability(intervals: &[f64]) -> Option<Finding> {
    if intervals.len() < MIN_RR_INTERVALS {
        return None;
    }

    let std_dev = population_std_dev(intervals);
    if std_dev > IRREGULAR_RR_STD_SECS {
        Some(Finding::new(
            FindingKind::IrregularRhythm,
            AlertLevel::Warning,
            format!("High RR variability: {:.3}s", std_dev),
            "May indicate atrial fibrillation",
        ))
    } else {
        None
    }
}
