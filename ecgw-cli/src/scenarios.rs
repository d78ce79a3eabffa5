//! Synthetic beat trains for demo scenarios
//!
//! Produces beat labels and beat sample indices only; there is no waveform
//! synthesis or peak detection here. Ectopic beats (V, S) arrive early by a
//! fixed fraction of the beat interval, the following beat stays on schedule.

use ecgw_common::{BeatLabel, SegmentInput, ValidationError};
use thiserror::Error;

/// Fraction of the nominal beat interval by which ectopic beats are premature
pub const PREMATURE_FRACTION: f64 = 0.3;

/// Lead-in and lead-out left free of beats at each end of a segment (seconds)
const EDGE_MARGIN_SECS: f64 = 0.5;

/// Longest segment a scenario will generate (seconds)
pub const MAX_DURATION_SECS: f64 = 3600.0;

/// Lowest sampling rate at which every scenario keeps beat indices distinct
pub const MIN_SAMPLING_RATE_HZ: f64 = 50.0;

/// Rejected generator parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("Segment duration must be finite, above {min}s and at most {max}s, got {value}")]
    InvalidDuration { value: f64, min: f64, max: f64 },

    #[error("Synthetic beat trains need a sampling rate of at least {min} Hz, got {value}")]
    SamplingRateTooLow { value: f64, min: f64 },
}

/// Demo scenario presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scenario {
    Normal,
    Bradycardia,
    Tachycardia,
    Arrhythmia,
    Critical,
}

impl Scenario {
    pub fn all_variants() -> &'static [Scenario] {
        &[
            Scenario::Normal,
            Scenario::Bradycardia,
            Scenario::Tachycardia,
            Scenario::Arrhythmia,
            Scenario::Critical,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::Bradycardia => "bradycardia",
            Scenario::Tachycardia => "tachycardia",
            Scenario::Arrhythmia => "arrhythmia",
            Scenario::Critical => "critical",
        }
    }

    pub fn heart_rate(&self) -> f64 {
        match self {
            Scenario::Normal => 75.0,
            Scenario::Bradycardia => 45.0,
            Scenario::Tachycardia => 125.0,
            Scenario::Arrhythmia => 80.0,
            Scenario::Critical => 35.0,
        }
    }

    /// Repeating label pattern; all-normal scenarios use `"N"`
    pub fn pattern(&self) -> &'static str {
        match self {
            Scenario::Arrhythmia => "NNVNNNVNSN",
            Scenario::Critical => "NVVNVNVVNV",
            _ => "N",
        }
    }

    /// Generate a beat train of `duration_secs` at `sampling_rate_hz`
    ///
    /// # Errors
    ///
    /// Durations that are not finite, leave no room between the edge
    /// margins, or exceed [`MAX_DURATION_SECS`]; sampling rates below
    /// [`MIN_SAMPLING_RATE_HZ`].
    pub fn generate(
        &self,
        duration_secs: f64,
        sampling_rate_hz: f64,
    ) -> Result<SyntheticSegment, ScenarioError> {
        let min_duration = 2.0 * EDGE_MARGIN_SECS;
        if !duration_secs.is_finite()
            || duration_secs <= min_duration
            || duration_secs > MAX_DURATION_SECS
        {
            return Err(ScenarioError::InvalidDuration {
                value: duration_secs,
                min: min_duration,
                max: MAX_DURATION_SECS,
            });
        }
        // Also rejects NaN
        if !(sampling_rate_hz >= MIN_SAMPLING_RATE_HZ) {
            return Err(ScenarioError::SamplingRateTooLow {
                value: sampling_rate_hz,
                min: MIN_SAMPLING_RATE_HZ,
            });
        }

        let heart_rate = self.heart_rate();
        let interval = 60.0 / heart_rate;
        // Patterns are ASCII label codes, known valid
        let pattern: Vec<BeatLabel> = self
            .pattern()
            .chars()
            .filter_map(BeatLabel::from_code)
            .collect();

        let mut labels = Vec::new();
        let mut beat_indices = Vec::new();
        let mut beat = 0usize;
        loop {
            let nominal = EDGE_MARGIN_SECS + beat as f64 * interval;
            if nominal >= duration_secs - EDGE_MARGIN_SECS {
                break;
            }
            let label = pattern[beat % pattern.len()];
            let time = match label {
                BeatLabel::V | BeatLabel::S => nominal - PREMATURE_FRACTION * interval,
                _ => nominal,
            };
            labels.push(label);
            beat_indices.push((time.max(0.0) * sampling_rate_hz).round() as usize);
            beat += 1;
        }

        Ok(SyntheticSegment {
            scenario: *self,
            heart_rate,
            labels,
            beat_indices,
            duration_secs,
            sampling_rate_hz,
        })
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Generated labels and beat positions for one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSegment {
    pub scenario: Scenario,
    pub heart_rate: f64,
    pub labels: Vec<BeatLabel>,
    /// Ascending beat sample indices
    pub beat_indices: Vec<usize>,
    pub duration_secs: f64,
    pub sampling_rate_hz: f64,
}

impl SyntheticSegment {
    pub fn sample_count(&self) -> usize {
        (self.duration_secs * self.sampling_rate_hz).round() as usize
    }

    /// Segment input with RR intervals derived from the beat indices
    pub fn to_input(&self) -> Result<SegmentInput, ValidationError> {
        SegmentInput::new(self.heart_rate, self.labels.clone())
            .with_patient_id(format!("SIM-{}", self.scenario.name().to_uppercase()))
            .with_beat_indices(&self.beat_indices, self.sampling_rate_hz)
    }
}
