//! Core data types for HRF regressor computation
//!
//! This module provides:
//! - [`ExperimentalCondition`]: onsets, durations and amplitudes of one condition
//! - [`GammaDifferenceParams`]: parameters of the difference-of-gammas response
//! - [`KernelPreset`]: the named SPM and Glover parameter sets
//! - [`HrfModel`]: the closed set of supported hemodynamic models

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// ============================================================================
// Experimental Condition
// ============================================================================

/// A single stimulus event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StimulusEvent {
    /// Onset time in seconds, relative to the time origin of the frame times
    pub onset: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Signed amplitude
    pub amplitude: f64,
}

impl StimulusEvent {
    /// Create a new event
    #[must_use]
    pub const fn new(onset: f64, duration: f64, amplitude: f64) -> Self {
        Self { onset, duration, amplitude }
    }
}

/// Events of one experimental condition, stored column-wise.
///
/// Index `i` of each sequence describes one event. Values are not validated:
/// negative durations or non-finite onsets pass through to the sampler, which
/// clamps every index into the high-resolution grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalCondition {
    onsets: Vec<f64>,
    durations: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl ExperimentalCondition {
    /// Build a condition from its three sequences.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnequalLengths`] if the sequences differ in length.
    pub fn new(onsets: Vec<f64>, durations: Vec<f64>, amplitudes: Vec<f64>) -> CoreResult<Self> {
        if onsets.len() != durations.len() || onsets.len() != amplitudes.len() {
            return Err(CoreError::UnequalLengths {
                onsets: onsets.len(),
                durations: durations.len(),
                amplitudes: amplitudes.len(),
            });
        }
        Ok(Self { onsets, durations, amplitudes })
    }

    /// Build a condition from individual events.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = StimulusEvent>,
    {
        let mut condition = Self { onsets: Vec::new(), durations: Vec::new(), amplitudes: Vec::new() };
        for event in events {
            condition.onsets.push(event.onset);
            condition.durations.push(event.duration);
            condition.amplitudes.push(event.amplitude);
        }
        condition
    }

    /// Number of events
    #[inline]
    pub fn len(&self) -> usize {
        self.onsets.len()
    }

    /// True when the condition holds no events
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.onsets.is_empty()
    }

    /// Event onsets (s)
    #[inline]
    pub fn onsets(&self) -> &[f64] {
        &self.onsets
    }

    /// Event durations (s)
    #[inline]
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Event amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Iterate over the events in order
    pub fn events(&self) -> impl Iterator<Item = StimulusEvent> + '_ {
        self.onsets
            .iter()
            .zip(&self.durations)
            .zip(&self.amplitudes)
            .map(|((&onset, &duration), &amplitude)| StimulusEvent::new(onset, duration, amplitude))
    }
}

// ============================================================================
// Gamma-difference response parameters
// ============================================================================

/// Parameters of a difference-of-gammas hemodynamic response.
///
/// The response is `pdf(peak) - ratio * pdf(undershoot)` where the peak
/// density has shape `delay / dispersion` and the undershoot density has shape
/// `undershoot / u_dispersion`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GammaDifferenceParams {
    /// Peak delay (s)
    pub delay: f64,
    /// Undershoot delay (s)
    pub undershoot: f64,
    /// Peak dispersion
    pub dispersion: f64,
    /// Undershoot dispersion
    pub u_dispersion: f64,
    /// Undershoot-to-peak ratio
    pub ratio: f64,
}

impl GammaDifferenceParams {
    /// Parameters of the SPM canonical HRF
    pub const SPM: Self = Self {
        delay: 6.0,
        undershoot: 16.0,
        dispersion: 1.0,
        u_dispersion: 1.0,
        ratio: 0.167,
    };

    /// Parameters of the Glover HRF
    pub const GLOVER: Self = Self {
        delay: 6.0,
        undershoot: 12.0,
        dispersion: 0.9,
        u_dispersion: 0.9,
        ratio: 0.35,
    };

    /// Same parameters with a different peak dispersion
    #[must_use]
    pub const fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = dispersion;
        self
    }
}

impl Default for GammaDifferenceParams {
    fn default() -> Self {
        Self::SPM
    }
}

/// Named response presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KernelPreset {
    /// SPM canonical response
    Spm,
    /// Glover response
    Glover,
}

impl KernelPreset {
    /// Gamma-difference parameters for this preset
    #[must_use]
    pub const fn params(self) -> GammaDifferenceParams {
        match self {
            Self::Spm => GammaDifferenceParams::SPM,
            Self::Glover => GammaDifferenceParams::GLOVER,
        }
    }
}

// ============================================================================
// HRF model
// ============================================================================

/// Hemodynamic model used to build the regressors of a condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum HrfModel {
    /// SPM response only
    Spm,
    /// SPM response and its time derivative
    SpmTime,
    /// SPM response, time derivative and dispersion derivative
    SpmTimeDispersion,
    /// Glover response only
    Canonical,
    /// Glover response and its time derivative
    CanonicalWithDerivative,
    /// Finite impulse response basis of delayed boxcars
    Fir {
        /// Delays, in scans
        delays: Vec<usize>,
    },
}

impl HrfModel {
    /// Parse one of the textual model identifiers.
    ///
    /// Accepted identifiers are `spm`, `spm_time`, `spm_time_dispersion`,
    /// `canonical`, `canonical with derivative` and `fir`. `fir_delays` is
    /// only consulted for `fir`.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnsupportedModel`] for unknown identifiers and
    /// [`CoreError::MissingFirDelays`] for `fir` without delays.
    pub fn from_identifier(identifier: &str, fir_delays: Option<&[usize]>) -> CoreResult<Self> {
        match identifier {
            "spm" => Ok(Self::Spm),
            "spm_time" => Ok(Self::SpmTime),
            "spm_time_dispersion" => Ok(Self::SpmTimeDispersion),
            "canonical" => Ok(Self::Canonical),
            "canonical with derivative" => Ok(Self::CanonicalWithDerivative),
            "fir" => fir_delays
                .map(|delays| Self::Fir { delays: delays.to_vec() })
                .ok_or(CoreError::MissingFirDelays),
            other => Err(CoreError::UnsupportedModel { identifier: other.to_string() }),
        }
    }

    /// Textual identifier of the model
    #[must_use]
    pub const fn identifier(&self) -> &'static str {
        match self {
            Self::Spm => "spm",
            Self::SpmTime => "spm_time",
            Self::SpmTimeDispersion => "spm_time_dispersion",
            Self::Canonical => "canonical",
            Self::CanonicalWithDerivative => "canonical with derivative",
            Self::Fir { .. } => "fir",
        }
    }

    /// Number of kernels, and therefore regressor columns, the model yields
    #[must_use]
    pub fn kernel_count(&self) -> usize {
        match self {
            Self::Spm | Self::Canonical => 1,
            Self::SpmTime | Self::CanonicalWithDerivative => 2,
            Self::SpmTimeDispersion => 3,
            Self::Fir { delays } => delays.len(),
        }
    }

    /// True for the FIR basis, whose columns are never orthogonalized
    #[must_use]
    pub const fn is_fir(&self) -> bool {
        matches!(self, Self::Fir { .. })
    }
}

impl fmt::Display for HrfModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

// ============================================================================
// Tests
// ============================================================================
