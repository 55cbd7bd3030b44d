//! Equalizer settings and mixer limits.
//!
//! XMMS exposes a ten band equalizer plus a preamp. All gains share the same
//! range, `BAND_MIN..=BAND_MAX` decibels.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of equalizer bands.
pub const NUM_BANDS: usize = 10;

/// Lowest accepted gain.
pub const BAND_MIN: f32 = -20.0;

/// Highest accepted gain.
pub const BAND_MAX: f32 = 20.0;

/// Lowest main volume.
pub const VOLUME_MIN: i32 = 0;

/// Highest main volume.
pub const VOLUME_MAX: i32 = 100;

/// Errors raised when validating equalizer values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EqualizerError {
    /// Band index outside `0..NUM_BANDS`.
    #[error("band out of range (band < 0 or band >= 10): {0}")]
    BandOutOfRange(usize),

    /// A gain is outside `BAND_MIN..=BAND_MAX` or not a number.
    #[error("{name} gain {value} outside -20..=20")]
    GainOutOfRange { name: String, value: f32 },

    /// Wrong number of band values.
    #[error("expected 10 band values, got {0}")]
    BandCount(usize),
}

/// Checks that `band` is a legal band index.
pub fn check_band(band: usize) -> Result<usize, EqualizerError> {
    if band < NUM_BANDS {
        Ok(band)
    } else {
        Err(EqualizerError::BandOutOfRange(band))
    }
}

fn check_gain(name: impl Into<String>, value: f32) -> Result<(), EqualizerError> {
    if value.is_finite() && (BAND_MIN..=BAND_MAX).contains(&value) {
        Ok(())
    } else {
        Err(EqualizerError::GainOutOfRange {
            name: name.into(),
            value,
        })
    }
}

/// Equalizer snapshot: preamp plus one gain per band.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Equalizer {
    /// Preamp gain.
    pub preamp: f32,
    /// Band gains, lowest frequency first.
    pub bands: [f32; NUM_BANDS],
}

impl Equalizer {
    /// Creates an equalizer snapshot.
    pub fn new(preamp: f32, bands: [f32; NUM_BANDS]) -> Self {
        Self { preamp, bands }
    }

    /// Builds an equalizer from a slice of band values.
    pub fn from_slice(preamp: f32, bands: &[f32]) -> Result<Self, EqualizerError> {
        let bands: [f32; NUM_BANDS] = bands
            .try_into()
            .map_err(|_| EqualizerError::BandCount(bands.len()))?;
        Ok(Self { preamp, bands })
    }

    /// Returns a copy with the bands replaced, keeping the preamp.
    #[must_use]
    pub fn with_bands(mut self, bands: [f32; NUM_BANDS]) -> Self {
        self.bands = bands;
        self
    }

    /// Checks every gain against the accepted range.
    pub fn validate(&self) -> Result<(), EqualizerError> {
        check_gain("preamp", self.preamp)?;
        for (i, value) in self.bands.iter().enumerate() {
            check_gain(format!("band[{i}]"), *value)?;
        }
        Ok(())
    }
}

impl fmt::Display for Equalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preamp {:.1} |", self.preamp)?;
        for band in &self.bands {
            write!(f, " {band:.1}")?;
        }
        Ok(())
    }
}
