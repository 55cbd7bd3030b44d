//! Equalizer sweep pattern.
//!
//! The sweep moves a sine wave across the ten bands, one phase step per
//! push, so the equalizer window visibly ripples. It is a manual check that
//! band writes reach the daemon, not a tuning tool.

use std::f64::consts::PI;
use std::time::Duration;

use crate::equalizer::NUM_BANDS;

/// Number of sweep pushes (steps `0..=40`).
pub const SWEEP_STEPS: u32 = 41;

/// Peak gain of the sine wave.
pub const SWEEP_AMPLITUDE: f64 = 20.0;

/// Pause between two pushes.
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(100);

/// Band gains for a given sweep step.
///
/// `band[i] = amplitude * sin((i * 1.1 + step) / 5 * PI)`
pub fn sweep_bands(step: u32) -> [f32; NUM_BANDS] {
    bands_with_amplitude(step, SWEEP_AMPLITUDE)
}

fn bands_with_amplitude(step: u32, amplitude: f64) -> [f32; NUM_BANDS] {
    let mut bands = [0.0f32; NUM_BANDS];
    for (i, band) in bands.iter_mut().enumerate() {
        let phase = (i as f64 * 1.1 + f64::from(step)) / 5.0 * PI;
        *band = (amplitude * phase.sin()) as f32;
    }
    bands
}

/// How a sweep is run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPlan {
    /// Number of pushes.
    pub steps: u32,
    /// Pause after each push.
    pub interval: Duration,
    /// Peak gain.
    pub amplitude: f64,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            steps: SWEEP_STEPS,
            interval: SWEEP_INTERVAL,
            amplitude: SWEEP_AMPLITUDE,
        }
    }
}

impl SweepPlan {
    /// Set the number of pushes.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Set the pause between pushes.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Band gains for `step` under this plan's amplitude.
    pub fn bands(&self, step: u32) -> [f32; NUM_BANDS] {
        bands_with_amplitude(step, self.amplitude)
    }

    /// Iterates over every step's band gains in push order.
    pub fn frames(&self) -> impl Iterator<Item = (u32, [f32; NUM_BANDS])> + '_ {
        (0..self.steps).map(|step| (step, self.bands(step)))
    }
}
