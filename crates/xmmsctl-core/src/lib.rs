//! Core types: playlist entries, equalizer settings, exporters, tracing

pub mod equalizer;
pub mod export;
pub mod playlist;
pub mod sweep;
pub mod tracing;

pub use equalizer::{
    BAND_MAX, BAND_MIN, Equalizer, EqualizerError, NUM_BANDS, VOLUME_MAX, VOLUME_MIN, check_band,
};
pub use export::{FormatParseError, PlaylistFormat, escape_xml, render};
pub use playlist::PlaylistEntry;
pub use sweep::{SWEEP_AMPLITUDE, SWEEP_INTERVAL, SWEEP_STEPS, SweepPlan, sweep_bands};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
