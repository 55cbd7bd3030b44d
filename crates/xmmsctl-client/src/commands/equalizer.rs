//! Equalizer commands.

use std::io::Write;
use std::thread;

use tracing::{debug, info, warn};
use xmmsctl_core::{Equalizer, SweepPlan, check_band};
use xmmsctl_remote::Remote;

use crate::error::ClientResult;

/// Prints preamp and band gains.
pub fn show(remote: &impl Remote, json: bool, out: &mut impl Write) -> ClientResult<()> {
    let eq = remote.equalizer()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &eq)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{eq}")?;
    }
    Ok(())
}

/// Replaces preamp and all bands at once.
pub fn set(remote: &mut impl Remote, preamp: f32, bands: &[f32]) -> ClientResult<()> {
    let eq = Equalizer::from_slice(preamp, bands)?;
    eq.validate()?;
    remote.set_equalizer(&eq)?;
    Ok(())
}

/// Prints the preamp, or sets it when `value` is given.
pub fn preamp(
    remote: &mut impl Remote,
    value: Option<f32>,
    out: &mut impl Write,
) -> ClientResult<()> {
    match value {
        None => writeln!(out, "{:.1}", remote.preamp()?)?,
        Some(value) => {
            Equalizer {
                preamp: value,
                ..Equalizer::default()
            }
            .validate()?;
            remote.set_preamp(value)?;
        }
    }
    Ok(())
}

/// Prints one band, or sets it when `value` is given.
pub fn band(
    remote: &mut impl Remote,
    band: usize,
    value: Option<f32>,
    out: &mut impl Write,
) -> ClientResult<()> {
    let band = check_band(band)?;
    match value {
        None => writeln!(out, "{:.1}", remote.band(band)?)?,
        Some(value) => {
            let mut bands = [0.0; xmmsctl_core::NUM_BANDS];
            bands[band] = value;
            Equalizer::default().with_bands(bands).validate()?;
            remote.set_band(band, value)?;
        }
    }
    Ok(())
}

/// Ripples a sine wave across the bands, then puts the original settings back.
///
/// The original preamp is kept for every push. The original equalizer is
/// restored even when a push fails; the push error is then returned.
pub fn sweep(remote: &mut impl Remote, plan: &SweepPlan) -> ClientResult<()> {
    let original = remote.equalizer()?;
    info!(steps = plan.steps, interval = ?plan.interval, "starting equalizer sweep");

    let result = push_frames(remote, plan, original);

    match remote.set_equalizer(&original) {
        Ok(()) => debug!(%original, "equalizer restored"),
        Err(e) => {
            warn!(error = %e, "failed to restore equalizer");
            result?;
            return Err(e.into());
        }
    }
    result
}

fn push_frames(
    remote: &mut impl Remote,
    plan: &SweepPlan,
    original: Equalizer,
) -> ClientResult<()> {
    for (step, bands) in plan.frames() {
        for (i, gain) in bands.iter().enumerate() {
            debug!(step, band = i, gain, "sweep");
        }
        remote.set_equalizer(&original.with_bands(bands))?;
        if !plan.interval.is_zero() {
            thread::sleep(plan.interval);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ClientError;
    use xmmsctl_core::{SWEEP_STEPS, sweep_bands};
    use xmmsctl_remote::MemoryRemote;

    fn original() -> Equalizer {
        Equalizer::new(3.0, [1.0, 2.0, 3.0, 4.0, 5.0, -5.0, -4.0, -3.0, -2.0, -1.0])
    }

    fn fast_plan() -> SweepPlan {
        SweepPlan::default().with_interval(Duration::ZERO)
    }

    #[test]
    fn sweep_pushes_every_step_then_restores() {
        let mut remote = MemoryRemote::new().with_equalizer(original());

        sweep(&mut remote, &fast_plan()).unwrap();

        let history = remote.equalizer_history();
        assert_eq!(history.len(), SWEEP_STEPS as usize + 1);
        assert_eq!(history[0], Equalizer::new(3.0, sweep_bands(0)));
        assert_eq!(history[40], Equalizer::new(3.0, sweep_bands(40)));
        assert!(history[..41].iter().all(|eq| eq.preamp == 3.0));
        assert_eq!(history[41], original());
        assert_eq!(remote.equalizer().unwrap(), original());
    }

    #[test]
    fn sweep_restores_after_failed_push() {
        let mut remote = MemoryRemote::new()
            .with_equalizer(original())
            .failing_equalizer_after(5);

        let err = sweep(&mut remote, &fast_plan()).unwrap_err();

        assert!(matches!(err, ClientError::Remote(_)));
        assert_eq!(remote.equalizer_history().len(), 6);
        assert_eq!(remote.equalizer().unwrap(), original());
    }

    #[test]
    fn sweep_honours_step_count() {
        let mut remote = MemoryRemote::new();
        sweep(&mut remote, &fast_plan().with_steps(3)).unwrap();
        assert_eq!(remote.equalizer_history().len(), 4);
    }

    #[test]
    fn set_validates_before_pushing() {
        let mut remote = MemoryRemote::new();

        let err = set(&mut remote, 0.0, &[0.0; 9]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));

        let err = set(&mut remote, 25.0, &[0.0; 10]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));
        assert!(remote.equalizer_history().is_empty());

        set(&mut remote, -1.5, &original().bands).unwrap();
        assert_eq!(
            remote.equalizer().unwrap(),
            Equalizer::new(-1.5, original().bands)
        );
    }

    #[test]
    fn show_text_and_json() {
        let remote = MemoryRemote::new().with_equalizer(original());

        let mut out = Vec::new();
        show(&remote, false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "preamp 3.0 | 1.0 2.0 3.0 4.0 5.0 -5.0 -4.0 -3.0 -2.0 -1.0\n"
        );

        let mut out = Vec::new();
        show(&remote, true, &mut out).unwrap();
        let parsed: Equalizer = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, original());
    }

    #[test]
    fn band_get_set_and_range() {
        let mut remote = MemoryRemote::new();

        band(&mut remote, 4, Some(-7.5), &mut Vec::new()).unwrap();
        let mut out = Vec::new();
        band(&mut remote, 4, None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "-7.5\n");

        let err = band(&mut remote, 10, None, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: band out of range (band < 0 or band >= 10): 10"
        );
        assert!(band(&mut remote, 0, Some(30.0), &mut Vec::new()).is_err());
    }

    #[test]
    fn preamp_get_set() {
        let mut remote = MemoryRemote::new();
        preamp(&mut remote, Some(6.0), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        preamp(&mut remote, None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "6.0\n");

        assert!(preamp(&mut remote, Some(f32::NAN), &mut Vec::new()).is_err());
    }
}
