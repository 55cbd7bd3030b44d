//! Volume and balance.

use std::io::Write;

use xmmsctl_core::{VOLUME_MAX, VOLUME_MIN};
use xmmsctl_remote::Remote;

use crate::error::{ClientError, ClientResult};

/// Prints the main volume, or sets it when `value` is given.
pub fn volume(
    remote: &mut impl Remote,
    value: Option<i32>,
    out: &mut impl Write,
) -> ClientResult<()> {
    match value {
        None => {
            let (left, right) = remote.stereo_volume()?;
            if left == right {
                writeln!(out, "{left}")?;
            } else {
                writeln!(out, "{} (left {left}, right {right})", remote.main_volume()?)?;
            }
        }
        Some(v) if !(VOLUME_MIN..=VOLUME_MAX).contains(&v) => {
            return Err(ClientError::InvalidArgument(format!(
                "volume must be between {VOLUME_MIN} and {VOLUME_MAX} (got {v})"
            )));
        }
        Some(v) => remote.set_main_volume(v)?,
    }
    Ok(())
}

/// Prints the balance, or sets it when `value` is given.
pub fn balance(
    remote: &mut impl Remote,
    value: Option<i32>,
    out: &mut impl Write,
) -> ClientResult<()> {
    match value {
        None => writeln!(out, "{}", remote.balance()?)?,
        Some(v) if !(-100..=100).contains(&v) => {
            return Err(ClientError::InvalidArgument(format!(
                "balance must be between -100 and 100 (got {v})"
            )));
        }
        Some(v) => remote.set_balance(v)?,
    }
    Ok(())
}
