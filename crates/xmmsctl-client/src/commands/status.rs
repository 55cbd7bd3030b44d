//! Player status.

use std::io::Write;

use serde::Serialize;
use xmmsctl_core::PlaylistEntry;
use xmmsctl_remote::{Remote, StreamInfo};

use super::interface::on_off;
use super::player::state;
use crate::error::ClientResult;

/// Snapshot of the daemon's state.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub version: i32,
    pub state: &'static str,
    pub position: usize,
    pub playlist_len: usize,
    pub current: Option<PlaylistEntry>,
    pub output_time_ms: i32,
    pub volume: i32,
    pub balance: i32,
    pub repeat: bool,
    pub shuffle: bool,
    pub stream: StreamInfo,
}

impl Status {
    /// Queries everything from the daemon.
    pub fn fetch(remote: &impl Remote) -> ClientResult<Self> {
        let playlist_len = remote.playlist_len()?;
        let position = remote.position()?;
        let current = if position < playlist_len {
            Some(remote.entry(position)?)
        } else {
            None
        };

        Ok(Self {
            version: remote.version()?,
            state: state(remote)?,
            position,
            playlist_len,
            current,
            output_time_ms: remote.output_time()?,
            volume: remote.main_volume()?,
            balance: remote.balance()?,
            repeat: remote.is_repeat()?,
            shuffle: remote.is_shuffle()?,
            stream: remote.info()?,
        })
    }
}

/// Prints the status as text or JSON.
pub fn status(remote: &impl Remote, json: bool, out: &mut impl Write) -> ClientResult<()> {
    let status = Status::fetch(remote)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &status)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "XMMS version {:#x}, {}", status.version, status.state)?;
    match &status.current {
        Some(entry) => writeln!(
            out,
            "{}/{}: {} ({}/{} ms)",
            status.position + 1,
            status.playlist_len,
            entry.title,
            status.output_time_ms,
            entry.duration_ms
        )?,
        None => writeln!(out, "playlist empty")?,
    }
    writeln!(
        out,
        "volume {}, balance {}, repeat {}, shuffle {}",
        status.volume,
        status.balance,
        on_off(status.repeat),
        on_off(status.shuffle)
    )?;
    writeln!(
        out,
        "{} kbps, {} Hz, {} channel(s)",
        status.stream.bitrate / 1000,
        status.stream.frequency,
        status.stream.channels
    )?;
    Ok(())
}
