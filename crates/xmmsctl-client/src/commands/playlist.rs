//! Playlist commands.

use std::io::Write;

use xmmsctl_core::PlaylistEntry;
use xmmsctl_remote::Remote;

use crate::error::{ClientError, ClientResult};

/// Formats an entry's length as `m:ss`, or `--:--` when unknown.
fn format_duration(entry: &PlaylistEntry) -> String {
    if entry.has_unknown_duration() {
        return "--:--".to_string();
    }
    let secs = entry.duration_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn write_entry(
    out: &mut impl Write,
    index: usize,
    entry: &PlaylistEntry,
    current: bool,
) -> std::io::Result<()> {
    let marker = if current { '>' } else { ' ' };
    writeln!(
        out,
        "{marker}{index:>4}. {} [{}] {}",
        entry.title,
        format_duration(entry),
        entry.file
    )
}

/// Lists the playlist, marking the current entry.
pub fn list(remote: &impl Remote, json: bool, out: &mut impl Write) -> ClientResult<()> {
    let entries = remote.playlist()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(out, "Playlist is empty.")?;
        return Ok(());
    }
    let position = remote.position()?;
    for (i, entry) in entries.iter().enumerate() {
        write_entry(out, i, entry, i == position)?;
    }
    Ok(())
}

/// Prints one entry.
pub fn entry(remote: &impl Remote, index: usize, out: &mut impl Write) -> ClientResult<()> {
    let entry = remote.entry(index)?;
    writeln!(out, "{entry}")?;
    Ok(())
}

/// Adds files, replacing the playlist unless `enqueue` is set.
pub fn add(remote: &mut impl Remote, files: &[String], enqueue: bool) -> ClientResult<()> {
    if files.is_empty() {
        return Err(ClientError::InvalidArgument("no files given".to_string()));
    }
    remote.add_files(files, enqueue)?;
    Ok(())
}

/// Appends a URL.
pub fn add_url(remote: &mut impl Remote, url: &str) -> ClientResult<()> {
    remote.add_url(url)?;
    Ok(())
}

/// Inserts a URL before `index`.
pub fn insert_url(remote: &mut impl Remote, url: &str, index: usize) -> ClientResult<()> {
    remote.insert_url(url, index)?;
    Ok(())
}

/// Removes the entry at `index`.
pub fn delete(remote: &mut impl Remote, index: usize) -> ClientResult<()> {
    let len = remote.playlist_len()?;
    if index >= len {
        return Err(ClientError::InvalidArgument(format!(
            "index {index} out of range (playlist has {len} entries)"
        )));
    }
    remote.delete(index)?;
    Ok(())
}

pub fn clear(remote: &mut impl Remote) -> ClientResult<()> {
    remote.clear()?;
    Ok(())
}

/// Makes the entry at `index` current.
pub fn jump(remote: &mut impl Remote, index: usize) -> ClientResult<()> {
    let len = remote.playlist_len()?;
    if index >= len {
        return Err(ClientError::InvalidArgument(format!(
            "index {index} out of range (playlist has {len} entries)"
        )));
    }
    remote.set_position(index)?;
    Ok(())
}

/// Seeks within the current song.
pub fn seek(remote: &mut impl Remote, ms: i32) -> ClientResult<()> {
    if ms < 0 {
        return Err(ClientError::InvalidArgument(format!(
            "time must not be negative (got {ms})"
        )));
    }
    remote.jump_to_time(ms)?;
    Ok(())
}
