//! Playlist export.

use std::io::Write;
use std::path::Path;

use tracing::info;
use xmmsctl_core::{PlaylistFormat, render};
use xmmsctl_remote::Remote;

use crate::error::ClientResult;
use crate::output::write_atomic;

/// Renders the daemon's playlist as `format`.
///
/// Without a destination the document goes to `out`; otherwise it is written
/// atomically to `dest`.
pub fn export(
    remote: &impl Remote,
    format: PlaylistFormat,
    dest: Option<&Path>,
    out: &mut impl Write,
) -> ClientResult<()> {
    let entries = remote.playlist()?;
    let text = render(format, &entries);

    match dest {
        None => {
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
        }
        Some(path) => {
            writeln!(out, "Saving playlist to \"{}\".", path.display())?;
            write_atomic(path, &text)?;
            info!(%format, entries = entries.len(), path = %path.display(), "playlist exported");
        }
    }
    Ok(())
}
