//! Window, skin and mode commands.

use std::io::Write;

use xmmsctl_remote::{Remote, Window};

use crate::error::ClientResult;

pub fn window(remote: &mut impl Remote, window: Window, visible: bool) -> ClientResult<()> {
    remote.set_window_visible(window, visible)?;
    Ok(())
}

/// Prints the current skin, or loads `path`.
pub fn skin(
    remote: &mut impl Remote,
    path: Option<&str>,
    out: &mut impl Write,
) -> ClientResult<()> {
    match path {
        Some(path) => remote.set_skin(path)?,
        None => {
            let skin = remote.skin()?;
            if skin.is_empty() {
                writeln!(out, "(default skin)")?;
            } else {
                writeln!(out, "{skin}")?;
            }
        }
    }
    Ok(())
}

pub fn preferences(remote: &mut impl Remote) -> ClientResult<()> {
    remote.show_preferences()?;
    Ok(())
}

pub fn always_on_top(remote: &mut impl Remote, on_top: bool) -> ClientResult<()> {
    remote.set_always_on_top(on_top)?;
    Ok(())
}

/// Toggles repeat and prints the new mode.
pub fn repeat(remote: &mut impl Remote, out: &mut impl Write) -> ClientResult<()> {
    remote.toggle_repeat()?;
    writeln!(out, "repeat {}", on_off(remote.is_repeat()?))?;
    Ok(())
}

/// Toggles shuffle and prints the new mode.
pub fn shuffle(remote: &mut impl Remote, out: &mut impl Write) -> ClientResult<()> {
    remote.toggle_shuffle()?;
    writeln!(out, "shuffle {}", on_off(remote.is_shuffle()?))?;
    Ok(())
}

pub(crate) fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
