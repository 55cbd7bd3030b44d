//! Transport commands.

use std::io::Write;

use tracing::debug;
use xmmsctl_remote::Remote;

use crate::error::ClientResult;

/// A transport action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    Eject,
    Quit,
}

/// Sends `action` to the daemon.
///
/// Actions that change playback state report the resulting state.
pub fn transport(
    remote: &mut impl Remote,
    action: Transport,
    out: &mut impl Write,
) -> ClientResult<()> {
    debug!(?action, "transport");
    match action {
        Transport::Play => remote.play()?,
        Transport::Pause => remote.pause()?,
        Transport::PlayPause => remote.play_pause()?,
        Transport::Stop => remote.stop()?,
        Transport::Next => remote.next()?,
        Transport::Prev => remote.prev()?,
        Transport::Eject => return Ok(remote.eject()?),
        Transport::Quit => return Ok(remote.quit()?),
    }
    writeln!(out, "{}", state(remote)?)?;
    Ok(())
}

/// One word describing what the player is doing.
pub fn state(remote: &impl Remote) -> ClientResult<&'static str> {
    Ok(if remote.is_paused()? {
        "paused"
    } else if remote.is_playing()? {
        "playing"
    } else {
        "stopped"
    })
}
