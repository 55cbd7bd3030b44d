//! The [`Remote`] trait.
//!
//! A remote is the client side of a remote-control session with one daemon
//! instance. Every call is synchronous and blocking; the daemon owns all
//! state, so values returned here are snapshots.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use xmmsctl_core::{Equalizer, PlaylistEntry};

use crate::error::{RemoteError, RemoteResult};

/// Shared object opened when no library path is configured.
pub const DEFAULT_LIBRARY: &str = "libxmms.so.1";

/// How to reach the daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Daemon instance, 0 for the first running player.
    pub session: i32,
    /// Client library to open instead of [`DEFAULT_LIBRARY`].
    pub library: Option<PathBuf>,
}

impl ConnectOptions {
    /// Options for the given session number.
    pub fn new(session: i32) -> Self {
        Self {
            session,
            library: None,
        }
    }

    /// Builder method to set the library path.
    pub fn with_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.library = Some(library.into());
        self
    }
}

/// Player windows that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// Main player window.
    Main,
    /// Playlist editor.
    Playlist,
    /// Equalizer window.
    Equalizer,
}

impl Window {
    /// All windows.
    pub const ALL: [Self; 3] = [Self::Main, Self::Playlist, Self::Equalizer];

    /// Returns the window name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Playlist => "playlist",
            Self::Equalizer => "equalizer",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Window {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Self::Main),
            "playlist" | "pl" => Ok(Self::Playlist),
            "equalizer" | "eq" => Ok(Self::Equalizer),
            other => Err(RemoteError::InvalidArgument(format!(
                "unknown window '{other}'"
            ))),
        }
    }
}

/// Properties of the stream currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Bitrate in bits per second.
    pub bitrate: i32,
    /// Sample rate in Hz.
    pub frequency: i32,
    /// Channel count.
    pub channels: i32,
}

/// A remote-control session with the media daemon.
pub trait Remote {
    /// Daemon version as reported by the player.
    fn version(&self) -> RemoteResult<i32>;

    /// Whether the daemon answers on this session.
    fn is_running(&self) -> RemoteResult<bool>;

    // --- transport ---

    /// Start playback.
    fn play(&mut self) -> RemoteResult<()>;

    /// Pause playback.
    fn pause(&mut self) -> RemoteResult<()>;

    /// Toggle between playing and paused.
    fn play_pause(&mut self) -> RemoteResult<()>;

    /// Stop playback.
    fn stop(&mut self) -> RemoteResult<()>;

    /// Open the player's file dialog.
    fn eject(&mut self) -> RemoteResult<()>;

    /// Ask the daemon to exit.
    fn quit(&mut self) -> RemoteResult<()>;

    /// Whether a song is playing (paused counts as playing).
    fn is_playing(&self) -> RemoteResult<bool>;

    /// Whether playback is paused.
    fn is_paused(&self) -> RemoteResult<bool>;

    // --- playlist ---

    /// Number of playlist entries.
    fn playlist_len(&self) -> RemoteResult<usize>;

    /// The entry at `index`.
    fn entry(&self, index: usize) -> RemoteResult<PlaylistEntry>;

    /// The whole playlist, in order.
    fn playlist(&self) -> RemoteResult<Vec<PlaylistEntry>> {
        let len = self.playlist_len()?;
        (0..len).map(|i| self.entry(i)).collect()
    }

    /// Index of the current entry.
    fn position(&self) -> RemoteResult<usize>;

    /// Make `index` the current entry.
    fn set_position(&mut self, index: usize) -> RemoteResult<()>;

    /// Skip to the next entry.
    fn next(&mut self) -> RemoteResult<()>;

    /// Go back to the previous entry.
    fn prev(&mut self) -> RemoteResult<()>;

    /// Add files; when `enqueue` is false the playlist is replaced.
    fn add_files(&mut self, files: &[String], enqueue: bool) -> RemoteResult<()>;

    /// Append a URL or path.
    fn add_url(&mut self, url: &str) -> RemoteResult<()>;

    /// Insert a URL or path before `index`.
    fn insert_url(&mut self, url: &str, index: usize) -> RemoteResult<()>;

    /// Remove the entry at `index`.
    fn delete(&mut self, index: usize) -> RemoteResult<()>;

    /// Remove every entry.
    fn clear(&mut self) -> RemoteResult<()>;

    // --- time ---

    /// Position in the current song, in milliseconds.
    fn output_time(&self) -> RemoteResult<i32>;

    /// Seek within the current song.
    fn jump_to_time(&mut self, ms: i32) -> RemoteResult<()>;

    // --- mixer ---

    /// Main volume, `0..=100`.
    fn main_volume(&self) -> RemoteResult<i32>;

    /// Set the main volume.
    fn set_main_volume(&mut self, volume: i32) -> RemoteResult<()>;

    /// Left and right volume.
    fn stereo_volume(&self) -> RemoteResult<(i32, i32)>;

    /// Set left and right volume.
    fn set_stereo_volume(&mut self, left: i32, right: i32) -> RemoteResult<()>;

    /// Balance, `-100` (left) to `100` (right).
    fn balance(&self) -> RemoteResult<i32>;

    /// Set the balance.
    fn set_balance(&mut self, balance: i32) -> RemoteResult<()>;

    // --- equalizer ---

    /// Current equalizer settings.
    fn equalizer(&self) -> RemoteResult<Equalizer>;

    /// Replace preamp and all band gains.
    fn set_equalizer(&mut self, eq: &Equalizer) -> RemoteResult<()>;

    /// Preamp gain.
    fn preamp(&self) -> RemoteResult<f32>;

    /// Set the preamp gain.
    fn set_preamp(&mut self, preamp: f32) -> RemoteResult<()>;

    /// Gain of one band (`0..=9`).
    fn band(&self, band: usize) -> RemoteResult<f32>;

    /// Set the gain of one band (`0..=9`).
    fn set_band(&mut self, band: usize, value: f32) -> RemoteResult<()>;

    // --- interface ---

    /// Current skin path.
    fn skin(&self) -> RemoteResult<String>;

    /// Load a skin.
    fn set_skin(&mut self, skin: &str) -> RemoteResult<()>;

    /// Show or hide a window.
    fn set_window_visible(&mut self, window: Window, visible: bool) -> RemoteResult<()>;

    /// Whether a window is shown.
    fn is_window_visible(&self, window: Window) -> RemoteResult<bool>;

    /// Open the preferences dialog.
    fn show_preferences(&mut self) -> RemoteResult<()>;

    /// Keep the player above other windows.
    fn set_always_on_top(&mut self, on_top: bool) -> RemoteResult<()>;

    /// Toggle repeat mode.
    fn toggle_repeat(&mut self) -> RemoteResult<()>;

    /// Toggle shuffle mode.
    fn toggle_shuffle(&mut self) -> RemoteResult<()>;

    /// Whether repeat mode is on.
    fn is_repeat(&self) -> RemoteResult<bool>;

    /// Whether shuffle mode is on.
    fn is_shuffle(&self) -> RemoteResult<bool>;

    /// Properties of the current stream.
    fn info(&self) -> RemoteResult<StreamInfo>;
}
