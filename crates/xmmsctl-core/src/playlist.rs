//! Playlist entries as reported by the daemon.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single playlist entry.
///
/// Entries are snapshots: the daemon owns the playlist and may change it at
/// any time between two calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Display title (usually "Artist - Title").
    pub title: String,
    /// File path or URL.
    pub file: String,
    /// Length in milliseconds, `-1` when unknown (streams).
    pub duration_ms: i32,
}

impl PlaylistEntry {
    /// Creates a new entry.
    pub fn new(title: impl Into<String>, file: impl Into<String>, duration_ms: i32) -> Self {
        Self {
            title: title.into(),
            file: file.into(),
            duration_ms,
        }
    }

    /// Length in whole seconds, rounded towards negative infinity.
    ///
    /// Unknown lengths (`-1`) stay negative, which is what `#EXTINF` expects.
    pub fn duration_secs(&self) -> i32 {
        self.duration_ms.div_euclid(1000)
    }

    /// Returns true if the daemon did not report a length.
    pub fn has_unknown_duration(&self) -> bool {
        self.duration_ms < 0
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}', {}, {}", self.title, self.duration_ms, self.file)
    }
}
