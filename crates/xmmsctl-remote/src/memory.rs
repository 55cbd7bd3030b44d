//! In-process remote.
//!
//! [`MemoryRemote`] keeps a small model of the player (playlist, transport,
//! mixer, equalizer) and records what was asked of it. Commands are tested
//! against it.

use xmmsctl_core::{Equalizer, PlaylistEntry, VOLUME_MAX, VOLUME_MIN, check_band};

use crate::error::{RemoteError, RemoteResult};
use crate::remote::{Remote, StreamInfo, Window};

/// Version reported by [`MemoryRemote`], as XMMS 1.2.x does.
const MEMORY_VERSION: i32 = 0x1_2_11;

/// A remote whose daemon lives in memory.
#[derive(Debug, Clone)]
pub struct MemoryRemote {
    running: bool,
    playing: bool,
    paused: bool,
    playlist: Vec<PlaylistEntry>,
    position: usize,
    output_time: i32,
    volume: (i32, i32),
    balance: i32,
    equalizer: Equalizer,
    equalizer_history: Vec<Equalizer>,
    fail_equalizer_after: Option<usize>,
    skin: String,
    windows: [bool; 3],
    always_on_top: bool,
    repeat: bool,
    shuffle: bool,
    info: StreamInfo,
    calls: Vec<String>,
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self {
            running: true,
            playing: false,
            paused: false,
            playlist: Vec::new(),
            position: 0,
            output_time: 0,
            volume: (VOLUME_MAX, VOLUME_MAX),
            balance: 0,
            equalizer: Equalizer::default(),
            equalizer_history: Vec::new(),
            fail_equalizer_after: None,
            skin: String::new(),
            windows: [true, false, false],
            always_on_top: false,
            repeat: false,
            shuffle: false,
            info: StreamInfo {
                bitrate: 128_000,
                frequency: 44_100,
                channels: 2,
            },
            calls: Vec::new(),
        }
    }
}

fn window_slot(window: Window) -> usize {
    match window {
        Window::Main => 0,
        Window::Playlist => 1,
        Window::Equalizer => 2,
    }
}

impl MemoryRemote {
    /// An empty, running player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the playlist.
    pub fn with_playlist(mut self, playlist: Vec<PlaylistEntry>) -> Self {
        self.playlist = playlist;
        self
    }

    /// Builder method to set the equalizer.
    pub fn with_equalizer(mut self, equalizer: Equalizer) -> Self {
        self.equalizer = equalizer;
        self
    }

    /// Builder method to make equalizer writes fail once `n` have succeeded.
    pub fn failing_equalizer_after(mut self, n: usize) -> Self {
        self.fail_equalizer_after = Some(n);
        self
    }

    /// Builder method for a player that does not answer.
    pub fn stopped(mut self) -> Self {
        self.running = false;
        self
    }

    /// Every equalizer written with [`Remote::set_equalizer`], oldest first.
    pub fn equalizer_history(&self) -> &[Equalizer] {
        &self.equalizer_history
    }

    /// Names of the commands received, oldest first.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    fn record(&mut self, call: impl Into<String>) {
        self.calls.push(call.into());
    }

    fn ensure_running(&self) -> RemoteResult<()> {
        if self.running {
            Ok(())
        } else {
            Err(RemoteError::NotRunning { session: 0 })
        }
    }

    fn step(&mut self, forward: bool) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        self.position = match (forward, self.position) {
            (true, p) if p + 1 < len => p + 1,
            (true, _) if self.repeat => 0,
            (false, 0) if self.repeat => len - 1,
            (false, p) => p.saturating_sub(1),
            (true, p) => p,
        };
        self.output_time = 0;
    }
}

impl Remote for MemoryRemote {
    fn version(&self) -> RemoteResult<i32> {
        self.ensure_running()?;
        Ok(MEMORY_VERSION)
    }

    fn is_running(&self) -> RemoteResult<bool> {
        Ok(self.running)
    }

    fn play(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("play");
        self.playing = true;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("pause");
        if self.playing {
            self.paused = !self.paused;
        }
        Ok(())
    }

    fn play_pause(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("play_pause");
        if self.playing {
            self.paused = !self.paused;
        } else {
            self.playing = true;
            self.paused = false;
        }
        Ok(())
    }

    fn stop(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("stop");
        self.playing = false;
        self.paused = false;
        self.output_time = 0;
        Ok(())
    }

    fn eject(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("eject");
        Ok(())
    }

    fn quit(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("quit");
        self.running = false;
        Ok(())
    }

    fn is_playing(&self) -> RemoteResult<bool> {
        self.ensure_running()?;
        Ok(self.playing)
    }

    fn is_paused(&self) -> RemoteResult<bool> {
        self.ensure_running()?;
        Ok(self.paused)
    }

    fn playlist_len(&self) -> RemoteResult<usize> {
        self.ensure_running()?;
        Ok(self.playlist.len())
    }

    fn entry(&self, index: usize) -> RemoteResult<PlaylistEntry> {
        self.ensure_running()?;
        self.playlist
            .get(index)
            .cloned()
            .ok_or(RemoteError::NoSuchEntry { index })
    }

    fn position(&self) -> RemoteResult<usize> {
        self.ensure_running()?;
        Ok(self.position)
    }

    fn set_position(&mut self, index: usize) -> RemoteResult<()> {
        self.ensure_running()?;
        if index >= self.playlist.len() {
            return Err(RemoteError::NoSuchEntry { index });
        }
        self.record(format!("set_position {index}"));
        self.position = index;
        self.output_time = 0;
        Ok(())
    }

    fn next(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("next");
        self.step(true);
        Ok(())
    }

    fn prev(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("prev");
        self.step(false);
        Ok(())
    }

    fn add_files(&mut self, files: &[String], enqueue: bool) -> RemoteResult<()> {
        self.ensure_running()?;
        if files.is_empty() {
            return Err(RemoteError::InvalidArgument("no files to add".to_string()));
        }
        self.record(format!("add_files {}", files.len()));
        if !enqueue {
            self.playlist.clear();
            self.position = 0;
        }
        self.playlist
            .extend(files.iter().map(|f| PlaylistEntry::new(f.as_str(), f.as_str(), -1)));
        Ok(())
    }

    fn add_url(&mut self, url: &str) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("add_url {url}"));
        self.playlist.push(PlaylistEntry::new(url, url, -1));
        Ok(())
    }

    fn insert_url(&mut self, url: &str, index: usize) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("insert_url {url} {index}"));
        let index = index.min(self.playlist.len());
        self.playlist.insert(index, PlaylistEntry::new(url, url, -1));
        Ok(())
    }

    fn delete(&mut self, index: usize) -> RemoteResult<()> {
        self.ensure_running()?;
        if index >= self.playlist.len() {
            return Err(RemoteError::NoSuchEntry { index });
        }
        self.record(format!("delete {index}"));
        self.playlist.remove(index);
        if self.position > index || self.position >= self.playlist.len() {
            self.position = self.position.saturating_sub(1);
        }
        Ok(())
    }

    fn clear(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("clear");
        self.playlist.clear();
        self.position = 0;
        Ok(())
    }

    fn output_time(&self) -> RemoteResult<i32> {
        self.ensure_running()?;
        Ok(self.output_time)
    }

    fn jump_to_time(&mut self, ms: i32) -> RemoteResult<()> {
        self.ensure_running()?;
        if ms < 0 {
            return Err(RemoteError::InvalidArgument(format!("negative time {ms}")));
        }
        self.record(format!("jump_to_time {ms}"));
        self.output_time = ms;
        Ok(())
    }

    fn main_volume(&self) -> RemoteResult<i32> {
        self.ensure_running()?;
        Ok(self.volume.0.max(self.volume.1))
    }

    fn set_main_volume(&mut self, volume: i32) -> RemoteResult<()> {
        self.ensure_running()?;
        let volume = volume.clamp(VOLUME_MIN, VOLUME_MAX);
        self.record(format!("set_main_volume {volume}"));
        self.volume = (volume, volume);
        Ok(())
    }

    fn stereo_volume(&self) -> RemoteResult<(i32, i32)> {
        self.ensure_running()?;
        Ok(self.volume)
    }

    fn set_stereo_volume(&mut self, left: i32, right: i32) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("set_stereo_volume {left} {right}"));
        self.volume = (
            left.clamp(VOLUME_MIN, VOLUME_MAX),
            right.clamp(VOLUME_MIN, VOLUME_MAX),
        );
        Ok(())
    }

    fn balance(&self) -> RemoteResult<i32> {
        self.ensure_running()?;
        Ok(self.balance)
    }

    fn set_balance(&mut self, balance: i32) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("set_balance {balance}"));
        self.balance = balance.clamp(-100, 100);
        Ok(())
    }

    fn equalizer(&self) -> RemoteResult<Equalizer> {
        self.ensure_running()?;
        Ok(self.equalizer)
    }

    fn set_equalizer(&mut self, eq: &Equalizer) -> RemoteResult<()> {
        self.ensure_running()?;
        if let Some(limit) = self.fail_equalizer_after {
            if self.equalizer_history.len() >= limit {
                self.fail_equalizer_after = None;
                return Err(RemoteError::Malformed("equalizer write rejected".to_string()));
            }
        }
        self.equalizer = *eq;
        self.equalizer_history.push(*eq);
        Ok(())
    }

    fn preamp(&self) -> RemoteResult<f32> {
        self.ensure_running()?;
        Ok(self.equalizer.preamp)
    }

    fn set_preamp(&mut self, preamp: f32) -> RemoteResult<()> {
        self.ensure_running()?;
        self.equalizer.preamp = preamp;
        Ok(())
    }

    fn band(&self, band: usize) -> RemoteResult<f32> {
        self.ensure_running()?;
        Ok(self.equalizer.bands[check_band(band)?])
    }

    fn set_band(&mut self, band: usize, value: f32) -> RemoteResult<()> {
        self.ensure_running()?;
        self.equalizer.bands[check_band(band)?] = value;
        Ok(())
    }

    fn skin(&self) -> RemoteResult<String> {
        self.ensure_running()?;
        Ok(self.skin.clone())
    }

    fn set_skin(&mut self, skin: &str) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("set_skin {skin}"));
        self.skin = skin.to_string();
        Ok(())
    }

    fn set_window_visible(&mut self, window: Window, visible: bool) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("set_window_visible {window} {visible}"));
        self.windows[window_slot(window)] = visible;
        Ok(())
    }

    fn is_window_visible(&self, window: Window) -> RemoteResult<bool> {
        self.ensure_running()?;
        Ok(self.windows[window_slot(window)])
    }

    fn show_preferences(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("show_preferences");
        Ok(())
    }

    fn set_always_on_top(&mut self, on_top: bool) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record(format!("set_always_on_top {on_top}"));
        self.always_on_top = on_top;
        Ok(())
    }

    fn toggle_repeat(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("toggle_repeat");
        self.repeat = !self.repeat;
        Ok(())
    }

    fn toggle_shuffle(&mut self) -> RemoteResult<()> {
        self.ensure_running()?;
        self.record("toggle_shuffle");
        self.shuffle = !self.shuffle;
        Ok(())
    }

    fn is_repeat(&self) -> RemoteResult<bool> {
        self.ensure_running()?;
        Ok(self.repeat)
    }

    fn is_shuffle(&self) -> RemoteResult<bool> {
        self.ensure_running()?;
        Ok(self.shuffle)
    }

    fn info(&self) -> RemoteResult<StreamInfo> {
        self.ensure_running()?;
        Ok(self.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_songs() -> Vec<PlaylistEntry> {
        vec![
            PlaylistEntry::new("One", "/1.mp3", 1000),
            PlaylistEntry::new("Two", "/2.mp3", 2000),
            PlaylistEntry::new("Three", "/3.mp3", 3000),
        ]
    }

    #[test]
    fn playlist_and_entries() {
        let remote = MemoryRemote::new().with_playlist(three_songs());
        assert_eq!(remote.playlist().unwrap(), three_songs());
        assert_eq!(remote.entry(1).unwrap().title, "Two");
        assert!(matches!(
            remote.entry(3),
            Err(RemoteError::NoSuchEntry { index: 3 })
        ));
    }

    #[test]
    fn transport_state() {
        let mut remote = MemoryRemote::new();
        remote.play().unwrap();
        assert!(remote.is_playing().unwrap());
        assert!(!remote.is_paused().unwrap());

        remote.play_pause().unwrap();
        assert!(remote.is_paused().unwrap());
        remote.play_pause().unwrap();
        assert!(!remote.is_paused().unwrap());

        remote.stop().unwrap();
        assert!(!remote.is_playing().unwrap());
        assert_eq!(remote.calls(), ["play", "play_pause", "play_pause", "stop"]);
    }

    #[test]
    fn next_and_prev_respect_bounds_and_repeat() {
        let mut remote = MemoryRemote::new().with_playlist(three_songs());
        remote.prev().unwrap();
        assert_eq!(remote.position().unwrap(), 0);

        remote.next().unwrap();
        remote.next().unwrap();
        remote.next().unwrap();
        assert_eq!(remote.position().unwrap(), 2);

        remote.toggle_repeat().unwrap();
        remote.next().unwrap();
        assert_eq!(remote.position().unwrap(), 0);
        remote.prev().unwrap();
        assert_eq!(remote.position().unwrap(), 2);
    }

    #[test]
    fn playlist_editing() {
        let mut remote = MemoryRemote::new().with_playlist(three_songs());
        remote.set_position(2).unwrap();
        remote.delete(0).unwrap();
        assert_eq!(remote.playlist_len().unwrap(), 2);
        assert_eq!(remote.position().unwrap(), 1);

        remote.insert_url("http://radio/", 0).unwrap();
        assert_eq!(remote.entry(0).unwrap().file, "http://radio/");

        remote
            .add_files(&["/x.mp3".to_string()], false)
            .unwrap();
        assert_eq!(remote.playlist_len().unwrap(), 1);

        assert!(remote.add_files(&[], true).is_err());
        remote.clear().unwrap();
        assert!(remote.playlist().unwrap().is_empty());
    }

    #[test]
    fn equalizer_history_and_failure() {
        let mut remote = MemoryRemote::new().failing_equalizer_after(1);
        let eq = Equalizer::new(1.0, [2.0; 10]);
        remote.set_equalizer(&eq).unwrap();
        assert!(remote.set_equalizer(&eq).is_err());
        remote.set_equalizer(&Equalizer::default()).unwrap();
        assert_eq!(remote.equalizer_history(), [eq, Equalizer::default()]);
    }

    #[test]
    fn band_access_is_checked() {
        let mut remote = MemoryRemote::new();
        remote.set_band(9, 3.5).unwrap();
        assert_eq!(remote.band(9).unwrap(), 3.5);
        assert!(matches!(
            remote.set_band(10, 1.0),
            Err(RemoteError::Equalizer(_))
        ));
    }

    #[test]
    fn stopped_player_refuses_calls() {
        let mut remote = MemoryRemote::new().stopped();
        assert!(!remote.is_running().unwrap());
        assert!(remote.play().unwrap_err().is_connection());
        assert!(remote.playlist().unwrap_err().is_connection());
    }

    #[test]
    fn volume_is_clamped() {
        let mut remote = MemoryRemote::new();
        remote.set_main_volume(150).unwrap();
        assert_eq!(remote.main_volume().unwrap(), 100);
        remote.set_stereo_volume(20, 40).unwrap();
        assert_eq!(remote.main_volume().unwrap(), 40);
        assert_eq!(remote.stereo_volume().unwrap(), (20, 40));
    }
}
