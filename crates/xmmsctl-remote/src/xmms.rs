//! Remote-control session backed by the native XMMS client library.

use std::ffi::{CString, c_char, c_float, c_int};
use std::ptr;

use tracing::{debug, trace};
use xmmsctl_core::{Equalizer, NUM_BANDS, PlaylistEntry, check_band};

use crate::error::{RemoteError, RemoteResult};
use crate::ffi::{Binding, GBoolean};
use crate::remote::{ConnectOptions, Remote, StreamInfo, Window};

fn to_index(index: usize) -> RemoteResult<c_int> {
    c_int::try_from(index)
        .map_err(|_| RemoteError::InvalidArgument(format!("index {index} is too large")))
}

fn to_cstring(value: &str) -> RemoteResult<CString> {
    CString::new(value)
        .map_err(|_| RemoteError::InvalidArgument(format!("string contains NUL: {value:?}")))
}

fn to_gboolean(value: bool) -> GBoolean {
    GBoolean::from(value)
}

/// A session with one running XMMS instance.
///
/// The session is established by [`XmmsRemote::connect`] and released by
/// [`XmmsRemote::disconnect`] or when the value is dropped.
pub struct XmmsRemote {
    binding: Binding,
    session: c_int,
}

impl XmmsRemote {
    /// Loads the client library and checks that the daemon answers.
    pub fn connect(options: &ConnectOptions) -> RemoteResult<Self> {
        let binding = Binding::load(options.library.as_deref())?;
        let remote = Self {
            binding,
            session: options.session,
        };

        if !remote.is_running()? {
            return Err(RemoteError::NotRunning {
                session: options.session,
            });
        }

        debug!(
            session = remote.session,
            library = %remote.binding.name,
            version = remote.version()?,
            "connected to XMMS"
        );
        Ok(remote)
    }

    /// Ends the session and releases the client library.
    pub fn disconnect(self) {
        debug!(session = self.session, "disconnecting from XMMS");
    }

    /// Runs a command that takes only the session number.
    fn command(&self, name: &str, f: unsafe extern "C" fn(c_int)) -> RemoteResult<()> {
        trace!(session = self.session, command = name, "remote call");
        // SAFETY: every session-only command accepts any session number.
        unsafe { f(self.session) };
        Ok(())
    }

    fn query_bool(&self, f: unsafe extern "C" fn(c_int) -> GBoolean) -> RemoteResult<bool> {
        // SAFETY: as for `command`.
        Ok(unsafe { f(self.session) } != 0)
    }

    fn query_int(&self, f: unsafe extern "C" fn(c_int) -> c_int) -> RemoteResult<i32> {
        // SAFETY: as for `command`.
        Ok(unsafe { f(self.session) })
    }

    fn entry_string(
        &self,
        index: usize,
        f: unsafe extern "C" fn(c_int, c_int) -> *mut c_char,
    ) -> RemoteResult<String> {
        let pos = to_index(index)?;
        // SAFETY: the library returns null or a glib-allocated string we now own.
        let text = unsafe {
            let raw = f(self.session, pos);
            self.binding.functions.take_string(raw)
        };
        text.ok_or(RemoteError::NoSuchEntry { index })
    }
}

impl Remote for XmmsRemote {
    fn version(&self) -> RemoteResult<i32> {
        self.query_int(self.binding.functions.xmms_remote_get_version)
    }

    fn is_running(&self) -> RemoteResult<bool> {
        self.query_bool(self.binding.functions.xmms_remote_is_running)
    }

    fn play(&mut self) -> RemoteResult<()> {
        self.command("play", self.binding.functions.xmms_remote_play)
    }

    fn pause(&mut self) -> RemoteResult<()> {
        self.command("pause", self.binding.functions.xmms_remote_pause)
    }

    fn play_pause(&mut self) -> RemoteResult<()> {
        self.command("play_pause", self.binding.functions.xmms_remote_play_pause)
    }

    fn stop(&mut self) -> RemoteResult<()> {
        self.command("stop", self.binding.functions.xmms_remote_stop)
    }

    fn eject(&mut self) -> RemoteResult<()> {
        self.command("eject", self.binding.functions.xmms_remote_eject)
    }

    fn quit(&mut self) -> RemoteResult<()> {
        self.command("quit", self.binding.functions.xmms_remote_quit)
    }

    fn is_playing(&self) -> RemoteResult<bool> {
        self.query_bool(self.binding.functions.xmms_remote_is_playing)
    }

    fn is_paused(&self) -> RemoteResult<bool> {
        self.query_bool(self.binding.functions.xmms_remote_is_paused)
    }

    fn playlist_len(&self) -> RemoteResult<usize> {
        let len = self.query_int(self.binding.functions.xmms_remote_get_playlist_length)?;
        usize::try_from(len)
            .map_err(|_| RemoteError::Malformed(format!("negative playlist length {len}")))
    }

    fn entry(&self, index: usize) -> RemoteResult<PlaylistEntry> {
        let fns = &self.binding.functions;
        let title = self.entry_string(index, fns.xmms_remote_get_playlist_title)?;
        let file = self.entry_string(index, fns.xmms_remote_get_playlist_file)?;
        let pos = to_index(index)?;
        // SAFETY: plain integer query.
        let duration_ms = unsafe { (fns.xmms_remote_get_playlist_time)(self.session, pos) };
        Ok(PlaylistEntry {
            title,
            file,
            duration_ms,
        })
    }

    fn playlist(&self) -> RemoteResult<Vec<PlaylistEntry>> {
        let len = self.playlist_len()?;
        debug!(session = self.session, len, "fetching playlist");
        (0..len).map(|i| self.entry(i)).collect()
    }

    fn position(&self) -> RemoteResult<usize> {
        let pos = self.query_int(self.binding.functions.xmms_remote_get_playlist_pos)?;
        usize::try_from(pos)
            .map_err(|_| RemoteError::Malformed(format!("negative playlist position {pos}")))
    }

    fn set_position(&mut self, index: usize) -> RemoteResult<()> {
        let pos = to_index(index)?;
        // SAFETY: plain integer arguments.
        unsafe { (self.binding.functions.xmms_remote_set_playlist_pos)(self.session, pos) };
        Ok(())
    }

    fn next(&mut self) -> RemoteResult<()> {
        self.command("next", self.binding.functions.xmms_remote_playlist_next)
    }

    fn prev(&mut self) -> RemoteResult<()> {
        self.command("prev", self.binding.functions.xmms_remote_playlist_prev)
    }

    fn add_files(&mut self, files: &[String], enqueue: bool) -> RemoteResult<()> {
        if files.is_empty() {
            return Err(RemoteError::InvalidArgument("no files to add".to_string()));
        }
        let owned = files
            .iter()
            .map(|f| to_cstring(f))
            .collect::<RemoteResult<Vec<_>>>()?;
        let mut list: Vec<*mut c_char> = owned.iter().map(|s| s.as_ptr().cast_mut()).collect();
        let count = to_index(list.len())?;

        debug!(session = self.session, count, enqueue, "adding files");
        // SAFETY: `list` points at `count` strings kept alive by `owned`; the
        // library only reads them.
        unsafe {
            (self.binding.functions.xmms_remote_playlist)(
                self.session,
                list.as_mut_ptr(),
                count,
                to_gboolean(enqueue),
            )
        };
        Ok(())
    }

    fn add_url(&mut self, url: &str) -> RemoteResult<()> {
        let url = to_cstring(url)?;
        // SAFETY: the library copies the string before returning.
        unsafe {
            (self.binding.functions.xmms_remote_playlist_add_url_string)(
                self.session,
                url.as_ptr().cast_mut(),
            )
        };
        Ok(())
    }

    fn insert_url(&mut self, url: &str, index: usize) -> RemoteResult<()> {
        let url = to_cstring(url)?;
        let pos = to_index(index)?;
        // SAFETY: as for `add_url`.
        unsafe {
            (self.binding.functions.xmms_remote_playlist_ins_url_string)(
                self.session,
                url.as_ptr().cast_mut(),
                pos,
            )
        };
        Ok(())
    }

    fn delete(&mut self, index: usize) -> RemoteResult<()> {
        let pos = to_index(index)?;
        // SAFETY: plain integer arguments.
        unsafe { (self.binding.functions.xmms_remote_playlist_delete)(self.session, pos) };
        Ok(())
    }

    fn clear(&mut self) -> RemoteResult<()> {
        self.command("clear", self.binding.functions.xmms_remote_playlist_clear)
    }

    fn output_time(&self) -> RemoteResult<i32> {
        self.query_int(self.binding.functions.xmms_remote_get_output_time)
    }

    fn jump_to_time(&mut self, ms: i32) -> RemoteResult<()> {
        if ms < 0 {
            return Err(RemoteError::InvalidArgument(format!("negative time {ms}")));
        }
        // SAFETY: plain integer arguments.
        unsafe { (self.binding.functions.xmms_remote_jump_to_time)(self.session, ms) };
        Ok(())
    }

    fn main_volume(&self) -> RemoteResult<i32> {
        self.query_int(self.binding.functions.xmms_remote_get_main_volume)
    }

    fn set_main_volume(&mut self, volume: i32) -> RemoteResult<()> {
        // SAFETY: plain integer arguments.
        unsafe { (self.binding.functions.xmms_remote_set_main_volume)(self.session, volume) };
        Ok(())
    }

    fn stereo_volume(&self) -> RemoteResult<(i32, i32)> {
        let (mut left, mut right): (c_int, c_int) = (0, 0);
        // SAFETY: both out-pointers are valid for writes.
        unsafe {
            (self.binding.functions.xmms_remote_get_volume)(self.session, &mut left, &mut right)
        };
        Ok((left, right))
    }

    fn set_stereo_volume(&mut self, left: i32, right: i32) -> RemoteResult<()> {
        // SAFETY: plain integer arguments.
        unsafe { (self.binding.functions.xmms_remote_set_volume)(self.session, left, right) };
        Ok(())
    }

    fn balance(&self) -> RemoteResult<i32> {
        self.query_int(self.binding.functions.xmms_remote_get_balance)
    }

    fn set_balance(&mut self, balance: i32) -> RemoteResult<()> {
        // SAFETY: plain integer arguments.
        unsafe { (self.binding.functions.xmms_remote_set_balance)(self.session, balance) };
        Ok(())
    }

    fn equalizer(&self) -> RemoteResult<Equalizer> {
        let fns = &self.binding.functions;
        let mut preamp: c_float = 0.0;
        let mut raw: *mut c_float = ptr::null_mut();

        // SAFETY: both out-pointers are valid for writes.
        unsafe { (fns.xmms_remote_get_eq)(self.session, &mut preamp, &mut raw) };
        if raw.is_null() {
            return Err(RemoteError::Malformed("no equalizer bands returned".to_string()));
        }

        let mut bands = [0.0f32; NUM_BANDS];
        // SAFETY: the daemon always sends NUM_BANDS floats, allocated with
        // glib and owned by us from here on.
        unsafe {
            bands.copy_from_slice(std::slice::from_raw_parts(raw, NUM_BANDS));
            (fns.g_free)(raw.cast());
        }

        Ok(Equalizer::new(preamp, bands))
    }

    fn set_equalizer(&mut self, eq: &Equalizer) -> RemoteResult<()> {
        let mut bands = eq.bands;
        trace!(session = self.session, preamp = eq.preamp, ?bands, "set equalizer");
        // SAFETY: `bands` holds NUM_BANDS floats; the library only reads them.
        unsafe {
            (self.binding.functions.xmms_remote_set_eq)(self.session, eq.preamp, bands.as_mut_ptr())
        };
        Ok(())
    }

    fn preamp(&self) -> RemoteResult<f32> {
        // SAFETY: plain query.
        Ok(unsafe { (self.binding.functions.xmms_remote_get_eq_preamp)(self.session) })
    }

    fn set_preamp(&mut self, preamp: f32) -> RemoteResult<()> {
        // SAFETY: plain arguments.
        unsafe { (self.binding.functions.xmms_remote_set_eq_preamp)(self.session, preamp) };
        Ok(())
    }

    fn band(&self, band: usize) -> RemoteResult<f32> {
        let band = to_index(check_band(band)?)?;
        // SAFETY: band index checked above.
        Ok(unsafe { (self.binding.functions.xmms_remote_get_eq_band)(self.session, band) })
    }

    fn set_band(&mut self, band: usize, value: f32) -> RemoteResult<()> {
        let band = to_index(check_band(band)?)?;
        // SAFETY: band index checked above.
        unsafe { (self.binding.functions.xmms_remote_set_eq_band)(self.session, band, value) };
        Ok(())
    }

    fn skin(&self) -> RemoteResult<String> {
        // SAFETY: null or a glib-allocated string we now own.
        let skin = unsafe {
            let raw = (self.binding.functions.xmms_remote_get_skin)(self.session);
            self.binding.functions.take_string(raw)
        };
        skin.ok_or_else(|| RemoteError::Malformed("no skin returned".to_string()))
    }

    fn set_skin(&mut self, skin: &str) -> RemoteResult<()> {
        let skin = to_cstring(skin)?;
        // SAFETY: the library copies the string before returning.
        unsafe {
            (self.binding.functions.xmms_remote_set_skin)(self.session, skin.as_ptr().cast_mut())
        };
        Ok(())
    }

    fn set_window_visible(&mut self, window: Window, visible: bool) -> RemoteResult<()> {
        let fns = &self.binding.functions;
        let toggle = match window {
            Window::Main => fns.xmms_remote_main_win_toggle,
            Window::Playlist => fns.xmms_remote_pl_win_toggle,
            Window::Equalizer => fns.xmms_remote_eq_win_toggle,
        };
        // SAFETY: plain arguments.
        unsafe { toggle(self.session, to_gboolean(visible)) };
        Ok(())
    }

    fn is_window_visible(&self, window: Window) -> RemoteResult<bool> {
        let fns = &self.binding.functions;
        self.query_bool(match window {
            Window::Main => fns.xmms_remote_is_main_win,
            Window::Playlist => fns.xmms_remote_is_pl_win,
            Window::Equalizer => fns.xmms_remote_is_eq_win,
        })
    }

    fn show_preferences(&mut self) -> RemoteResult<()> {
        self.command("show_prefs_box", self.binding.functions.xmms_remote_show_prefs_box)
    }

    fn set_always_on_top(&mut self, on_top: bool) -> RemoteResult<()> {
        // SAFETY: plain arguments.
        unsafe { (self.binding.functions.xmms_remote_toggle_aot)(self.session, to_gboolean(on_top)) };
        Ok(())
    }

    fn toggle_repeat(&mut self) -> RemoteResult<()> {
        self.command("toggle_repeat", self.binding.functions.xmms_remote_toggle_repeat)
    }

    fn toggle_shuffle(&mut self) -> RemoteResult<()> {
        self.command("toggle_shuffle", self.binding.functions.xmms_remote_toggle_shuffle)
    }

    fn is_repeat(&self) -> RemoteResult<bool> {
        self.query_bool(self.binding.functions.xmms_remote_is_repeat)
    }

    fn is_shuffle(&self) -> RemoteResult<bool> {
        self.query_bool(self.binding.functions.xmms_remote_is_shuffle)
    }

    fn info(&self) -> RemoteResult<StreamInfo> {
        let mut info = StreamInfo::default();
        // SAFETY: all three out-pointers are valid for writes.
        unsafe {
            (self.binding.functions.xmms_remote_get_info)(
                self.session,
                &mut info.bitrate,
                &mut info.frequency,
                &mut info.channels,
            )
        };
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_conversion() {
        assert_eq!(to_index(5).unwrap(), 5);
        assert!(matches!(
            to_index(usize::MAX),
            Err(RemoteError::InvalidArgument(_))
        ));
    }

    #[test]
    fn cstring_rejects_interior_nul() {
        assert!(to_cstring("/music/a.mp3").is_ok());
        assert!(matches!(
            to_cstring("bad\0name"),
            Err(RemoteError::InvalidArgument(_))
        ));
    }

    #[cfg(not(feature = "system-libxmms"))]
    #[test]
    fn connect_without_library_is_a_connection_error() {
        let options = ConnectOptions::new(0).with_library("/nonexistent/libxmms.so.1");
        let err = XmmsRemote::connect(&options)
            .err()
            .expect("library does not exist");
        assert!(err.is_connection());
    }
}
