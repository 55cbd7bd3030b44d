//! Native entry points of the XMMS client library.
//!
//! The functions are gathered in a [`Functions`] table. By default the table
//! is filled at runtime from a `dlopen`ed library; with the `system-libxmms`
//! feature it points at symbols linked at build time.

use std::ffi::{CStr, c_char, c_float, c_int, c_void};
#[cfg(not(feature = "system-libxmms"))]
use std::ffi::CString;
#[cfg(not(feature = "system-libxmms"))]
use std::ptr::NonNull;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{RemoteError, RemoteResult};
use crate::remote::DEFAULT_LIBRARY;

/// glib `gboolean`.
pub(crate) type GBoolean = c_int;

macro_rules! xmms_functions {
    ($( $name:ident ( $($arg:ty),* ) $(-> $ret:ty)? ; )*) => {
        /// Function pointers into the client library.
        pub(crate) struct Functions {
            $( pub(crate) $name: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )*
        }

        #[cfg(feature = "system-libxmms")]
        mod linked {
            use super::*;

            unsafe extern "C" {
                $( pub(super) fn $name($(_: $arg),*) $(-> $ret)?; )*
            }
        }

        impl Functions {
            #[cfg(feature = "system-libxmms")]
            fn linked() -> Self {
                Self {
                    $( $name: linked::$name, )*
                }
            }

            #[cfg(not(feature = "system-libxmms"))]
            fn resolve(library: &Library) -> RemoteResult<Self> {
                Ok(Self {
                    $( $name: {
                        let symbol = library.symbol(stringify!($name))?;
                        // SAFETY: the symbol was exported under this name by the
                        // client library, whose C prototype matches the field type.
                        unsafe {
                            std::mem::transmute::<*mut c_void, unsafe extern "C" fn($($arg),*) $(-> $ret)?>(symbol)
                        }
                    }, )*
                })
            }
        }
    };
}

xmms_functions! {
    xmms_remote_get_version(c_int) -> c_int;
    xmms_remote_is_running(c_int) -> GBoolean;

    xmms_remote_play(c_int);
    xmms_remote_pause(c_int);
    xmms_remote_play_pause(c_int);
    xmms_remote_stop(c_int);
    xmms_remote_eject(c_int);
    xmms_remote_quit(c_int);
    xmms_remote_is_playing(c_int) -> GBoolean;
    xmms_remote_is_paused(c_int) -> GBoolean;

    xmms_remote_get_playlist_length(c_int) -> c_int;
    xmms_remote_get_playlist_title(c_int, c_int) -> *mut c_char;
    xmms_remote_get_playlist_file(c_int, c_int) -> *mut c_char;
    xmms_remote_get_playlist_time(c_int, c_int) -> c_int;
    xmms_remote_get_playlist_pos(c_int) -> c_int;
    xmms_remote_set_playlist_pos(c_int, c_int);
    xmms_remote_playlist_next(c_int);
    xmms_remote_playlist_prev(c_int);
    xmms_remote_playlist(c_int, *mut *mut c_char, c_int, GBoolean);
    xmms_remote_playlist_add_url_string(c_int, *mut c_char);
    xmms_remote_playlist_ins_url_string(c_int, *mut c_char, c_int);
    xmms_remote_playlist_delete(c_int, c_int);
    xmms_remote_playlist_clear(c_int);

    xmms_remote_get_output_time(c_int) -> c_int;
    xmms_remote_jump_to_time(c_int, c_int);

    xmms_remote_get_main_volume(c_int) -> c_int;
    xmms_remote_set_main_volume(c_int, c_int);
    xmms_remote_get_volume(c_int, *mut c_int, *mut c_int);
    xmms_remote_set_volume(c_int, c_int, c_int);
    xmms_remote_get_balance(c_int) -> c_int;
    xmms_remote_set_balance(c_int, c_int);

    xmms_remote_get_eq(c_int, *mut c_float, *mut *mut c_float);
    xmms_remote_set_eq(c_int, c_float, *mut c_float);
    xmms_remote_get_eq_preamp(c_int) -> c_float;
    xmms_remote_set_eq_preamp(c_int, c_float);
    xmms_remote_get_eq_band(c_int, c_int) -> c_float;
    xmms_remote_set_eq_band(c_int, c_int, c_float);

    xmms_remote_get_skin(c_int) -> *mut c_char;
    xmms_remote_set_skin(c_int, *mut c_char);
    xmms_remote_main_win_toggle(c_int, GBoolean);
    xmms_remote_pl_win_toggle(c_int, GBoolean);
    xmms_remote_eq_win_toggle(c_int, GBoolean);
    xmms_remote_is_main_win(c_int) -> GBoolean;
    xmms_remote_is_pl_win(c_int) -> GBoolean;
    xmms_remote_is_eq_win(c_int) -> GBoolean;
    xmms_remote_show_prefs_box(c_int);
    xmms_remote_toggle_aot(c_int, GBoolean);
    xmms_remote_toggle_repeat(c_int);
    xmms_remote_toggle_shuffle(c_int);
    xmms_remote_is_repeat(c_int) -> GBoolean;
    xmms_remote_is_shuffle(c_int) -> GBoolean;
    xmms_remote_get_info(c_int, *mut c_int, *mut c_int, *mut c_int);

    g_free(*mut c_void);
}

impl Functions {
    /// Copies a string returned by the library and releases the original.
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a NUL-terminated string allocated by glib.
    pub(crate) unsafe fn take_string(&self, ptr: *mut c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        // SAFETY: non-null and NUL-terminated per the caller's contract.
        let text = unsafe { CStr::from_ptr(ptr) }
            .to_string_lossy()
            .into_owned();
        // SAFETY: allocated by glib, not used after this point.
        unsafe { (self.g_free)(ptr.cast()) };
        Some(text)
    }
}

/// Handle on a `dlopen`ed shared object, closed on drop.
#[cfg(not(feature = "system-libxmms"))]
pub(crate) struct Library {
    handle: NonNull<c_void>,
    name: String,
}

#[cfg(not(feature = "system-libxmms"))]
impl Library {
    /// Opens a shared object by file name or path.
    pub(crate) fn open(name: &str) -> RemoteResult<Self> {
        let c_name = CString::new(name).map_err(|_| {
            RemoteError::InvalidArgument(format!("library path contains NUL: {name:?}"))
        })?;

        // SAFETY: c_name is a valid NUL-terminated string.
        let handle = unsafe { libc::dlopen(c_name.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };

        match NonNull::new(handle) {
            Some(handle) => Ok(Self {
                handle,
                name: name.to_string(),
            }),
            None => Err(RemoteError::LibraryUnavailable {
                library: name.to_string(),
                reason: last_dl_error(),
            }),
        }
    }

    /// Looks up an exported symbol.
    pub(crate) fn symbol(&self, symbol: &str) -> RemoteResult<*mut c_void> {
        let missing = || RemoteError::MissingSymbol {
            library: self.name.clone(),
            symbol: symbol.to_string(),
        };
        let c_symbol = CString::new(symbol).map_err(|_| missing())?;

        // SAFETY: handle is open for the lifetime of self.
        let ptr = unsafe { libc::dlsym(self.handle.as_ptr(), c_symbol.as_ptr()) };
        if ptr.is_null() { Err(missing()) } else { Ok(ptr) }
    }
}

#[cfg(not(feature = "system-libxmms"))]
impl Drop for Library {
    fn drop(&mut self) {
        // SAFETY: handle came from dlopen and is closed exactly once.
        if unsafe { libc::dlclose(self.handle.as_ptr()) } != 0 {
            warn!(library = %self.name, error = %last_dl_error(), "dlclose failed");
        }
    }
}

#[cfg(not(feature = "system-libxmms"))]
fn last_dl_error() -> String {
    // SAFETY: dlerror returns null or a thread-local message.
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        "unknown dynamic loader error".to_string()
    } else {
        // SAFETY: non-null messages are NUL-terminated.
        unsafe { CStr::from_ptr(message) }
            .to_string_lossy()
            .into_owned()
    }
}

/// The function table plus whatever keeps it valid.
pub(crate) struct Binding {
    pub(crate) functions: Functions,
    pub(crate) name: String,
    #[cfg(not(feature = "system-libxmms"))]
    _library: Library,
}

impl Binding {
    /// Makes the client library available.
    #[cfg(not(feature = "system-libxmms"))]
    pub(crate) fn load(path: Option<&Path>) -> RemoteResult<Self> {
        let name = path
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_LIBRARY.to_string());

        debug!(library = %name, "opening client library");
        let library = Library::open(&name)?;
        let functions = Functions::resolve(&library)?;

        Ok(Self {
            functions,
            name,
            _library: library,
        })
    }

    /// Makes the client library available.
    #[cfg(feature = "system-libxmms")]
    pub(crate) fn load(path: Option<&Path>) -> RemoteResult<Self> {
        if let Some(path) = path {
            warn!(
                library = %path.display(),
                "built with system-libxmms, ignoring configured library path"
            );
        }
        Ok(Self {
            functions: Functions::linked(),
            name: "libxmms (linked)".to_string(),
        })
    }
}
