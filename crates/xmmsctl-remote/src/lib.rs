//! Remote-control sessions for the XMMS daemon.
//!
//! [`Remote`] is the session abstraction every command works against.
//! [`XmmsRemote`] forwards each call to the native `libxmms` client library;
//! [`MemoryRemote`] keeps the player state in process.

pub mod error;
pub mod memory;
pub mod remote;

#[cfg(unix)]
mod ffi;
#[cfg(unix)]
pub mod xmms;

pub use error::{RemoteError, RemoteResult};
pub use memory::MemoryRemote;
pub use remote::{ConnectOptions, DEFAULT_LIBRARY, Remote, StreamInfo, Window};
#[cfg(unix)]
pub use xmms::XmmsRemote;
