//! Daemon session handling.

use xmmsctl_remote::ConnectOptions;

use crate::error::{ClientError, ClientResult};

/// Connects to the daemon, runs `f` and disconnects on every path.
#[cfg(unix)]
pub fn with_remote<T, F>(options: &ConnectOptions, f: F) -> ClientResult<T>
where
    F: FnOnce(&mut xmmsctl_remote::XmmsRemote) -> ClientResult<T>,
{
    let mut remote =
        xmmsctl_remote::XmmsRemote::connect(options).map_err(ClientError::Connection)?;
    let result = f(&mut remote);
    remote.disconnect();
    result
}

/// The native client library is only available on unix.
#[cfg(not(unix))]
pub fn with_remote<T, F>(options: &ConnectOptions, _f: F) -> ClientResult<T>
where
    F: FnOnce(&mut xmmsctl_remote::MemoryRemote) -> ClientResult<T>,
{
    Err(ClientError::Connection(
        xmmsctl_remote::RemoteError::LibraryUnavailable {
            library: options
                .library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| xmmsctl_remote::DEFAULT_LIBRARY.to_string()),
            reason: "not supported on this platform".to_string(),
        },
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_a_connection_error() {
        let options = ConnectOptions::new(0).with_library("/nonexistent/libxmms.so.1");
        let err = with_remote(&options, |_| Ok(())).unwrap_err();
        assert!(matches!(err, ClientError::Connection(_)));
    }
}
