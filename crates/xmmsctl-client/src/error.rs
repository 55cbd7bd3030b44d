//! Client error types.

use std::path::PathBuf;

use thiserror::Error;
use xmmsctl_core::EqualizerError;
use xmmsctl_remote::RemoteError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The daemon could not be reached.
    #[error("connection error: {0}")]
    Connection(#[source] RemoteError),

    /// The daemon was reached but a call failed.
    #[error("remote call failed: {0}")]
    Remote(#[source] RemoteError),

    /// The output file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad command-line value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RemoteError> for ClientError {
    fn from(err: RemoteError) -> Self {
        if err.is_connection() {
            Self::Connection(err)
        } else {
            Self::Remote(err)
        }
    }
}

impl From<EqualizerError> for ClientError {
    fn from(err: EqualizerError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_are_split_by_kind() {
        let err = ClientError::from(RemoteError::NotRunning { session: 0 });
        assert!(matches!(err, ClientError::Connection(_)));
        assert_eq!(
            err.to_string(),
            "connection error: XMMS is not running (session 0)"
        );

        let err = ClientError::from(RemoteError::NoSuchEntry { index: 7 });
        assert!(matches!(err, ClientError::Remote(_)));
    }

    #[test]
    fn write_error_names_the_path() {
        let err = ClientError::Write {
            path: PathBuf::from("/ro/playlist.m3u"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("cannot write /ro/playlist.m3u: "));
    }
}
