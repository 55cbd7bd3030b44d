//! Remote-control error types.

use thiserror::Error;
use xmmsctl_core::EqualizerError;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors raised by a remote-control session.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The client library could not be loaded.
    #[error("cannot load {library}: {reason}")]
    LibraryUnavailable { library: String, reason: String },

    /// The client library lacks an expected function.
    #[error("{library} does not export {symbol}")]
    MissingSymbol { library: String, symbol: String },

    /// No daemon answers on the requested session.
    #[error("XMMS is not running (session {session})")]
    NotRunning { session: i32 },

    /// The daemon has no playlist entry at this index.
    #[error("no playlist entry at index {index}")]
    NoSuchEntry { index: usize },

    /// Invalid equalizer band or gain.
    #[error(transparent)]
    Equalizer(#[from] EqualizerError),

    /// An argument cannot be passed to the daemon.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The daemon answered with something unusable.
    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Returns true if the session could not be established at all.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::LibraryUnavailable { .. } | Self::MissingSymbol { .. } | Self::NotRunning { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_classification() {
        assert!(RemoteError::NotRunning { session: 0 }.is_connection());
        assert!(
            RemoteError::LibraryUnavailable {
                library: "libxmms.so.1".into(),
                reason: "not found".into(),
            }
            .is_connection()
        );
        assert!(!RemoteError::NoSuchEntry { index: 4 }.is_connection());
        assert!(!RemoteError::Equalizer(EqualizerError::BandOutOfRange(12)).is_connection());
    }

    #[test]
    fn messages() {
        assert_eq!(
            RemoteError::NotRunning { session: 2 }.to_string(),
            "XMMS is not running (session 2)"
        );
        assert_eq!(
            RemoteError::from(EqualizerError::BandOutOfRange(10)).to_string(),
            "band out of range (band < 0 or band >= 10): 10"
        );
    }
}
