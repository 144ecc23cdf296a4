//! Error types for the network layer
use thiserror::Error;

/// Listener lifecycle and socket errors
#[derive(Error, Debug)]
pub enum NetError {
    /// start() called while the listener task is live
    #[error("listener is already running")]
    AlreadyRunning,

    /// stop() called with no listener task live
    #[error("listener is not running")]
    NotRunning,

    /// Socket-level failure (bind, recv)
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for network operations
pub type Result<T> = std::result::Result<T, NetError>;
