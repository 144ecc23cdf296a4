//! Error types for the telemetry decode pipeline
use thiserror::Error;

/// Datagram decode errors
///
/// None of these are fatal: the offending datagram is dropped, a diagnostic
/// is logged, and processing resumes with the next datagram. An unknown
/// packet type or an unmapped cue byte is NOT an error (forward-compatibility
/// tolerance) and is handled inline by the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Datagram shorter than the 8-byte header
    #[error("datagram too short: {len} bytes (need at least 8)")]
    TooShort { len: usize },

    /// First four bytes are not the RB3E marker
    #[error("bad magic: {found:02X?}")]
    BadMagic { found: [u8; 4] },

    /// Declared payload length exceeds the remaining buffer
    #[error("truncated payload: header declares {declared} bytes, {available} available")]
    TruncatedPayload { declared: usize, available: usize },

    /// A typed payload was shorter than its fixed structure requires
    #[error("short {kind} payload: need {needed} bytes, got {got}")]
    ShortPayload {
        kind: &'static str,
        needed: usize,
        got: usize,
    },
}

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;
