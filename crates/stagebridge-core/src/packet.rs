//! Datagram header validation and parsing
//!
//! [`decode`] is a pure function over the input bytes: it validates the
//! marker, reads the four header fields in wire order, checks the declared
//! payload length against the remaining buffer, and hands back the header
//! plus a borrowed payload slice. The input buffer is never mutated.

use chrono::{DateTime, Utc};

use crate::error::{DecodeError, Result};
use crate::wire::{PacketType, HEADER_LEN, RB3E_MAGIC};

/// Parsed RB3E packet header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    /// Protocol version byte
    pub version: u8,
    /// Raw packet kind byte; see [`PacketHeader::packet_type`]
    pub kind: u8,
    /// Declared payload length
    pub payload_len: u8,
    /// Platform identifier byte
    pub platform: u8,
    /// Capture timestamp, attached at decode time
    pub received_at: DateTime<Utc>,
}

impl PacketHeader {
    /// Typed view of the kind byte; `None` for kinds this build doesn't know
    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_u8(self.kind)
    }
}

/// Validate and split a raw datagram into header and payload slice
pub fn decode(datagram: &[u8]) -> Result<(PacketHeader, &[u8])> {
    if datagram.len() < HEADER_LEN {
        return Err(DecodeError::TooShort {
            len: datagram.len(),
        });
    }

    if datagram[0..4] != RB3E_MAGIC {
        let mut found = [0u8; 4];
        found.copy_from_slice(&datagram[0..4]);
        return Err(DecodeError::BadMagic { found });
    }

    let version = datagram[4];
    let kind = datagram[5];
    let payload_len = datagram[6];
    let platform = datagram[7];

    let available = datagram.len() - HEADER_LEN;
    if available < payload_len as usize {
        return Err(DecodeError::TruncatedPayload {
            declared: payload_len as usize,
            available,
        });
    }

    let header = PacketHeader {
        version,
        kind,
        payload_len,
        platform,
        received_at: Utc::now(),
    };

    Ok((header, &datagram[HEADER_LEN..HEADER_LEN + payload_len as usize]))
}
