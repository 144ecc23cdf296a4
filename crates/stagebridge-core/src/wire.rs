//! RB3E wire format constants
//!
//! Pure data contract for the UDP telemetry protocol: packet kinds, the
//! header layout, and the stagekit right-channel code points. No behavior
//! lives here beyond byte-to-enum conversion.
//!
//! Header layout (all integers unsigned, multi-byte fields little-endian):
//!
//! ```text
//! offset 0..3   : magic = "RB3E"
//! offset 4      : protocol version (u8)
//! offset 5      : packet type (u8)
//! offset 6      : payload length N (u8, 0..255)
//! offset 7      : platform id (u8)
//! offset 8..8+N : payload (N bytes)
//! ```

use serde::{Deserialize, Serialize};

/// 4-byte packet marker, always first on the wire
pub const RB3E_MAGIC: [u8; 4] = *b"RB3E";

/// Fixed header size: magic plus four single-byte fields
pub const HEADER_LEN: usize = 8;

/// UDP port the game engine broadcasts telemetry on
pub const DEFAULT_PORT: u16 = 21070;

/// Packet kinds carried in header byte 5
///
/// The protocol is expected to grow; bytes outside this table are tolerated
/// and ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PacketType {
    /// Keep-alive, payload is a free-form string
    Alive = 0,
    /// Game state, 1 byte: 0 = menus, otherwise in game
    State = 1,
    /// Song title string
    SongName = 2,
    /// Song artist string
    SongArtist = 3,
    /// Song internal short name string
    SongShortName = 4,
    /// Score struct: i32 total, 4x i32 member scores, u8 stars
    Score = 5,
    /// StageKit lighting, 2 bytes: left channel, right channel
    StageKit = 6,
    /// Band roster, 3 bytes per member
    BandInfo = 7,
    /// Venue name string
    VenueName = 8,
    /// Screen name string
    ScreenName = 9,
    /// Engine-specific extension data
    ExtendedData = 10,
}

impl PacketType {
    /// Map the raw header byte to a known packet kind
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(PacketType::Alive),
            1 => Some(PacketType::State),
            2 => Some(PacketType::SongName),
            3 => Some(PacketType::SongArtist),
            4 => Some(PacketType::SongShortName),
            5 => Some(PacketType::Score),
            6 => Some(PacketType::StageKit),
            7 => Some(PacketType::BandInfo),
            8 => Some(PacketType::VenueName),
            9 => Some(PacketType::ScreenName),
            10 => Some(PacketType::ExtendedData),
            _ => None,
        }
    }
}

/// StageKit right-channel code points
pub mod right {
    /// Fog machine on
    pub const FOG_ON: u8 = 0x01;
    /// Fog machine off
    pub const FOG_OFF: u8 = 0x02;
    /// First strobe code (slow)
    pub const STROBE_SLOW: u8 = 0x03;
    /// Strobe medium
    pub const STROBE_MEDIUM: u8 = 0x04;
    /// Strobe fast
    pub const STROBE_FAST: u8 = 0x05;
    /// Strobe fastest
    pub const STROBE_FASTEST: u8 = 0x06;
    /// Last strobe code (off)
    pub const STROBE_OFF: u8 = 0x07;
    /// Everything off, state reset
    pub const DISABLE_ALL: u8 = 0xFF;

    /// Red LED bank bit
    pub const RED_BIT: u8 = 0x80;
    /// Green LED bank bit
    pub const GREEN_BIT: u8 = 0x40;
    /// Blue LED bank bit
    pub const BLUE_BIT: u8 = 0x20;
}
