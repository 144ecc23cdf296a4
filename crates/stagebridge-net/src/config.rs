//! Listener configuration

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use stagebridge_core::DEFAULT_PORT;

/// UDP listener settings
///
/// Every field has a default, so an empty TOML table (or no file at all) is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// IPv4 address to bind
    pub bind_addr: Ipv4Addr,
    /// UDP port the game engine sends telemetry to
    pub port: u16,
    /// Receive buffer size; the wire maxes out at 263 bytes per datagram
    pub recv_buffer: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: Ipv4Addr::UNSPECIFIED,
            port: DEFAULT_PORT,
            recv_buffer: 512,
        }
    }
}

impl ListenerConfig {
    /// Parse from a TOML document
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
