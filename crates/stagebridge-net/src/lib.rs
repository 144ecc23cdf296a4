//! StageBridge Net - Telemetry Transport
//!
//! Feeds raw datagrams into the core decode pipeline:
//! - [`TelemetryListener`]: UDP socket bound to the RB3E port, one task,
//!   run-to-completion per datagram
//! - local injection channel for in-process telemetry producers
//! - [`ListenerConfig`]: TOML-loadable socket settings

/// Listener configuration
pub mod config;
/// Error types
pub mod error;
/// UDP listener and lifecycle events
pub mod listener;

pub use config::ListenerConfig;
pub use error::{NetError, Result};
pub use listener::{SocketEvent, TelemetryListener};
