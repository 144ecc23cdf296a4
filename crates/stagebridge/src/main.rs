//! StageBridge - RB3E telemetry to lighting cue bridge
//!
//! Headless entry point: binds the telemetry listener, forwards cues to a
//! logging sink, and runs until ctrl-c.

mod sink;

use std::net::Ipv4Addr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stagebridge_core::CueDispatcher;
use stagebridge_net::{ListenerConfig, TelemetryListener};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use sink::TracingSink;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bridges RB3E game telemetry to lighting cues", long_about = None)]
struct Cli {
    /// Optional TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the UDP port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the IPv4 bind address.
    #[arg(short, long)]
    bind: Option<Ipv4Addr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::info!(port = config.port, bind = %config.bind_addr, "starting stagebridge");

    let dispatcher = CueDispatcher::new(Box::new(TracingSink));
    spawn_event_monitor(&dispatcher);

    let mut listener = TelemetryListener::new(config);
    listener.start(dispatcher).await?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for ctrl-c")?;
    tracing::info!("shutting down");
    listener.stop().await?;

    Ok(())
}

/// Mirror monitor events into the debug log
fn spawn_event_monitor(dispatcher: &CueDispatcher) {
    let mut events = dispatcher.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(?event, "telemetry event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event monitor lagged")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Priority order: command-line flags, then config file, then defaults
fn resolve_config(cli: &Cli) -> Result<ListenerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path:?}"))?;
            ListenerConfig::from_toml(&text)
                .with_context(|| format!("failed to parse config file {path:?}"))?
        }
        None => ListenerConfig::default(),
    };

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    Ok(config)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
