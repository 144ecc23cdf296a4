//! UDP telemetry listener
//!
//! One socket, one task, one dispatcher: datagrams are processed
//! run-to-completion in arrival order, so the dispatcher never needs a lock.
//! An mpsc injection channel feeds in-process telemetry (the engine-local
//! feed) through the same dispatcher, keeping the single-mutator model.
//!
//! Socket lifecycle events (bound, error, closed) are administrative and go
//! out on a broadcast channel; they are not part of the data path.

use std::net::SocketAddr;

use stagebridge_core::CueDispatcher;
use tokio::net::UdpSocket;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

use crate::config::ListenerConfig;
use crate::error::{NetError, Result};

/// Administrative socket lifecycle events
#[derive(Debug, Clone)]
pub enum SocketEvent {
    /// Socket bound and receiving
    Bound(SocketAddr),
    /// Unrecoverable socket error; listening stopped
    Error(String),
    /// Listener task finished
    Closed,
}

/// Capacity for lifecycle event subscribers
const LIFECYCLE_CAPACITY: usize = 16;

/// Capacity for locally injected datagrams
const LOCAL_FEED_CAPACITY: usize = 64;

/// Owns the UDP socket task and its shutdown signalling
///
/// `start`/`stop` guard against double invocation. Stopping is cooperative:
/// the in-flight datagram finishes before the task exits, so a handler is
/// never interrupted mid-decode.
pub struct TelemetryListener {
    config: ListenerConfig,
    lifecycle: broadcast::Sender<SocketEvent>,
    local_tx: Option<mpsc::Sender<Vec<u8>>>,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl TelemetryListener {
    /// Create a stopped listener
    pub fn new(config: ListenerConfig) -> Self {
        let (lifecycle, _) = broadcast::channel(LIFECYCLE_CAPACITY);
        Self {
            config,
            lifecycle,
            local_tx: None,
            shutdown: None,
            task: None,
        }
    }

    /// Whether the socket task is live
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Subscribe to socket lifecycle events
    pub fn lifecycle_events(&self) -> broadcast::Receiver<SocketEvent> {
        self.lifecycle.subscribe()
    }

    /// Sender for in-process telemetry datagrams
    ///
    /// Injected bytes take the same decode path as socket datagrams. Handles
    /// go stale across a stop/start cycle; fetch a fresh one after `start`.
    pub fn local_injector(&self) -> Option<mpsc::Sender<Vec<u8>>> {
        self.local_tx.clone()
    }

    /// Bind the socket and spawn the receive task owning `dispatcher`
    pub async fn start(&mut self, dispatcher: CueDispatcher) -> Result<()> {
        if self.task.is_some() {
            return Err(NetError::AlreadyRunning);
        }

        let socket = UdpSocket::bind((self.config.bind_addr, self.config.port)).await?;
        let local_addr = socket.local_addr()?;
        info!(%local_addr, "telemetry listener bound");
        let _ = self.lifecycle.send(SocketEvent::Bound(local_addr));

        let (local_tx, local_rx) = mpsc::channel(LOCAL_FEED_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        self.local_tx = Some(local_tx);
        self.shutdown = Some(shutdown_tx);

        let lifecycle = self.lifecycle.clone();
        let recv_buffer = self.config.recv_buffer;
        self.task = Some(tokio::spawn(run_loop(
            socket,
            dispatcher,
            local_rx,
            shutdown_rx,
            lifecycle,
            recv_buffer,
        )));

        Ok(())
    }

    /// Signal shutdown and wait for the task to finish its current datagram
    pub async fn stop(&mut self) -> Result<()> {
        let task = self.task.take().ok_or(NetError::NotRunning)?;
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        self.local_tx = None;
        if task.await.is_err() {
            warn!("listener task ended abnormally");
        }
        info!("telemetry listener stopped");
        Ok(())
    }
}

async fn run_loop(
    socket: UdpSocket,
    mut dispatcher: CueDispatcher,
    mut local_rx: mpsc::Receiver<Vec<u8>>,
    mut shutdown: watch::Receiver<bool>,
    lifecycle: broadcast::Sender<SocketEvent>,
    recv_buffer: usize,
) {
    let mut buf = vec![0u8; recv_buffer];

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,

            Some(datagram) = local_rx.recv() => {
                process(&mut dispatcher, &datagram);
            }

            result = socket.recv_from(&mut buf) => match result {
                Ok((len, peer)) => {
                    trace!(%peer, len, "datagram received");
                    process(&mut dispatcher, &buf[..len]);
                }
                Err(e) => {
                    // The only fatal path: report and stop listening; the
                    // rest of the application keeps running.
                    error!(error = %e, "socket receive failed");
                    let _ = lifecycle.send(SocketEvent::Error(e.to_string()));
                    break;
                }
            },
        }
    }

    let _ = lifecycle.send(SocketEvent::Closed);
}

fn process(dispatcher: &mut CueDispatcher, datagram: &[u8]) {
    if let Err(e) = dispatcher.process_datagram(datagram) {
        warn!(error = %e, "dropping malformed datagram");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use stagebridge_core::{CueData, CueSink, LightingCue};

    #[derive(Default, Clone)]
    struct RecordingSink(Arc<Mutex<Vec<LightingCue>>>);

    impl CueSink for RecordingSink {
        fn handle_cue(&mut self, cue: LightingCue, _data: &CueData) {
            self.0.lock().unwrap().push(cue);
        }
    }

    fn loopback_config() -> ListenerConfig {
        ListenerConfig {
            bind_addr: Ipv4Addr::LOCALHOST,
            port: 0, // ephemeral
            ..ListenerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_datagram_reaches_sink() {
        let sink = RecordingSink::default();
        let dispatcher = CueDispatcher::new(Box::new(sink.clone()));

        let mut listener = TelemetryListener::new(loopback_config());
        let mut events = listener.lifecycle_events();
        listener.start(dispatcher).await.unwrap();
        let addr = match events.recv().await.unwrap() {
            SocketEvent::Bound(addr) => addr,
            other => panic!("expected Bound, got {other:?}"),
        };

        let client = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        client
            .send_to(b"RB3E\x00\x06\x02\x00\x06\x00", addr)
            .await
            .unwrap();

        // Give the listener task a moment to pick the datagram up.
        for _ in 0..50 {
            if !sink.0.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*sink.0.lock().unwrap(), vec![LightingCue::Dischord]);

        listener.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_local_injection_path() {
        let sink = RecordingSink::default();
        let dispatcher = CueDispatcher::new(Box::new(sink.clone()));

        let mut listener = TelemetryListener::new(loopback_config());
        listener.start(dispatcher).await.unwrap();

        let injector = listener.local_injector().expect("running listener");
        injector
            .send(b"RB3E\x00\x06\x02\x00\x07\x00".to_vec())
            .await
            .unwrap();

        for _ in 0..50 {
            if !sink.0.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*sink.0.lock().unwrap(), vec![LightingCue::Stomp]);

        listener.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_double_start_is_guarded() {
        let mut listener = TelemetryListener::new(loopback_config());
        let dispatcher = CueDispatcher::new(Box::new(RecordingSink::default()));
        listener.start(dispatcher).await.unwrap();

        let second = CueDispatcher::new(Box::new(RecordingSink::default()));
        assert!(matches!(
            listener.start(second).await,
            Err(NetError::AlreadyRunning)
        ));

        listener.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_double_stop_is_guarded() {
        let mut listener = TelemetryListener::new(loopback_config());
        assert!(matches!(listener.stop().await, Err(NetError::NotRunning)));
    }

    #[tokio::test]
    async fn test_stop_emits_closed_event() {
        let mut listener = TelemetryListener::new(loopback_config());
        let dispatcher = CueDispatcher::new(Box::new(RecordingSink::default()));
        listener.start(dispatcher).await.unwrap();
        let mut events = listener.lifecycle_events();
        listener.stop().await.unwrap();

        loop {
            match events.recv().await.unwrap() {
                SocketEvent::Closed => break,
                _ => continue,
            }
        }
        assert!(!listener.is_running());
    }
}
