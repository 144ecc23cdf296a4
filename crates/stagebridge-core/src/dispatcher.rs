//! Cue dispatch orchestration
//!
//! The dispatcher owns everything stateful in the pipeline: the [`CueData`]
//! record, the sticky [`BrightnessLevel`], and the dedup gate. Each datagram
//! is processed run-to-completion: decode, dedup, per-type handler, stagekit
//! channel actions, best-effort sink calls, monitor events. There is exactly
//! one mutator, so no locking is involved anywhere in this module.

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::cue::{BrightnessLevel, CueData, GameState, LedColor, LightingCue, StrobeState};
use crate::dedup::{DedupGate, Novelty};
use crate::error::{DecodeError, Result};
use crate::events::{MetadataField, TelemetryEvent};
use crate::handlers;
use crate::packet;
use crate::stagekit::{self, LeftAction, RightAction};
use crate::wire::PacketType;

/// Capacity of the monitor event channel; stragglers lag, they don't block
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Whether an optional sink capability took the call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The sink implements and handled the capability
    Handled,
    /// The sink does not implement the capability; never an error
    NotSupported,
}

/// Capability surface of the downstream effects engine
///
/// `handle_cue` is the one required operation. The rest are optional: the
/// default bodies advertise non-support and the dispatcher treats
/// [`Handled::NotSupported`] as a trace-level non-event.
pub trait CueSink: Send {
    /// Primary path: every resolved lighting cue, including strobe
    /// transitions tagged [`LightingCue::Strobe`].
    fn handle_cue(&mut self, cue: LightingCue, data: &CueData);

    /// Coarse game state changed
    fn handle_game_state(&mut self, _state: GameState) -> Handled {
        Handled::NotSupported
    }

    /// LED color spec formatted `"<color>:<brightness>"`, both lower-case
    fn handle_led_color(&mut self, _spec: &str) -> Handled {
        Handled::NotSupported
    }

    /// Everything-off reset
    fn handle_disable_all(&mut self) -> Handled {
        Handled::NotSupported
    }

    /// Fog toggle. Tracked but never invoked by the dispatcher today; the
    /// pass-through is deliberate, kept as the wiring point for fog hardware.
    fn handle_fog(&mut self, _enabled: bool) -> Handled {
        Handled::NotSupported
    }

    /// Dedicated strobe path. Unused: strobe rides `handle_cue`.
    fn handle_strobe(&mut self, _state: StrobeState) -> Handled {
        Handled::NotSupported
    }
}

/// Decode-and-dispatch pipeline owner
pub struct CueDispatcher {
    data: CueData,
    brightness: BrightnessLevel,
    dedup: DedupGate,
    sink: Box<dyn CueSink>,
    events: broadcast::Sender<TelemetryEvent>,
}

impl CueDispatcher {
    /// Create a dispatcher forwarding to the given sink
    pub fn new(sink: Box<dyn CueSink>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            data: CueData::default(),
            brightness: BrightnessLevel::default(),
            dedup: DedupGate::new(),
            sink,
            events,
        }
    }

    /// Subscribe to monitor events
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.events.subscribe()
    }

    /// Current sticky brightness
    pub fn brightness(&self) -> BrightnessLevel {
        self.brightness
    }

    /// Read access to the accumulated lighting state
    pub fn cue_data(&self) -> &CueData {
        &self.data
    }

    /// Restart semantics: default state, brightness Medium, dedup cleared
    pub fn reset(&mut self) {
        self.data = CueData::default();
        self.brightness = BrightnessLevel::default();
        self.dedup.reset();
    }

    /// Process one raw datagram, run-to-completion
    ///
    /// Decode errors are returned for the caller to log and drop; they never
    /// leave partial state behind. Duplicates are dropped silently after the
    /// header parse, before any handler can run.
    pub fn process_datagram(&mut self, datagram: &[u8]) -> Result<()> {
        let (header, payload) = packet::decode(datagram)?;

        if self.dedup.check(header.kind, payload) == Novelty::Duplicate {
            trace!(kind = header.kind, "dropping resent packet");
            return Ok(());
        }

        let Some(packet_type) = header.packet_type() else {
            debug!(kind = header.kind, "ignoring unknown packet type");
            return Ok(());
        };

        match packet_type {
            PacketType::Alive => {
                debug!(message = %handlers::read_wire_string(payload), "engine alive");
            }
            PacketType::State => self.on_state(payload)?,
            PacketType::SongName => self.on_metadata(MetadataField::SongName, payload),
            PacketType::SongArtist => self.on_metadata(MetadataField::SongArtist, payload),
            PacketType::SongShortName => self.on_metadata(MetadataField::SongShortName, payload),
            PacketType::Score => self.on_score(payload)?,
            PacketType::StageKit => self.on_stagekit(payload)?,
            PacketType::BandInfo => self.on_band_info(payload),
            PacketType::VenueName => self.on_metadata(MetadataField::VenueName, payload),
            PacketType::ScreenName => self.on_metadata(MetadataField::ScreenName, payload),
            PacketType::ExtendedData => {
                debug!(len = payload.len(), "extended data packet observed");
            }
        }

        Ok(())
    }

    fn on_state(&mut self, payload: &[u8]) -> Result<()> {
        let state = handlers::apply_state(payload)?;
        if self.sink.handle_game_state(state) == Handled::NotSupported {
            trace!(?state, "sink has no game state capability");
        }
        self.emit(TelemetryEvent::GameStateProcessed {
            state,
            at: Utc::now(),
        });
        Ok(())
    }

    fn on_metadata(&mut self, field: MetadataField, payload: &[u8]) {
        let value = handlers::read_wire_string(payload);
        let slot = match field {
            MetadataField::SongName => &mut self.data.song_name,
            MetadataField::SongArtist => &mut self.data.song_artist,
            MetadataField::SongShortName => &mut self.data.song_short_name,
            MetadataField::VenueName => &mut self.data.venue_name,
            MetadataField::ScreenName => &mut self.data.screen_name,
        };
        *slot = value.clone();
        self.emit(TelemetryEvent::MetadataProcessed {
            field,
            value,
            at: Utc::now(),
        });
    }

    fn on_score(&mut self, payload: &[u8]) -> Result<()> {
        handlers::apply_score(payload, &mut self.data)?;
        self.emit(TelemetryEvent::ScoreProcessed {
            total_score: self.data.total_score,
            member_scores: self.data.member_scores,
            stars: self.data.stars,
            at: Utc::now(),
        });
        Ok(())
    }

    fn on_band_info(&mut self, payload: &[u8]) {
        let band = handlers::apply_band_info(payload, &mut self.data);
        self.emit(TelemetryEvent::BandInfoProcessed {
            band,
            at: Utc::now(),
        });
    }

    fn on_stagekit(&mut self, payload: &[u8]) -> Result<()> {
        if payload.len() < 2 {
            return Err(DecodeError::ShortPayload {
                kind: "stagekit",
                needed: 2,
                got: payload.len(),
            });
        }
        let (left, right) = (payload[0], payload[1]);

        for action in stagekit::decode_left(left) {
            match action {
                LeftAction::SetBrightness(level) => {
                    trace!(?level, "brightness level set");
                    self.brightness = level;
                }
                LeftAction::Accent(color) => self.forward_led_color(color),
                LeftAction::Cue(cue) => {
                    self.data.lighting_cue = cue;
                    self.sink.handle_cue(cue, &self.data);
                    self.emit(TelemetryEvent::CueProcessed {
                        cue,
                        data: self.data.clone(),
                        at: Utc::now(),
                    });
                }
                LeftAction::UnknownCue(code) => {
                    warn!(code, "left channel byte has no cue table entry");
                }
                LeftAction::Reserved => {
                    trace!(code = left, "reserved left channel code ignored");
                }
            }
        }

        match stagekit::decode_right(right) {
            RightAction::DisableAll => {
                self.data.fog = false;
                self.data.strobe = StrobeState::Off;
                self.data.led_color = None;
                self.brightness = BrightnessLevel::Medium;
                if self.sink.handle_disable_all() == Handled::NotSupported {
                    trace!("sink has no disable-all capability");
                }
            }
            RightAction::Fog(enabled) => {
                // Tracked only; no capability call by design (future wiring).
                self.data.fog = enabled;
            }
            RightAction::Strobe(state) => {
                self.data.strobe = state;
                self.sink.handle_cue(LightingCue::Strobe, &self.data);
                self.emit(TelemetryEvent::CueProcessed {
                    cue: LightingCue::Strobe,
                    data: self.data.clone(),
                    at: Utc::now(),
                });
            }
            RightAction::Led(color) => self.forward_led_color(color),
            RightAction::Unhandled(code) => {
                debug!(code, "unhandled right channel byte");
            }
        }

        Ok(())
    }

    fn forward_led_color(&mut self, color: LedColor) {
        self.data.led_color = Some(color);
        let spec = format!("{}:{}", color.as_str(), self.brightness.as_str());
        if self.sink.handle_led_color(&spec) == Handled::NotSupported {
            trace!(%spec, "sink has no LED color capability");
        }
    }

    fn emit(&self, event: TelemetryEvent) {
        // No subscribers is the normal headless case.
        let _ = self.events.send(event);
    }
}
