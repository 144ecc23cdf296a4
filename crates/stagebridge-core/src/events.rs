//! Monitor events emitted by the dispatcher
//!
//! Downstream observers (a UI monitor, a log tail) subscribe to these over a
//! broadcast channel. Every event carries the normalized data plus the time
//! it was processed. Serializes as tagged JSON for UI consumption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cue::{BandMember, CueData, GameState, LightingCue};

/// Which string field a metadata packet updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataField {
    SongName,
    SongArtist,
    SongShortName,
    VenueName,
    ScreenName,
}

/// Normalized processing events for downstream observers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TelemetryEvent {
    /// A lighting cue was resolved and forwarded
    CueProcessed {
        cue: LightingCue,
        data: CueData,
        at: DateTime<Utc>,
    },

    /// The coarse game state changed
    GameStateProcessed {
        state: GameState,
        at: DateTime<Utc>,
    },

    /// A score packet was decoded
    ScoreProcessed {
        total_score: i32,
        member_scores: [i32; 4],
        stars: u8,
        at: DateTime<Utc>,
    },

    /// A song/venue/screen string field was updated
    MetadataProcessed {
        field: MetadataField,
        value: String,
        at: DateTime<Utc>,
    },

    /// The band roster was updated
    BandInfoProcessed {
        band: Vec<BandMember>,
        at: DateTime<Utc>,
    },
}
