//! Lighting cue domain model
//!
//! The types the decode pipeline produces: named lighting cues, the sticky
//! brightness level, strobe speeds, LED colors, and the `CueData` record
//! that accumulates the current lighting-relevant game state.

use serde::{Deserialize, Serialize};

/// Abstract lighting intent forwarded to the effects engine
///
/// Resolved from the stagekit left-channel byte via [`LightingCue::from_left_code`].
/// `Strobe` is never produced by the table; it tags strobe transitions routed
/// through the generic cue path. `Unknown` is logged and never forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LightingCue {
    #[default]
    NoCue,
    Menu,
    Score,
    Intro,
    CoolLoop,
    WarmLoop,
    Dischord,
    Stomp,
    Harmony,
    Frenzy,
    Silhouettes,
    SilhouettesSpotlight,
    Searchlights,
    Sweep,
    BlackoutFast,
    BlackoutSlow,
    BlackoutSpotlight,
    FlareSlow,
    FlareFast,
    BigRockEnding,
    /// Strobe transition riding the generic cue path
    Strobe,
    /// Left-channel byte with no table entry
    Unknown,
}

impl LightingCue {
    /// Static left-channel lookup table
    ///
    /// Control codes (34, 68, 128, 136, 170, 255) are intercepted before this
    /// table is consulted; 64 is the one byte that is both an accent code and
    /// a table entry.
    pub fn from_left_code(code: u8) -> Self {
        match code {
            0 => LightingCue::NoCue,
            1 => LightingCue::Menu,
            2 => LightingCue::Score,
            3 => LightingCue::Intro,
            4 => LightingCue::CoolLoop,
            5 => LightingCue::WarmLoop,
            6 => LightingCue::Dischord,
            7 => LightingCue::Stomp,
            8 => LightingCue::Harmony,
            9 => LightingCue::Frenzy,
            10 => LightingCue::Silhouettes,
            11 => LightingCue::SilhouettesSpotlight,
            12 => LightingCue::Searchlights,
            13 => LightingCue::Sweep,
            16 => LightingCue::BlackoutFast,
            17 => LightingCue::BlackoutSlow,
            18 => LightingCue::BlackoutSpotlight,
            24 => LightingCue::FlareSlow,
            25 => LightingCue::FlareFast,
            64 => LightingCue::BigRockEnding,
            _ => LightingCue::Unknown,
        }
    }
}

/// Sticky LED brightness, session state owned by the dispatcher
///
/// Set by specific left-channel codes and reset only by the right-channel
/// disable-all code or a dispatcher restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrightnessLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl BrightnessLevel {
    /// Lower-case name used in LED color capability calls
    pub fn as_str(&self) -> &'static str {
        match self {
            BrightnessLevel::Low => "low",
            BrightnessLevel::Medium => "medium",
            BrightnessLevel::High => "high",
        }
    }
}

/// Strobe speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrobeState {
    #[default]
    Off,
    Slow,
    Medium,
    Fast,
    Fastest,
}

/// Named LED color resolved from the right-channel color bits
///
/// Orange and white also appear as left-channel accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedColor {
    White,
    Yellow,
    Purple,
    Teal,
    Red,
    Green,
    Blue,
    Orange,
}

impl LedColor {
    /// Lower-case name used in LED color capability calls
    pub fn as_str(&self) -> &'static str {
        match self {
            LedColor::White => "white",
            LedColor::Yellow => "yellow",
            LedColor::Purple => "purple",
            LedColor::Teal => "teal",
            LedColor::Red => "red",
            LedColor::Green => "green",
            LedColor::Blue => "blue",
            LedColor::Orange => "orange",
        }
    }
}

/// Coarse game state from the state packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Menus,
    InGame,
}

/// One band slot from the band-info payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandMember {
    pub exists: bool,
    pub difficulty: u8,
    pub track_type: u8,
}

/// Current known lighting-relevant game state
///
/// One logical instance lives inside the dispatcher for the life of the
/// session; handlers update individual fields during a decode pass, nothing
/// ever discards it. Which handler may touch which field:
/// stagekit owns `lighting_cue`, `led_color`, `fog`, `strobe`; score owns
/// `total_score`, `member_scores`, `stars`; the string handlers own their
/// respective name fields; band info owns `band`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CueData {
    pub lighting_cue: LightingCue,
    pub led_color: Option<LedColor>,
    pub fog: bool,
    pub strobe: StrobeState,
    pub total_score: i32,
    pub member_scores: [i32; 4],
    pub stars: u8,
    pub song_name: String,
    pub song_artist: String,
    pub song_short_name: String,
    pub venue_name: String,
    pub screen_name: String,
    pub band: Vec<BandMember>,
}
