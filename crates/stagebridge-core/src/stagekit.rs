//! StageKit channel decoding
//!
//! The 2-byte stagekit payload carries two independent channels. Decoding is
//! pure: both functions map a byte to action values and hold no state. The
//! sticky brightness lives in the dispatcher and is applied there, which
//! keeps these functions testable in isolation.

use crate::cue::{BrightnessLevel, LedColor, LightingCue, StrobeState};
use crate::wire::right;

/// Left-channel outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftAction {
    /// Set the sticky brightness level
    SetBrightness(BrightnessLevel),
    /// Emit an accent LED color at the current brightness
    Accent(LedColor),
    /// Forward a table-resolved lighting cue
    Cue(LightingCue),
    /// Byte with no table entry; logged, never forwarded
    UnknownCue(u8),
    /// Reserved/undocumented code, accepted and ignored
    Reserved,
}

/// Right-channel outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightAction {
    /// Reset fog, strobe, LED color and brightness
    DisableAll,
    /// Track the fog boolean (no capability call, see dispatcher)
    Fog(bool),
    /// Strobe speed change, routed through the generic cue path
    Strobe(StrobeState),
    /// LED color from the 3-bit mix
    Led(LedColor),
    /// No color bit set and no known code; logged
    Unhandled(u8),
}

/// Decode the left channel byte
///
/// Priority order, first match wins. 64 is the one dual-dispatch code: it
/// emits an orange accent and still falls through to the cue table.
pub fn decode_left(code: u8) -> Vec<LeftAction> {
    match code {
        34 => vec![LeftAction::SetBrightness(BrightnessLevel::Low)],
        68 | 128 => vec![LeftAction::SetBrightness(BrightnessLevel::Medium)],
        136 => vec![LeftAction::SetBrightness(BrightnessLevel::High)],
        255 => vec![LeftAction::Accent(LedColor::White)],
        170 => vec![LeftAction::Reserved],
        64 => vec![LeftAction::Accent(LedColor::Orange), lookup(64)],
        _ => vec![lookup(code)],
    }
}

fn lookup(code: u8) -> LeftAction {
    match LightingCue::from_left_code(code) {
        LightingCue::Unknown => LeftAction::UnknownCue(code),
        cue => LeftAction::Cue(cue),
    }
}

/// Decode the right channel byte
pub fn decode_right(code: u8) -> RightAction {
    match code {
        right::DISABLE_ALL => RightAction::DisableAll,
        right::FOG_ON => RightAction::Fog(true),
        right::FOG_OFF => RightAction::Fog(false),
        right::STROBE_SLOW => RightAction::Strobe(StrobeState::Slow),
        right::STROBE_MEDIUM => RightAction::Strobe(StrobeState::Medium),
        right::STROBE_FAST => RightAction::Strobe(StrobeState::Fast),
        right::STROBE_FASTEST => RightAction::Strobe(StrobeState::Fastest),
        right::STROBE_OFF => RightAction::Strobe(StrobeState::Off),
        _ => match mix_color(code) {
            Some(color) => RightAction::Led(color),
            None => RightAction::Unhandled(code),
        },
    }
}

/// Resolve the 3-bit LED color mix; `None` when no color bit is set
///
/// Exact mixing, no partial intensities: every set-bit combination has one
/// name.
fn mix_color(code: u8) -> Option<LedColor> {
    let red = code & right::RED_BIT != 0;
    let green = code & right::GREEN_BIT != 0;
    let blue = code & right::BLUE_BIT != 0;

    match (red, green, blue) {
        (true, true, true) => Some(LedColor::White),
        (true, true, false) => Some(LedColor::Yellow),
        (true, false, true) => Some(LedColor::Purple),
        (false, true, true) => Some(LedColor::Teal),
        (true, false, false) => Some(LedColor::Red),
        (false, true, false) => Some(LedColor::Green),
        (false, false, true) => Some(LedColor::Blue),
        (false, false, false) => None,
    }
}
