//! Per-payload field handlers
//!
//! One handler per payload kind. Each takes the payload slice and updates
//! the fields of [`CueData`] it owns, or reports a typed outcome for the
//! dispatcher to act on. Handlers never touch fields outside their own
//! column (see the field ownership note on [`CueData`]).

use crate::cue::{BandMember, CueData, GameState};
use crate::error::{DecodeError, Result};

/// Score payload size: i32 total + 4x i32 member scores + u8 stars
pub const SCORE_PAYLOAD_LEN: usize = 21;

/// Bytes per band-info member slot
const BAND_MEMBER_STRIDE: usize = 3;

/// Maximum band slots carried on the wire
const BAND_MEMBER_SLOTS: usize = 4;

/// Read a null-terminated UTF-8 string from a payload
///
/// No terminator means the whole payload is the string; invalid UTF-8 is
/// replaced rather than rejected. Both are deliberate leniencies.
pub fn read_wire_string(payload: &[u8]) -> String {
    let end = payload
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(payload.len());
    String::from_utf8_lossy(&payload[..end]).into_owned()
}

/// State payload: byte 0 == 0 means menus, anything else in game
pub fn apply_state(payload: &[u8]) -> Result<GameState> {
    let first = payload.first().ok_or(DecodeError::ShortPayload {
        kind: "state",
        needed: 1,
        got: 0,
    })?;
    Ok(if *first == 0 {
        GameState::Menus
    } else {
        GameState::InGame
    })
}

/// Score payload: little-endian i32 total, 4x i32 member scores, u8 stars
///
/// Shorter payloads fail soft: the error is returned and `data` is left
/// untouched.
pub fn apply_score(payload: &[u8], data: &mut CueData) -> Result<()> {
    if payload.len() < SCORE_PAYLOAD_LEN {
        return Err(DecodeError::ShortPayload {
            kind: "score",
            needed: SCORE_PAYLOAD_LEN,
            got: payload.len(),
        });
    }

    let read_i32 = |offset: usize| {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&payload[offset..offset + 4]);
        i32::from_le_bytes(bytes)
    };

    data.total_score = read_i32(0);
    for member in 0..4 {
        data.member_scores[member] = read_i32(4 + member * 4);
    }
    data.stars = payload[20];
    Ok(())
}

/// Band-info payload: 3-byte member strides (exists, difficulty, track type)
///
/// Lighting-inert: populates the roster only. Partial trailing strides are
/// ignored, and at most four slots are read.
pub fn apply_band_info(payload: &[u8], data: &mut CueData) -> Vec<BandMember> {
    let members: Vec<BandMember> = payload
        .chunks_exact(BAND_MEMBER_STRIDE)
        .take(BAND_MEMBER_SLOTS)
        .map(|chunk| BandMember {
            exists: chunk[0] != 0,
            difficulty: chunk[1],
            track_type: chunk[2],
        })
        .collect();
    data.band = members.clone();
    members
}
