//! End-to-end dispatch coverage over raw datagrams

use std::sync::{Arc, Mutex};

use stagebridge_core::{
    BrightnessLevel, CueData, CueDispatcher, CueSink, GameState, Handled, LightingCue,
    StrobeState, HEADER_LEN, RB3E_MAGIC,
};

#[derive(Default)]
struct Recorded {
    cues: Vec<LightingCue>,
    led_specs: Vec<String>,
    states: Vec<GameState>,
}

#[derive(Default, Clone)]
struct RecordingSink(Arc<Mutex<Recorded>>);

impl CueSink for RecordingSink {
    fn handle_cue(&mut self, cue: LightingCue, _data: &CueData) {
        self.0.lock().unwrap().cues.push(cue);
    }
    fn handle_game_state(&mut self, state: GameState) -> Handled {
        self.0.lock().unwrap().states.push(state);
        Handled::Handled
    }
    fn handle_led_color(&mut self, spec: &str) -> Handled {
        self.0.lock().unwrap().led_specs.push(spec.to_string());
        Handled::Handled
    }
}

fn datagram(kind: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&RB3E_MAGIC);
    bytes.extend_from_slice(&[0, kind, payload.len() as u8, 0]);
    bytes.extend_from_slice(payload);
    bytes
}

fn harness() -> (CueDispatcher, RecordingSink) {
    let sink = RecordingSink::default();
    (CueDispatcher::new(Box::new(sink.clone())), sink)
}

#[test]
fn test_song_session_walkthrough() {
    let (mut dispatcher, sink) = harness();

    // Engine comes alive, loads a song, starts playing.
    dispatcher
        .process_datagram(&datagram(0, b"RB3E v1.3\0"))
        .unwrap();
    dispatcher
        .process_datagram(&datagram(2, b"Green Grass\0"))
        .unwrap();
    dispatcher
        .process_datagram(&datagram(3, b"The High Tones\0"))
        .unwrap();
    dispatcher.process_datagram(&datagram(1, &[1])).unwrap();

    // Venue lighting starts calling cues.
    dispatcher.process_datagram(&datagram(6, &[3, 0])).unwrap();
    dispatcher.process_datagram(&datagram(6, &[4, 0])).unwrap();

    let data = dispatcher.cue_data();
    assert_eq!(data.song_name, "Green Grass");
    assert_eq!(data.song_artist, "The High Tones");
    assert_eq!(data.lighting_cue, LightingCue::CoolLoop);

    let recorded = sink.0.lock().unwrap();
    assert_eq!(recorded.states, vec![GameState::InGame]);
    assert_eq!(
        recorded.cues,
        vec![LightingCue::Intro, LightingCue::CoolLoop]
    );
}

#[test]
fn test_brightness_transition_sequence() {
    // Left 34 then 68: Medium (default) -> Low -> Medium, order-dependent.
    let (mut dispatcher, _) = harness();
    assert_eq!(dispatcher.brightness(), BrightnessLevel::Medium);

    dispatcher.process_datagram(&datagram(6, &[34, 0])).unwrap();
    assert_eq!(dispatcher.brightness(), BrightnessLevel::Low);

    dispatcher.process_datagram(&datagram(6, &[68, 0])).unwrap();
    assert_eq!(dispatcher.brightness(), BrightnessLevel::Medium);
}

#[test]
fn test_led_spec_uses_sticky_brightness() {
    let (mut dispatcher, sink) = harness();

    dispatcher
        .process_datagram(&datagram(6, &[136, 0]))
        .unwrap();
    dispatcher
        .process_datagram(&datagram(6, &[0, 0x60]))
        .unwrap();
    assert_eq!(
        sink.0.lock().unwrap().led_specs,
        vec!["teal:high".to_string()]
    );
}

#[test]
fn test_score_packet_populates_cue_data() {
    let (mut dispatcher, _) = harness();

    let mut payload = Vec::new();
    payload.extend_from_slice(&1000i32.to_le_bytes());
    for score in [100i32, 200, 300, 400] {
        payload.extend_from_slice(&score.to_le_bytes());
    }
    payload.push(5);

    dispatcher.process_datagram(&datagram(5, &payload)).unwrap();
    let data = dispatcher.cue_data();
    assert_eq!(data.total_score, 1000);
    assert_eq!(data.member_scores, [100, 200, 300, 400]);
    assert_eq!(data.stars, 5);
}

#[test]
fn test_short_score_drops_without_mutation() {
    let (mut dispatcher, _) = harness();
    assert!(dispatcher.process_datagram(&datagram(5, &[1, 2, 3])).is_err());
    assert_eq!(dispatcher.cue_data().total_score, 0);
}

#[test]
fn test_resend_suppression_is_per_payload() {
    let (mut dispatcher, sink) = harness();
    let stomp = datagram(6, &[7, 0]);

    dispatcher.process_datagram(&stomp).unwrap();
    dispatcher.process_datagram(&stomp).unwrap();
    dispatcher.process_datagram(&stomp).unwrap();
    assert_eq!(sink.0.lock().unwrap().cues.len(), 1);

    // Interleave a different packet; the old one becomes novel again.
    dispatcher.process_datagram(&datagram(6, &[8, 0])).unwrap();
    dispatcher.process_datagram(&stomp).unwrap();
    assert_eq!(
        sink.0.lock().unwrap().cues,
        vec![LightingCue::Stomp, LightingCue::Harmony, LightingCue::Stomp]
    );
}

#[test]
fn test_disable_all_after_full_state() {
    let (mut dispatcher, _) = harness();

    dispatcher
        .process_datagram(&datagram(6, &[136, 0x01]))
        .unwrap();
    dispatcher
        .process_datagram(&datagram(6, &[0, 0x06]))
        .unwrap();
    dispatcher
        .process_datagram(&datagram(6, &[0, 0xFF]))
        .unwrap();

    let data = dispatcher.cue_data();
    assert!(!data.fog);
    assert_eq!(data.strobe, StrobeState::Off);
    assert_eq!(data.led_color, None);
    assert_eq!(dispatcher.brightness(), BrightnessLevel::Medium);
}

#[test]
fn test_malformed_datagrams_never_reach_the_sink() {
    let (mut dispatcher, sink) = harness();

    assert!(dispatcher.process_datagram(b"RB3").is_err());
    assert!(dispatcher.process_datagram(b"XXXX\x00\x06\x02\x00\x06\x00").is_err());
    assert!(dispatcher.process_datagram(b"RB3E\x00\x06\x09\x00\x06\x00").is_err());

    assert!(sink.0.lock().unwrap().cues.is_empty());
    assert!(sink.0.lock().unwrap().led_specs.is_empty());
}
