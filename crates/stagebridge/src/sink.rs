//! Logging cue sink
//!
//! The headless binary has no effects engine attached; this sink logs every
//! capability call so an operator can watch the cue stream live. It also
//! serves as a working reference for effects-engine integrators.

use stagebridge_core::{CueData, CueSink, GameState, Handled, LightingCue};
use tracing::info;

/// Sink that reports every cue through the log
pub struct TracingSink;

impl CueSink for TracingSink {
    fn handle_cue(&mut self, cue: LightingCue, data: &CueData) {
        info!(?cue, strobe = ?data.strobe, led = ?data.led_color, "lighting cue");
    }

    fn handle_game_state(&mut self, state: GameState) -> Handled {
        info!(?state, "game state");
        Handled::Handled
    }

    fn handle_led_color(&mut self, spec: &str) -> Handled {
        info!(%spec, "led color");
        Handled::Handled
    }

    fn handle_disable_all(&mut self) -> Handled {
        info!("disable all");
        Handled::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_advertises_core_capabilities() {
        let mut sink = TracingSink;
        assert_eq!(sink.handle_game_state(GameState::Menus), Handled::Handled);
        assert_eq!(sink.handle_led_color("red:low"), Handled::Handled);
        assert_eq!(sink.handle_disable_all(), Handled::Handled);
        // Fog stays unadvertised; the dispatcher never calls it anyway.
        assert_eq!(sink.handle_fog(true), Handled::NotSupported);
    }
}
