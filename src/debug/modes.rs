#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugState {
    pub logging_enabled: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
    pub last_shown: usize,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            logging_enabled: true,
            log_interval: 2.0,
            time_accum: 0.0,
            frame_counter: 0,
            last_shown: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Default, Debug, Clone)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub remaining: usize,
    pub shown: usize,
    pub liked: usize,
    pub disliked: usize,
    pub phase: Option<crate::preference::SelectionPhase>,
    pub live_cards: usize,
}
