#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::SwatchCard;
#[cfg(feature = "debug")]
use crate::preference::PreferenceEngine;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    engine: Option<Res<PreferenceEngine>>,
    q_cards: Query<(), With<SwatchCard>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.live_cards = q_cards.iter().count();
    if let Some(engine) = engine {
        stats.remaining = engine.pool_len();
        stats.shown = engine.shown_count();
        stats.liked = engine.liked().len();
        stats.disliked = engine.disliked().len();
        stats.phase = Some(engine.phase());
    }
}
