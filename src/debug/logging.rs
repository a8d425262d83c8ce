#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    if !state.logging_enabled {
        return;
    }
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    // only log when something moved; an idle feed stays quiet
    if stats.shown == state.last_shown && state.frame_counter > 1 {
        return;
    }
    state.last_shown = stats.shown;
    info!(target: "debug", "FEED frame={} t={:.3}s fps={:.1} ft_ms={:.1} shown={} liked={} disliked={} remaining={} cards={} phase={:?}",
        state.frame_counter,
        time.elapsed_secs(),
        stats.fps,
        stats.frame_time_ms,
        stats.shown,
        stats.liked,
        stats.disliked,
        stats.remaining,
        stats.live_cards,
        stats.phase);
}
