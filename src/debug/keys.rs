#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use crate::interaction::session::{FinalizeRequested, RestartRequested};
#[cfg(feature = "debug")]
use crate::preference::PreferenceEngine;
#[cfg(feature = "debug")]
use bevy::prelude::*;

/// F1 toggles periodic logging, F2 dumps the current shortlist,
/// F5 restarts and Enter finalizes.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut state: ResMut<DebugState>,
    engine: Option<Res<PreferenceEngine>>,
    mut restart: EventWriter<RestartRequested>,
    mut finalize: EventWriter<FinalizeRequested>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::F1) {
        state.logging_enabled = !state.logging_enabled;
        info!(target: "debug", "periodic logging {}", if state.logging_enabled { "on" } else { "off" });
    }
    if keys.just_pressed(KeyCode::F2) {
        if let Some(engine) = engine.as_deref() {
            let shortlist = engine.preference_shortlist();
            let top: Vec<String> = shortlist.iter().take(5).map(|s| s.to_string()).collect();
            info!(target: "debug", "phase={:?} shortlist={} top={top:?}", engine.phase(), shortlist.len());
        }
    }
    if keys.just_pressed(KeyCode::F5) {
        restart.write(RestartRequested);
    }
    if keys.just_pressed(KeyCode::Enter) {
        finalize.write(FinalizeRequested);
    }
}
