use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::AppConfig;
use crate::preference::PreferenceEngine;

/// Files polled for changes, in layering order.
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}

impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/swatch.ron"),
                PathBuf::from("assets/config/swatch.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}

impl FromWorld for ConfigReloadState {
    fn from_world(_world: &mut World) -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Re-reads the layered config when a file's mtime moves. Swipe thresholds and
/// timings apply immediately; palette settings apply on the next restart.
pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<AppConfig>,
    mut windows: Query<&mut Window>,
    engine: Option<ResMut<PreferenceEngine>>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(crate::core::schedule::delay_secs(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    if !any_modified(&settings.paths, &mut state.last_mod) {
        return;
    }
    let (new_cfg, used, errors) = AppConfig::load_layered(settings.paths.iter());
    for e in errors {
        warn!("CONFIG HOT-RELOAD issue: {e}");
    }
    if *cfg_res == new_cfg {
        return;
    }
    info!(files = ?used, "Config hot-reload applied");
    for w in new_cfg.validate() {
        warn!("CONFIG WARNING: {w}");
    }
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window
                .resolution
                .set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    if let Some(mut engine) = engine {
        if *engine.settings() != new_cfg.palette {
            engine.set_settings(new_cfg.palette.clone());
        }
    }
    *cfg_res = new_cfg;
}

/// Records the newest mtime per path; true when any moved forward.
fn any_modified(paths: &[PathBuf], last_mod: &mut HashMap<PathBuf, SystemTime>) -> bool {
    use std::time::UNIX_EPOCH;
    let mut dirty = false;
    for path in paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let entry = last_mod.entry(path.clone()).or_insert(UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    dirty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_never_dirty() {
        let mut seen = HashMap::new();
        let paths = vec![PathBuf::from("does/not/exist.ron")];
        assert!(!any_modified(&paths, &mut seen));
        assert!(seen.is_empty());
    }

    #[test]
    fn first_sighting_is_dirty_then_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.ron");
        std::fs::write(&path, "(swipe: (commit_threshold: 80.0))").unwrap();
        let paths = vec![path];
        let mut seen = HashMap::new();
        assert!(any_modified(&paths, &mut seen));
        assert!(!any_modified(&paths, &mut seen));
    }
}
