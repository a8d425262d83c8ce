use std::path::PathBuf;

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;

use swatch_swipe::app::game::SwatchAppPlugin;
use swatch_swipe::core::config::AppConfig;
use swatch_swipe::preference::PreferenceEngine;

#[derive(Parser, Debug)]
#[command(about = "Swipe through color swatches and converge on the one you like", version)]
struct Args {
    /// Config layers, later files override earlier ones.
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Fixed RNG seed for a reproducible palette and pick order.
    #[arg(long)]
    seed: Option<u64>,
}

fn default_layers() -> Vec<PathBuf> {
    vec![
        PathBuf::from("assets/config/swatch.ron"),
        PathBuf::from("assets/config/swatch.local.ron"),
    ]
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args = Args::parse();
    let layers = if args.configs.is_empty() {
        default_layers()
    } else {
        args.configs.clone()
    };
    let (cfg, used, errors) = AppConfig::load_layered(&layers);
    let warnings = cfg.validate();

    let engine = match args.seed {
        Some(seed) => PreferenceEngine::with_seed(cfg.palette.clone(), seed),
        None => PreferenceEngine::new(cfg.palette.clone()),
    };

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(engine)
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.window.width, cfg.window.height).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        );

    // LogPlugin is live from here on
    if used.is_empty() {
        warn!(target: "config", "no config file found in {layers:?}; using defaults");
    } else {
        info!(target: "config", "loaded config layers: {used:?}");
    }
    for e in &errors {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    for w in &warnings {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
    if let Some(seed) = args.seed {
        info!(target: "config", "palette seed {seed}");
    }

    app.add_plugins(SwatchAppPlugin);
    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
