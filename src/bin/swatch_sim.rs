//! Headless session: a scripted user who likes hues near a target swipes
//! through the feed; prints each pick and how close the picks drift.
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use swatch_swipe::core::config::AppConfig;
use swatch_swipe::preference::{hue_gap, PreferenceEngine, Verdict};

#[derive(Parser, Debug)]
#[command(about = "Simulate a swipe session against a hue-loving user", version)]
struct Args {
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Hue the simulated user likes (0..360).
    #[arg(long, default_value_t = 210)]
    target_hue: u16,
    /// Hue distance still counted as a like.
    #[arg(long, default_value_t = 40)]
    tolerance: u16,
    /// Swipes to run; defaults to the whole pool.
    #[arg(long)]
    rounds: Option<usize>,
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Print every pick, not just the summary.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.target_hue >= 360 {
        bail!("--target-hue must be below 360 (got {})", args.target_hue);
    }
    let (cfg, _used, errors) = AppConfig::load_layered(&args.configs);
    for e in errors {
        eprintln!("config: {e}");
    }
    let mut engine = PreferenceEngine::with_seed(cfg.palette.clone(), args.seed);
    let rounds = args.rounds.unwrap_or(engine.pool_len());

    let cold = cfg.palette.cold_start;
    let (mut early_gap, mut early_n) = (0u64, 0u64);
    let (mut late_gap, mut late_n) = (0u64, 0u64);
    for round in 0..rounds {
        let Some(swatch) = engine.next_color() else {
            println!("pool exhausted after {round} swipes");
            break;
        };
        let gap = hue_gap(swatch.hue(), args.target_hue);
        let verdict = if gap <= args.tolerance {
            Verdict::Like
        } else {
            Verdict::Dislike
        };
        engine.record(verdict, &swatch);
        if round < cold {
            early_gap += u64::from(gap);
            early_n += 1;
        } else {
            late_gap += u64::from(gap);
            late_n += 1;
        }
        if args.verbose {
            println!(
                "{round:>4} {:<8} {swatch} gap={gap:>3} phase={:?}",
                format!("{verdict:?}"),
                engine.phase()
            );
        }
    }

    let mean = |sum: u64, n: u64| if n == 0 { 0.0 } else { sum as f64 / n as f64 };
    println!(
        "shown={} liked={} disliked={} remaining={}",
        engine.shown_count(),
        engine.liked().len(),
        engine.disliked().len(),
        engine.pool_len()
    );
    println!(
        "mean hue gap: cold start {:.1} ({early_n} picks), afterwards {:.1} ({late_n} picks)",
        mean(early_gap, early_n),
        mean(late_gap, late_n)
    );
    if let Some(last) = engine.current_color() {
        println!("final color {last} (Color #{})", last.id());
    }
    Ok(())
}
