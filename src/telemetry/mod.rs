//! Hands the finalized color id to a [`SelectionSink`] without blocking the frame.
//!
//! Flow: `SubmitSelection` -> worker thread -> outcome over a channel ->
//! `Failed` straight away on error, otherwise `Saved` once `settle_secs` pass.
//! Nothing is retried and the verdict history is never touched.
pub mod sink;

use std::sync::Arc;

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::core::config::AppConfig;
use crate::core::schedule::{delay_secs, Scheduler};
use crate::core::system::system_order::FeedSet;

pub use sink::{submit_url, LogSink, SelectionSink};
#[cfg(not(target_arch = "wasm32"))]
pub use sink::HttpSink;

/// Request to submit a finalized selection.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitSelection {
    pub swatch_id: u32,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending { ticket: u64, swatch_id: u32 },
    Saved { swatch_id: u32 },
    Failed { swatch_id: u32, reason: String },
}

impl SubmitStatus {
    /// User-facing status line; empty while idle.
    pub fn message(&self) -> String {
        match self {
            SubmitStatus::Idle => String::new(),
            SubmitStatus::Sending { .. } => "Sending...".into(),
            SubmitStatus::Saved { .. } => "Saved!".into(),
            SubmitStatus::Failed { .. } => "Error saving selection. See log for details.".into(),
        }
    }
}

#[derive(Resource, Clone)]
pub struct ActiveSink(pub Arc<dyn SelectionSink>);

#[derive(Debug)]
struct SubmitOutcome {
    ticket: u64,
    swatch_id: u32,
    result: Result<(), String>,
}

#[derive(Resource)]
struct SubmitChannel {
    tx: Sender<SubmitOutcome>,
    rx: Receiver<SubmitOutcome>,
}

#[derive(Resource, Default)]
struct SubmitTracker {
    next_ticket: u64,
    settle: Scheduler<u64>,
}

pub struct SubmitPlugin;

impl Plugin for SubmitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>();
        if !app.world().contains_resource::<ActiveSink>() {
            let sink = default_sink(&app.world().resource::<AppConfig>().submit.endpoint);
            info!(target: "submit", "selection sink: {}", sink.name());
            app.insert_resource(ActiveSink(sink));
        }
        let (tx, rx) = crossbeam_channel::unbounded();
        app.insert_resource(SubmitChannel { tx, rx })
            .init_resource::<SubmitTracker>()
            .init_resource::<SubmitStatus>()
            .add_event::<SubmitSelection>()
            .add_systems(
                Update,
                (dispatch_submissions, poll_submissions, settle_submissions)
                    .chain()
                    .after(FeedSet),
            );
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_sink(endpoint: &str) -> Arc<dyn SelectionSink> {
    if endpoint.trim().is_empty() {
        Arc::new(LogSink)
    } else {
        Arc::new(HttpSink::new(endpoint))
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_sink(_endpoint: &str) -> Arc<dyn SelectionSink> {
    Arc::new(LogSink)
}

fn dispatch_submissions(
    mut requests: EventReader<SubmitSelection>,
    cfg: Res<AppConfig>,
    sink: Res<ActiveSink>,
    channel: Res<SubmitChannel>,
    mut tracker: ResMut<SubmitTracker>,
    mut status: ResMut<SubmitStatus>,
) {
    for req in requests.read() {
        if !cfg.submit.enabled {
            info!(target: "submit", "submission disabled; color #{} not sent", req.swatch_id);
            continue;
        }
        let ticket = tracker.next_ticket;
        tracker.next_ticket += 1;
        *status = SubmitStatus::Sending {
            ticket,
            swatch_id: req.swatch_id,
        };
        info!(target: "submit", "submitting color #{} via {}", req.swatch_id, sink.0.name());
        if let Err(e) = spawn_submission(sink.0.clone(), channel.tx.clone(), ticket, req.swatch_id) {
            warn!(target: "submit", "could not start submission: {e:#}");
            *status = SubmitStatus::Failed {
                swatch_id: req.swatch_id,
                reason: format!("{e:#}"),
            };
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_submission(
    sink: Arc<dyn SelectionSink>,
    tx: Sender<SubmitOutcome>,
    ticket: u64,
    swatch_id: u32,
) -> anyhow::Result<()> {
    std::thread::Builder::new()
        .name("selection-sink".into())
        .spawn(move || {
            let result = sink.submit(swatch_id).map_err(|e| format!("{e:#}"));
            // receiver gone means the app is shutting down
            let _ = tx.send(SubmitOutcome {
                ticket,
                swatch_id,
                result,
            });
        })?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn spawn_submission(
    sink: Arc<dyn SelectionSink>,
    tx: Sender<SubmitOutcome>,
    ticket: u64,
    swatch_id: u32,
) -> anyhow::Result<()> {
    let result = sink.submit(swatch_id).map_err(|e| format!("{e:#}"));
    tx.send(SubmitOutcome {
        ticket,
        swatch_id,
        result,
    })?;
    Ok(())
}

fn poll_submissions(
    cfg: Res<AppConfig>,
    channel: Res<SubmitChannel>,
    mut tracker: ResMut<SubmitTracker>,
    mut status: ResMut<SubmitStatus>,
) {
    for outcome in channel.rx.try_iter() {
        let current = matches!(*status, SubmitStatus::Sending { ticket, .. } if ticket == outcome.ticket);
        if !current {
            debug!(target: "submit", "dropping stale outcome for ticket {}", outcome.ticket);
            continue;
        }
        match outcome.result {
            Ok(()) => {
                let delay = delay_secs(cfg.submit.settle_secs);
                tracker.settle.schedule(delay, outcome.ticket);
            }
            Err(reason) => {
                warn!(target: "submit", "submitting color #{} failed: {reason}", outcome.swatch_id);
                *status = SubmitStatus::Failed {
                    swatch_id: outcome.swatch_id,
                    reason,
                };
            }
        }
    }
}

fn settle_submissions(
    time: Res<Time>,
    mut tracker: ResMut<SubmitTracker>,
    mut status: ResMut<SubmitStatus>,
) {
    for ticket in tracker.settle.advance(time.delta()) {
        if let SubmitStatus::Sending { ticket: t, swatch_id } = *status {
            if t == ticket {
                info!(target: "submit", "color #{swatch_id} saved");
                *status = SubmitStatus::Saved { swatch_id };
            }
        }
    }
}

/// Forgets any in-flight submission; its outcome will be dropped as stale.
pub fn clear_submission(status: &mut SubmitStatus) {
    *status = SubmitStatus::Idle;
}
