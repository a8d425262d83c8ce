use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use swatch_swipe::core::config::AppConfig;
use swatch_swipe::telemetry::{
    clear_submission, ActiveSink, SelectionSink, SubmitPlugin, SubmitSelection, SubmitStatus,
};

struct OkSink;
impl SelectionSink for OkSink {
    fn name(&self) -> &'static str {
        "ok"
    }
    fn submit(&self, _swatch_id: u32) -> anyhow::Result<()> {
        Ok(())
    }
}

struct DownSink;
impl SelectionSink for DownSink {
    fn name(&self) -> &'static str {
        "down"
    }
    fn submit(&self, swatch_id: u32) -> anyhow::Result<()> {
        bail!("endpoint unreachable for #{swatch_id}")
    }
}

fn submit_app(sink: Arc<dyn SelectionSink>, cfg: AppConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(cfg)
        .insert_resource(ActiveSink(sink))
        .add_plugins(SubmitPlugin);
    app.update();
    app
}

fn status(app: &App) -> SubmitStatus {
    app.world().resource::<SubmitStatus>().clone()
}

/// Updates until `done` holds or the frame budget runs out.
fn run_until(app: &mut App, done: impl Fn(&SubmitStatus) -> bool) -> SubmitStatus {
    for _ in 0..300 {
        app.update();
        let s = status(app);
        if done(&s) {
            return s;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    status(app)
}

#[test]
fn success_settles_into_saved() {
    let mut cfg = AppConfig::default();
    cfg.submit.settle_secs = 0.3;
    let mut app = submit_app(Arc::new(OkSink), cfg);
    assert_eq!(status(&app), SubmitStatus::Idle);

    app.world_mut().send_event(SubmitSelection { swatch_id: 4321 });
    app.update();
    assert!(matches!(
        status(&app),
        SubmitStatus::Sending {
            swatch_id: 4321,
            ..
        } | SubmitStatus::Saved { swatch_id: 4321 }
    ));
    assert_eq!(status(&app).message(), "Sending...");

    let end = run_until(&mut app, |s| !matches!(s, SubmitStatus::Sending { .. }));
    assert_eq!(end, SubmitStatus::Saved { swatch_id: 4321 });
    assert_eq!(end.message(), "Saved!");
}

#[test]
fn failure_is_reported_without_retry() {
    let mut app = submit_app(Arc::new(DownSink), AppConfig::default());
    app.world_mut().send_event(SubmitSelection { swatch_id: 1200 });
    let end = run_until(&mut app, |s| matches!(s, SubmitStatus::Failed { .. }));
    match &end {
        SubmitStatus::Failed { swatch_id, reason } => {
            assert_eq!(*swatch_id, 1200);
            assert!(reason.contains("unreachable"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    step_frames(&mut app, 20);
    assert!(matches!(status(&app), SubmitStatus::Failed { .. }));
    assert!(end.message().starts_with("Error saving selection"));
}

#[test]
fn disabled_submission_stays_idle() {
    let mut cfg = AppConfig::default();
    cfg.submit.enabled = false;
    let mut app = submit_app(Arc::new(OkSink), cfg);
    app.world_mut().send_event(SubmitSelection { swatch_id: 2000 });
    step_frames(&mut app, 5);
    assert_eq!(status(&app), SubmitStatus::Idle);
}

#[test]
fn cleared_submission_ignores_late_outcome() {
    let mut cfg = AppConfig::default();
    cfg.submit.settle_secs = 0.2;
    let mut app = submit_app(Arc::new(OkSink), cfg);
    app.world_mut().send_event(SubmitSelection { swatch_id: 3000 });
    app.update();
    clear_submission(&mut app.world_mut().resource_mut::<SubmitStatus>());
    for _ in 0..40 {
        app.update();
        std::thread::sleep(Duration::from_millis(2));
    }
    assert_eq!(status(&app), SubmitStatus::Idle);
}

fn step_frames(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}
