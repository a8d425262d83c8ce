use bevy::prelude::*;

use swatch_swipe::core::config::AppConfig;
use swatch_swipe::interaction::pointer::{PointerEvent, PointerId, PointerPhase};
use swatch_swipe::interaction::swipe::{
    SwipeCommitted, SwipeHint, SwipePlugin, SwipeRecognizer, SwipeVerdict, SwipeVisual,
};

fn app_with_card(interaction: Interaction) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(SwipePlugin);
    let card = app
        .world_mut()
        .spawn((SwipeVisual::default(), interaction))
        .id();
    app.world_mut().resource_mut::<SwipeRecognizer>().bind(card);
    (app, card)
}

fn send(app: &mut App, phase: PointerPhase, y: f32) {
    app.world_mut()
        .send_event(PointerEvent::new(PointerId::Mouse, phase, Vec2::new(200.0, y)));
}

fn commits(app: &App) -> Vec<SwipeCommitted> {
    let events = app.world().resource::<Events<SwipeCommitted>>();
    events.get_cursor().read(events).copied().collect()
}

#[test]
fn upward_swipe_commits_accept_once() {
    let (mut app, card) = app_with_card(Interaction::Pressed);
    send(&mut app, PointerPhase::Start, 400.0);
    send(&mut app, PointerPhase::Move, 340.0);
    app.update();
    {
        let visual = app.world().get::<SwipeVisual>(card).unwrap();
        assert!(visual.dragging);
        assert_eq!(visual.offset, -60.0);
        assert!((visual.rotation_deg + 3.0).abs() < 1e-5);
        assert_eq!(
            app.world().resource::<SwipeRecognizer>().hint(),
            SwipeHint::LeaningAccept
        );
    }
    send(&mut app, PointerPhase::Move, 280.0);
    send(&mut app, PointerPhase::End, 280.0);
    app.update();
    assert_eq!(
        commits(&app),
        vec![SwipeCommitted {
            target: card,
            verdict: SwipeVerdict::Accept
        }]
    );
    let visual = app.world().get::<SwipeVisual>(card).unwrap();
    assert_eq!(visual.departing, Some(SwipeVerdict::Accept));
    assert!(!visual.dragging);
    // binding is consumed; a stray second gesture does nothing
    assert!(app.world().resource::<SwipeRecognizer>().target().is_none());
    send(&mut app, PointerPhase::Start, 400.0);
    send(&mut app, PointerPhase::End, 600.0);
    app.update();
    let after = commits(&app);
    assert!(after.len() <= 1, "no second commit expected: {after:?}");
    assert!(after.iter().all(|c| c.verdict == SwipeVerdict::Accept));
    let visual = app.world().get::<SwipeVisual>(card).unwrap();
    assert_eq!(visual.departing, Some(SwipeVerdict::Accept));
}

#[test]
fn downward_swipe_at_exact_threshold_rejects() {
    let (mut app, card) = app_with_card(Interaction::Pressed);
    send(&mut app, PointerPhase::Start, 300.0);
    send(&mut app, PointerPhase::End, 400.0);
    app.update();
    assert_eq!(
        commits(&app),
        vec![SwipeCommitted {
            target: card,
            verdict: SwipeVerdict::Reject
        }]
    );
}

#[test]
fn short_swipe_settles_without_commit() {
    let (mut app, card) = app_with_card(Interaction::Pressed);
    send(&mut app, PointerPhase::Start, 300.0);
    send(&mut app, PointerPhase::Move, 370.0);
    send(&mut app, PointerPhase::End, 399.0);
    app.update();
    assert!(commits(&app).is_empty());
    let visual = app.world().get::<SwipeVisual>(card).unwrap();
    assert_eq!(*visual, SwipeVisual::default());
    let recognizer = app.world().resource::<SwipeRecognizer>();
    assert_eq!(recognizer.target(), Some(card));
    assert!(!recognizer.is_tracking());
}

#[test]
fn press_outside_card_is_ignored() {
    let (mut app, card) = app_with_card(Interaction::None);
    send(&mut app, PointerPhase::Start, 300.0);
    send(&mut app, PointerPhase::Move, 100.0);
    send(&mut app, PointerPhase::End, 100.0);
    app.update();
    assert!(commits(&app).is_empty());
    assert_eq!(
        *app.world().get::<SwipeVisual>(card).unwrap(),
        SwipeVisual::default()
    );
}

#[test]
fn threshold_changes_follow_config() {
    let (mut app, card) = app_with_card(Interaction::Pressed);
    app.update();
    app.world_mut().resource_mut::<AppConfig>().swipe.commit_threshold = 40.0;
    send(&mut app, PointerPhase::Start, 300.0);
    send(&mut app, PointerPhase::End, 255.0);
    app.update();
    assert_eq!(
        commits(&app),
        vec![SwipeCommitted {
            target: card,
            verdict: SwipeVerdict::Accept
        }]
    );
}
