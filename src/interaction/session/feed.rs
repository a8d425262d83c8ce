//! The swipe session: present a card, relay its verdict into the engine,
//! retire it after the departure animation, finalize, restart.

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{FeedRoot, SwatchCard, CARD_INSET, CARD_SIZE};
use crate::core::config::AppConfig;
use crate::core::schedule::{delay_secs, Scheduler, TaskHandle};
use crate::core::system::system_order::{FeedSet, SwipeSet};
use crate::interaction::swipe::{SwipeCommitted, SwipeRecognizer, SwipeVerdict, SwipeVisual};
use crate::preference::{PreferenceEngine, Swatch, Verdict};
use crate::telemetry::{SubmitSelection, SubmitStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAction {
    /// Despawn a departed card and, while still swiping, present the next one.
    RetireCard(Entity),
    /// End of the finalize delay: show the result and submit it.
    RevealResult,
}

#[derive(Resource, Default, Deref, DerefMut)]
pub struct DeferredActions(pub Scheduler<FeedAction>);

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FeedStatus {
    /// Pool ran dry; only finalizing is left.
    pub exhausted: bool,
    /// Transient message for the user (e.g. finalize with nothing shown).
    pub notice: Option<String>,
    pub final_swatch: Option<Swatch>,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FinalizeRequested;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartRequested;

pub const NOTHING_SHOWN: &str = "Please swipe through at least one color first!";

pub struct FeedPlugin;

impl Plugin for FeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>();
        if !app.world().contains_resource::<PreferenceEngine>() {
            let palette = app.world().resource::<AppConfig>().palette.clone();
            app.insert_resource(PreferenceEngine::new(palette));
        }
        if !app.world().contains_resource::<SwipeRecognizer>() {
            let swipe = app.world().resource::<AppConfig>().swipe;
            app.insert_resource(SwipeRecognizer::<Entity>::new(swipe));
        }
        app.init_state::<AppState>()
            .init_resource::<DeferredActions>()
            .init_resource::<FeedStatus>()
            .add_event::<SwipeCommitted>()
            .add_event::<SubmitSelection>()
            .add_event::<FinalizeRequested>()
            .add_event::<RestartRequested>()
            .configure_sets(Update, FeedSet.after(SwipeSet))
            .add_systems(PostStartup, begin_feed)
            .add_systems(
                Update,
                (
                    record_verdicts,
                    run_deferred_actions,
                    handle_finalize,
                    handle_restart,
                )
                    .chain()
                    .in_set(FeedSet),
            );
    }
}

/// Spawns a card for the next color and binds the recognizer to it.
/// Returns `None` (and flags the feed exhausted) when the pool is empty.
pub fn present_next(
    commands: &mut Commands,
    engine: &mut PreferenceEngine,
    recognizer: &mut SwipeRecognizer,
    status: &mut FeedStatus,
    root: Option<Entity>,
) -> Option<Entity> {
    if engine.pool_len() == 0 {
        if !status.exhausted {
            info!(target: "feed", "pool exhausted after {} colors", engine.shown_count());
        }
        status.exhausted = true;
        recognizer.unbind();
        return None;
    }
    let swatch = engine.next_color()?;
    let card = commands
        .spawn((
            Name::new(format!("card {}", swatch.hex())),
            SwatchCard {
                swatch: swatch.clone(),
            },
            SwipeVisual::default(),
            Interaction::default(),
            Node {
                width: Val::Px(CARD_SIZE.x),
                height: Val::Px(CARD_SIZE.y),
                left: Val::Px(CARD_INSET.x),
                top: Val::Px(CARD_INSET.y),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(swatch.color()),
            BorderRadius::all(Val::Px(24.0)),
        ))
        .id();
    if let Some(root) = root {
        commands.entity(root).add_child(card);
    }
    recognizer.bind(card);
    debug!(target: "feed", "presented {swatch} as {card:?}");
    Some(card)
}

fn begin_feed(
    mut commands: Commands,
    mut engine: ResMut<PreferenceEngine>,
    mut recognizer: ResMut<SwipeRecognizer>,
    mut status: ResMut<FeedStatus>,
    roots: Query<Entity, With<FeedRoot>>,
    cards: Query<(), With<SwatchCard>>,
) {
    if !cards.is_empty() {
        return;
    }
    info!(target: "feed", "starting session with {} candidates", engine.pool_len());
    present_next(
        &mut commands,
        &mut engine,
        &mut recognizer,
        &mut status,
        roots.iter().next(),
    );
}

fn record_verdicts(
    mut committed: EventReader<SwipeCommitted>,
    cfg: Res<AppConfig>,
    cards: Query<&SwatchCard>,
    mut engine: ResMut<PreferenceEngine>,
    mut deferred: ResMut<DeferredActions>,
) {
    for ev in committed.read() {
        let Ok(card) = cards.get(ev.target) else {
            continue;
        };
        let verdict = match ev.verdict {
            SwipeVerdict::Accept => Verdict::Like,
            SwipeVerdict::Reject => Verdict::Dislike,
        };
        engine.record(verdict, &card.swatch);
        info!(target: "feed", "{verdict:?} {}", card.swatch);
        let delay = delay_secs(cfg.feed.departure_secs);
        deferred.schedule(delay, FeedAction::RetireCard(ev.target));
    }
}

#[allow(clippy::too_many_arguments)]
fn run_deferred_actions(
    mut commands: Commands,
    time: Res<Time>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut deferred: ResMut<DeferredActions>,
    mut engine: ResMut<PreferenceEngine>,
    mut recognizer: ResMut<SwipeRecognizer>,
    mut status: ResMut<FeedStatus>,
    mut submit: EventWriter<SubmitSelection>,
    roots: Query<Entity, With<FeedRoot>>,
    cards: Query<(), With<SwatchCard>>,
) {
    for action in deferred.advance(time.delta()) {
        match action {
            FeedAction::RetireCard(card) => {
                if cards.contains(card) {
                    commands.entity(card).despawn();
                }
                if *state.get() == AppState::Swiping {
                    present_next(
                        &mut commands,
                        &mut engine,
                        &mut recognizer,
                        &mut status,
                        roots.iter().next(),
                    );
                }
            }
            FeedAction::RevealResult => {
                let Some(swatch) = status.final_swatch.clone() else {
                    continue;
                };
                info!(target: "feed", "final color {swatch}");
                next_state.set(AppState::Result);
                submit.write(SubmitSelection {
                    swatch_id: swatch.id(),
                });
            }
        }
    }
}

fn handle_finalize(
    mut requests: EventReader<FinalizeRequested>,
    cfg: Res<AppConfig>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    engine: Res<PreferenceEngine>,
    mut recognizer: ResMut<SwipeRecognizer>,
    mut status: ResMut<FeedStatus>,
    mut deferred: ResMut<DeferredActions>,
) {
    // one finalize per frame is plenty; extra clicks are dropped
    if requests.read().last().is_none() || *state.get() != AppState::Swiping {
        return;
    }
    let Some(current) = engine.current_color() else {
        warn!(target: "feed", "finalize requested before any color was shown");
        status.notice = Some(NOTHING_SHOWN.into());
        return;
    };
    status.notice = None;
    status.final_swatch = Some(current.clone());
    recognizer.unbind();
    let delay = delay_secs(cfg.feed.reveal_delay_secs);
    let handle: TaskHandle = deferred.schedule(delay, FeedAction::RevealResult);
    debug!(target: "feed", "reveal scheduled ({handle:?})");
    next_state.set(AppState::Celebrating);
}

#[allow(clippy::too_many_arguments)]
fn handle_restart(
    mut commands: Commands,
    mut requests: EventReader<RestartRequested>,
    mut next_state: ResMut<NextState<AppState>>,
    mut engine: ResMut<PreferenceEngine>,
    mut recognizer: ResMut<SwipeRecognizer>,
    mut status: ResMut<FeedStatus>,
    mut deferred: ResMut<DeferredActions>,
    submit_status: Option<ResMut<SubmitStatus>>,
    roots: Query<Entity, With<FeedRoot>>,
    cards: Query<Entity, With<SwatchCard>>,
) {
    if requests.read().last().is_none() {
        return;
    }
    let dropped = deferred.len();
    deferred.clear();
    for card in &cards {
        commands.entity(card).despawn();
    }
    recognizer.unbind();
    engine.reset();
    *status = FeedStatus::default();
    if let Some(mut s) = submit_status {
        crate::telemetry::clear_submission(&mut s);
    }
    info!(target: "feed", "restart; cancelled {dropped} pending actions");
    next_state.set(AppState::Swiping);
    present_next(
        &mut commands,
        &mut engine,
        &mut recognizer,
        &mut status,
        roots.iter().next(),
    );
}
