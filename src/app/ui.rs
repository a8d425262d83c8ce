//! HUD around the feed: hint label, finalize / restart buttons, result panel
//! and the status line.
use bevy::prelude::*;

use super::state::AppState;
use crate::core::components::{FeedRoot, CARD_INSET, CARD_SIZE};
use crate::core::system::system_order::{FeedSet, PresentationSet};
use crate::interaction::session::{FeedStatus, FinalizeRequested, RestartRequested};
use crate::interaction::swipe::{SwipeHint, SwipeRecognizer};
use crate::telemetry::SubmitStatus;

pub const FINALIZE_LABEL: &str = "Submit Vote";
pub const FINALIZE_EXHAUSTED_LABEL: &str = "Submit Vote (No More Colors)";

#[derive(Component)]
struct HudRoot;
#[derive(Component)]
struct HintText;
#[derive(Component)]
struct StatusText;
#[derive(Component)]
struct FinalizeButton;
#[derive(Component)]
struct FinalizeLabel;
#[derive(Component)]
struct RestartButton;
#[derive(Component)]
struct CelebrationText;
#[derive(Component)]
struct ResultPanel;
#[derive(Component)]
struct ResultSwatch;
#[derive(Component)]
struct ResultText;

const BUTTON_IDLE: Color = Color::srgb(0.22, 0.22, 0.28);
const BUTTON_HOVER: Color = Color::srgb(0.32, 0.32, 0.40);
const INK: Color = Color::srgb(0.12, 0.12, 0.14);

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, handle_buttons.before(FeedSet))
            .add_systems(
                Update,
                (
                    update_hint_text,
                    update_finalize_label,
                    update_status_text,
                    update_stage_visibility,
                    update_result_panel,
                )
                    .in_set(PresentationSet),
            );
    }
}

pub fn hint_label(hint: SwipeHint) -> &'static str {
    match hint {
        SwipeHint::Neutral => "",
        SwipeHint::LeaningAccept => "LIKE",
        SwipeHint::LeaningReject => "DISLIKE",
    }
}

fn spawn_hud(mut commands: Commands) {
    let root = commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexStart,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(10.0),
                ..default()
            },
        ))
        .id();

    commands.entity(root).with_children(|p| {
        p.spawn((
            Text::new("Swipe UP to like, DOWN to dislike"),
            TextFont::from_font_size(18.0),
            TextColor(INK),
        ));
        p.spawn((
            HintText,
            Text::new(""),
            TextFont::from_font_size(26.0),
            TextColor(INK),
            Node {
                height: Val::Px(34.0),
                ..default()
            },
        ));
        // cards are parented here by the feed
        p.spawn((
            FeedRoot,
            Node {
                width: Val::Px(CARD_SIZE.x + 2.0 * CARD_INSET.x),
                height: Val::Px(CARD_SIZE.y + 2.0 * CARD_INSET.y),
                position_type: PositionType::Relative,
                ..default()
            },
        ));
        p.spawn((
            CelebrationText,
            Text::new("Nice pick!"),
            TextFont::from_font_size(32.0),
            TextColor(Color::srgb(0.85, 0.2, 0.35)),
            Node {
                display: Display::None,
                ..default()
            },
        ));
        p.spawn((
            ResultPanel,
            Node {
                display: Display::None,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                ResultSwatch,
                Node {
                    width: Val::Px(200.0),
                    height: Val::Px(200.0),
                    ..default()
                },
                BackgroundColor(Color::NONE),
                BorderRadius::all(Val::Px(100.0)),
            ));
            panel.spawn((
                ResultText,
                Text::new(""),
                TextFont::from_font_size(28.0),
                TextColor(INK),
            ));
        });
        p.spawn((
            StatusText,
            Text::new(""),
            TextFont::from_font_size(16.0),
            TextColor(INK),
        ));
        p.spawn(Node {
            column_gap: Val::Px(12.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn((FinalizeButton, button_node(), BackgroundColor(BUTTON_IDLE)))
                .with_child((FinalizeLabel, Text::new(FINALIZE_LABEL), TextColor(Color::WHITE)));
            row.spawn((RestartButton, button_node(), BackgroundColor(BUTTON_IDLE)))
                .with_child((Text::new("Restart"), TextColor(Color::WHITE)));
        });
    });
}

fn button_node() -> (Button, Node, BorderRadius) {
    (
        Button,
        Node {
            padding: UiRect::axes(Val::Px(18.0), Val::Px(10.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BorderRadius::all(Val::Px(8.0)),
    )
}

#[allow(clippy::type_complexity)]
fn handle_buttons(
    mut q: Query<
        (
            &Interaction,
            &mut BackgroundColor,
            Has<FinalizeButton>,
            Has<RestartButton>,
        ),
        (Changed<Interaction>, With<Button>),
    >,
    mut finalize: EventWriter<FinalizeRequested>,
    mut restart: EventWriter<RestartRequested>,
) {
    for (interaction, mut bg, is_finalize, is_restart) in &mut q {
        match interaction {
            Interaction::Pressed => {
                if is_finalize {
                    finalize.write(FinalizeRequested);
                }
                if is_restart {
                    restart.write(RestartRequested);
                }
            }
            Interaction::Hovered => bg.0 = BUTTON_HOVER,
            Interaction::None => bg.0 = BUTTON_IDLE,
        }
    }
}

fn update_hint_text(
    recognizer: Res<SwipeRecognizer>,
    mut q: Query<(&mut Text, &mut TextColor), With<HintText>>,
) {
    let Ok((mut text, mut color)) = q.single_mut() else {
        return;
    };
    let hint = recognizer.hint();
    let label = hint_label(hint);
    if text.as_str() != label {
        text.0 = label.to_string();
        color.0 = match hint {
            SwipeHint::LeaningAccept => Color::srgb(0.1, 0.6, 0.3),
            SwipeHint::LeaningReject => Color::srgb(0.75, 0.2, 0.2),
            SwipeHint::Neutral => INK,
        };
    }
}

fn update_finalize_label(
    status: Res<FeedStatus>,
    mut q: Query<&mut Text, With<FinalizeLabel>>,
) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    let label = if status.exhausted {
        FINALIZE_EXHAUSTED_LABEL
    } else {
        FINALIZE_LABEL
    };
    if text.as_str() != label {
        text.0 = label.to_string();
    }
}

fn update_status_text(
    feed: Res<FeedStatus>,
    submit: Option<Res<SubmitStatus>>,
    mut q: Query<&mut Text, With<StatusText>>,
) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    let msg = match (&feed.notice, submit.as_deref()) {
        (Some(notice), _) => notice.clone(),
        (None, Some(s)) => s.message(),
        (None, None) => String::new(),
    };
    if text.as_str() != msg {
        text.0 = msg;
    }
}

#[allow(clippy::type_complexity)]
fn update_stage_visibility(
    state: Res<State<AppState>>,
    mut q: ParamSet<(
        Query<&mut Node, With<FeedRoot>>,
        Query<&mut Node, With<CelebrationText>>,
        Query<&mut Node, With<ResultPanel>>,
        Query<&mut Node, With<FinalizeButton>>,
    )>,
) {
    if !state.is_changed() {
        return;
    }
    let s = *state.get();
    let show = |visible: bool| if visible { Display::Flex } else { Display::None };
    for mut n in &mut q.p0() {
        n.display = show(s == AppState::Swiping);
    }
    for mut n in &mut q.p1() {
        n.display = show(s == AppState::Celebrating);
    }
    for mut n in &mut q.p2() {
        n.display = show(s == AppState::Result);
    }
    for mut n in &mut q.p3() {
        n.display = show(s == AppState::Swiping);
    }
}

fn update_result_panel(
    feed: Res<FeedStatus>,
    mut swatch_q: Query<&mut BackgroundColor, With<ResultSwatch>>,
    mut text_q: Query<&mut Text, With<ResultText>>,
) {
    if !feed.is_changed() {
        return;
    }
    let Some(swatch) = feed.final_swatch.as_ref() else {
        return;
    };
    for mut bg in &mut swatch_q {
        bg.0 = swatch.color();
    }
    for mut text in &mut text_q {
        text.0 = format!("Color #{}", swatch.id());
    }
}
