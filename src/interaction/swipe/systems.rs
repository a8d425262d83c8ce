use bevy::prelude::*;

use super::recognizer::{SwipeEffect, SwipeRecognizer, SwipeVerdict};
use crate::core::config::AppConfig;
use crate::interaction::pointer::{PointerEvent, PointerPhase};

/// Emitted once per committed swipe; the accept / reject callback of the bound card.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SwipeCommitted {
    pub target: Entity,
    pub verdict: SwipeVerdict,
}

/// Gesture-driven visual state of a swipeable card. Presentation reads it,
/// the swipe driver writes it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeVisual {
    /// Follow the pointer 1:1 (no easing) while set.
    pub dragging: bool,
    pub offset: f32,
    pub rotation_deg: f32,
    pub departing: Option<SwipeVerdict>,
}

impl SwipeVisual {
    pub fn apply(&mut self, effect: SwipeEffect) {
        match effect {
            SwipeEffect::Grab => self.dragging = true,
            SwipeEffect::Drag {
                offset,
                rotation_deg,
                ..
            } => {
                self.offset = offset;
                self.rotation_deg = rotation_deg;
            }
            SwipeEffect::Settle => {
                self.dragging = false;
                self.offset = 0.0;
                self.rotation_deg = 0.0;
            }
            SwipeEffect::Depart(verdict) => {
                self.dragging = false;
                self.departing = Some(verdict);
            }
        }
    }
}

/// Runs pointer events through the recognizer. A swipe may only start while
/// the bound card reports `Interaction::Pressed`, i.e. the press landed on it.
pub fn drive_swipe(
    mut events: EventReader<PointerEvent>,
    mut recognizer: ResMut<SwipeRecognizer>,
    mut cards: Query<(&mut SwipeVisual, &Interaction)>,
    mut committed: EventWriter<SwipeCommitted>,
) {
    for ev in events.read() {
        if ev.phase == PointerPhase::Start {
            let Some(target) = recognizer.target() else {
                continue;
            };
            let pressed = cards
                .get(target)
                .is_ok_and(|(_, interaction)| *interaction == Interaction::Pressed);
            if !pressed {
                continue;
            }
        }
        let Some(step) = recognizer.handle(ev) else {
            continue;
        };
        if let Ok((mut visual, _)) = cards.get_mut(step.target) {
            visual.apply(step.effect);
        }
        if let SwipeEffect::Depart(verdict) = step.effect {
            info!(target: "swipe", "card {:?} committed {verdict:?}", step.target);
            committed.write(SwipeCommitted {
                target: step.target,
                verdict,
            });
        }
    }
}

pub fn sync_swipe_config(cfg: Res<AppConfig>, mut recognizer: ResMut<SwipeRecognizer>) {
    if *recognizer.config() != cfg.swipe {
        debug!(target: "swipe", "thresholds updated: {:?}", cfg.swipe);
        recognizer.set_config(cfg.swipe);
    }
}
