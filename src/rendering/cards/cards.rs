//! Card motion: follow the finger while dragging, ease back on a cancelled
//! swipe, fly off (and fade) once a verdict is committed.
use bevy::prelude::*;

use crate::core::components::{SwatchCard, CARD_INSET};
use crate::core::config::AppConfig;
use crate::core::system::system_order::PresentationSet;
use crate::interaction::swipe::{SwipeVerdict, SwipeVisual};

/// Distance a departing card travels over `feed.departure_secs`.
pub const DEPART_TRAVEL: f32 = 600.0;
/// Exponential ease rate for the snap back after a cancelled swipe.
const SETTLE_RATE: f32 = 18.0;

/// Displayed (eased) motion, as opposed to the gesture target in [`SwipeVisual`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CardMotion {
    pub offset: f32,
    pub rotation_deg: f32,
    pub departed_secs: f32,
}

pub struct CardAnimationPlugin;

impl Plugin for CardAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>().add_systems(
            Update,
            (attach_card_motion, animate_cards)
                .chain()
                .in_set(PresentationSet),
        );
    }
}

fn attach_card_motion(mut commands: Commands, added: Query<Entity, Added<SwatchCard>>) {
    for e in &added {
        commands.entity(e).insert(CardMotion::default());
    }
}

/// Advances one card's displayed motion by `dt`. Returns the opacity to draw with.
pub fn step_motion(motion: &mut CardMotion, visual: &SwipeVisual, dt: f32, departure_secs: f32) -> f32 {
    if let Some(verdict) = visual.departing {
        let span = departure_secs.max(1e-3);
        motion.departed_secs += dt;
        let t = (motion.departed_secs / span).min(1.0);
        // accept leaves through the top, reject through the bottom
        let dir = match verdict {
            SwipeVerdict::Accept => -1.0,
            SwipeVerdict::Reject => 1.0,
        };
        let start = visual.offset;
        motion.offset = start + dir * DEPART_TRAVEL * t;
        motion.rotation_deg = visual.rotation_deg + dir * 15.0 * t;
        return 1.0 - t;
    }
    motion.departed_secs = 0.0;
    if visual.dragging {
        motion.offset = visual.offset;
        motion.rotation_deg = visual.rotation_deg;
    } else {
        let k = 1.0 - (-SETTLE_RATE * dt).exp();
        motion.offset += (visual.offset - motion.offset) * k;
        motion.rotation_deg += (visual.rotation_deg - motion.rotation_deg) * k;
        if motion.offset.abs() < 0.5 {
            motion.offset = visual.offset;
            motion.rotation_deg = visual.rotation_deg;
        }
    }
    1.0
}

fn animate_cards(
    time: Res<Time>,
    cfg: Res<AppConfig>,
    mut q: Query<(
        &SwatchCard,
        &SwipeVisual,
        &mut CardMotion,
        &mut Node,
        &mut Transform,
        &mut BackgroundColor,
    )>,
) {
    let dt = time.delta_secs();
    for (card, visual, mut motion, mut node, mut transform, mut bg) in &mut q {
        let alpha = step_motion(&mut motion, visual, dt, cfg.feed.departure_secs);
        node.top = Val::Px(CARD_INSET.y + motion.offset);
        transform.rotation = Quat::from_rotation_z(-motion.rotation_deg.to_radians());
        bg.0 = card.swatch.color().with_alpha(alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_follows_exactly() {
        let mut m = CardMotion::default();
        let v = SwipeVisual {
            dragging: true,
            offset: -42.0,
            rotation_deg: -2.1,
            departing: None,
        };
        assert_eq!(step_motion(&mut m, &v, 0.016, 0.5), 1.0);
        assert_eq!(m.offset, -42.0);
        assert_eq!(m.rotation_deg, -2.1);
    }

    #[test]
    fn settle_eases_back_to_rest() {
        let mut m = CardMotion {
            offset: 80.0,
            rotation_deg: 4.0,
            departed_secs: 0.0,
        };
        let v = SwipeVisual::default();
        step_motion(&mut m, &v, 0.016, 0.5);
        assert!(m.offset > 0.0 && m.offset < 80.0);
        for _ in 0..120 {
            step_motion(&mut m, &v, 0.016, 0.5);
        }
        assert_eq!(m.offset, 0.0);
        assert_eq!(m.rotation_deg, 0.0);
    }

    #[test]
    fn accepted_card_rises_and_fades() {
        let mut m = CardMotion::default();
        let v = SwipeVisual {
            dragging: false,
            offset: -120.0,
            rotation_deg: -6.0,
            departing: Some(SwipeVerdict::Accept),
        };
        let alpha = step_motion(&mut m, &v, 0.25, 0.5);
        assert!((alpha - 0.5).abs() < 1e-5);
        assert!(m.offset < -120.0);
        let alpha = step_motion(&mut m, &v, 0.5, 0.5);
        assert_eq!(alpha, 0.0);
        assert!((m.offset - (-120.0 - DEPART_TRAVEL)).abs() < 1e-3);
    }

    #[test]
    fn rejected_card_drops() {
        let mut m = CardMotion::default();
        let v = SwipeVisual {
            dragging: false,
            offset: 100.0,
            rotation_deg: 5.0,
            departing: Some(SwipeVerdict::Reject),
        };
        step_motion(&mut m, &v, 0.1, 0.5);
        assert!(m.offset > 100.0);
    }
}
