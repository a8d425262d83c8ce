pub mod recognizer;
pub mod systems;

use bevy::prelude::*;

use crate::core::config::AppConfig;
use crate::core::system::system_order::{PointerInputSet, SwipeSet};
use crate::interaction::pointer::PointerEvent;

pub use recognizer::{SwipeEffect, SwipeHint, SwipeRecognizer, SwipeStep, SwipeVerdict};
pub use systems::{drive_swipe, SwipeCommitted, SwipeVisual};

pub struct SwipePlugin;

impl Plugin for SwipePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>();
        if !app.world().contains_resource::<SwipeRecognizer>() {
            let swipe_cfg = app.world().resource::<AppConfig>().swipe;
            app.insert_resource(SwipeRecognizer::<Entity>::new(swipe_cfg));
        }
        app.add_event::<PointerEvent>()
            .add_event::<SwipeCommitted>()
            .configure_sets(Update, SwipeSet.after(PointerInputSet))
            .add_systems(
                Update,
                (
                    systems::sync_swipe_config.run_if(resource_changed::<AppConfig>),
                    drive_swipe,
                )
                    .chain()
                    .in_set(SwipeSet),
            );
    }
}
