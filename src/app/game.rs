use bevy::prelude::*;

use super::ui::HudPlugin;
use crate::core::system::system_order::{FeedSet, PointerInputSet, PresentationSet, SwipeSet};
use crate::debug::DebugPlugin;
use crate::interaction::pointer::PointerInputPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::session::FeedPlugin;
use crate::interaction::swipe::SwipePlugin;
use crate::rendering::ScenePlugin;
use crate::telemetry::SubmitPlugin;

/// Everything on top of `DefaultPlugins`: input, gesture, feed, submission, UI.
pub struct SwatchAppPlugin;

impl Plugin for SwatchAppPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                PointerInputSet,
                SwipeSet.after(PointerInputSet),
                FeedSet.after(SwipeSet),
                PresentationSet.after(FeedSet),
            ),
        )
        .add_plugins((
            ScenePlugin,
            HudPlugin,
            PointerInputPlugin,
            SwipePlugin,
            FeedPlugin,
            SubmitPlugin,
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
    }
}
