pub mod camera;
pub mod cards;

use bevy::prelude::*;

use camera::camera::CameraPlugin;
use cards::CardAnimationPlugin;

/// Camera plus card motion; everything drawn on screen outside the HUD.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CameraPlugin, CardAnimationPlugin));
    }
}
