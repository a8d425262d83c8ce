pub mod transport;

use bevy::prelude::*;

use crate::core::system::system_order::PointerInputSet;

pub use transport::{
    collect_pointer_events, MouseTransport, PointerEvent, PointerId, PointerPhase,
    PointerTransport, TouchTransport,
};

/// Feeds mouse + touch input into `PointerEvent`s. Needs bevy's input plugin.
pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerEvent>().add_systems(
            Update,
            collect_pointer_events.in_set(PointerInputSet),
        );
    }
}
