use bevy::prelude::*;

use crate::preference::Swatch;

/// A presented color card; carries the swatch its verdict will be recorded against.
#[derive(Component, Debug, Clone)]
pub struct SwatchCard {
    pub swatch: Swatch,
}

/// UI container new cards are parented to. Cards spawn at the root when absent.
#[derive(Component)]
pub struct FeedRoot;

/// Card footprint inside the feed area, in logical pixels.
pub const CARD_SIZE: Vec2 = Vec2::new(280.0, 380.0);
/// Rest position of a card's top-left corner inside the feed area.
pub const CARD_INSET: Vec2 = Vec2::new(10.0, 20.0);
