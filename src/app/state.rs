use bevy::prelude::*;

/// High-level session state.
/// Swiping -> Celebrating -> Result -> (restart) Swiping
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Cards are presented and swipeable.
    #[default]
    Swiping,
    /// Finalize pressed; waiting out the reveal delay.
    Celebrating,
    /// Final color shown and submitted.
    Result,
}
