//! Color candidates and the like / dislike driven picker.
pub mod distance;
pub mod engine;
pub mod swatch;

pub use distance::{hue_gap, swatch_distance};
pub use engine::{PreferenceEngine, SelectionPhase, Verdict};
pub use swatch::Swatch;
