pub mod cards;

pub use cards::{CardAnimationPlugin, CardMotion};
