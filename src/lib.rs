pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod preference;
pub mod rendering;
pub mod telemetry;

// Curated re-exports
pub use app::game::SwatchAppPlugin;
pub use app::state::AppState;
pub use crate::core::config::{AppConfig, WindowConfig};
pub use preference::{PreferenceEngine, Swatch};
