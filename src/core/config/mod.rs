pub mod config;

pub use config::{
    AppConfig, FeedConfig, PaletteConfig, SampleRange, SubmitConfig, SwipeConfig, WindowConfig,
};
