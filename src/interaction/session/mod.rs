pub mod auto_close;
pub mod config_hot_reload;
pub mod feed;

pub use feed::{
    present_next, DeferredActions, FeedAction, FeedPlugin, FeedStatus, FinalizeRequested,
    RestartRequested, NOTHING_SHOWN,
};
