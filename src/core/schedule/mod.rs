pub mod deferred;

pub use deferred::{delay_secs, Scheduler, TaskHandle};
