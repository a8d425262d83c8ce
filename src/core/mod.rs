pub mod components;
pub mod config;
pub mod schedule;
pub mod system;
