pub mod game;
pub mod state;
pub mod ui;
