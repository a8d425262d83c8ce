pub mod pointer;
pub mod session;
pub mod swipe;
