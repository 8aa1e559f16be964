//! Embassy task implementations

pub mod display;
pub mod net;
pub mod server;

pub use display::display_task;
