//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod tick;

pub use controller::controller_task;
pub use tick::tick_task;
