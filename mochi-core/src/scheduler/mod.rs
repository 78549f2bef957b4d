//! Face scheduling

pub mod mode;

pub use mode::{Decision, ModeScheduler, SchedulerState, TickInputs};
