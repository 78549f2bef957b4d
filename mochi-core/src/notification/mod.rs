//! Notification storage
//!
//! Holds notifications pushed by the phone app until each has been shown
//! for its display time.

pub mod item;
pub mod queue;

pub use item::{NotificationItem, NO_CONTENT, UNKNOWN_APP};
pub use queue::NotificationQueue;
