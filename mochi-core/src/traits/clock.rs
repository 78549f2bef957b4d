//! Monotonic time source

use crate::Millis;

/// Monotonic millisecond clock
///
/// The value may wrap; all consumers compare timestamps with
/// [`crate::elapsed`].
pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> Millis;
}
