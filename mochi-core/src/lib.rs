//! Board-agnostic core logic for the Mochi companion display
//!
//! This crate contains everything that decides what the OLED shows,
//! independent of the panel driver and the wireless transport:
//!
//! - Face identifiers and enabled-face sets
//! - Mode scheduler (which face is visible, when to redraw)
//! - Bounded notification queue with time-based expiry
//! - Weather snapshot cache with a staleness window
//! - City name marquee timing
//! - Configuration types and the embedded TOML parser
//! - Collaborator traits (clock, face renderer)
//!
//! All state is volatile and owned by a single control loop. Every
//! operation here is a total, synchronous function of time and flags.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod face;
pub mod marquee;
pub mod notification;
pub mod scheduler;
pub mod state;
pub mod traits;
pub mod weather;

pub use controller::{Controller, FaceView};
pub use face::{Face, FaceSet};

/// Milliseconds since boot, as reported by the monotonic clock
pub type Millis = u32;

/// Time elapsed between `since` and `now`
///
/// Uses wrapping arithmetic so an unsigned clock behaves like the hardware
/// counter it is read from.
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// Copy `s` into a bounded string, cutting at the last char boundary that fits
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    let mut out = heapless::String::new();
    // Cannot fail: `end <= N`
    let _ = out.push_str(&s[..end]);
    out
}
