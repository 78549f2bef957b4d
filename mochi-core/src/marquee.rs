//! City name marquee
//!
//! A city name wider than the weather face scrolls left one column at a
//! time. The marquee pauses at the start, steps until the last character is
//! visible, pauses again, then jumps back to the start. Offsets count
//! characters, not bytes.

use heapless::String;

use crate::config::{ScrollTiming, MAX_CITY_LEN};
use crate::{elapsed, truncated, Millis};

/// Scroll position for a single line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marquee {
    text: String<MAX_CITY_LEN>,
    offset: usize,
    paused: bool,
    pause_start_ms: Millis,
    last_step_ms: Millis,
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new()
    }
}

impl Marquee {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            offset: 0,
            paused: true,
            pause_start_ms: 0,
            last_step_ms: 0,
        }
    }

    /// Advance the marquee for `text`
    ///
    /// Returns true when the visible window moved.
    pub fn update(&mut self, text: &str, now: Millis, timing: &ScrollTiming) -> bool {
        let before = self.offset;
        let text: String<MAX_CITY_LEN> = truncated(text);

        if text != self.text {
            self.text = text;
            self.restart(now);
            return before != 0;
        }

        let len = self.text.chars().count();
        let width = usize::from(timing.visible_chars);
        if len <= width {
            self.offset = 0;
            return before != 0;
        }
        let end = len - width;

        if self.paused {
            if elapsed(now, self.pause_start_ms) < timing.pause_ms {
                return false;
            }
            if self.offset >= end {
                self.restart(now);
                return true;
            }
            self.paused = false;
            self.last_step_ms = now;
            return false;
        }

        if elapsed(now, self.last_step_ms) < timing.step_ms {
            return false;
        }

        self.offset += 1;
        self.last_step_ms = now;
        if self.offset >= end {
            self.paused = true;
            self.pause_start_ms = now;
        }
        true
    }

    /// Current offset in characters
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Text the marquee is tracking
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Visible part of the text for a window `width` characters wide
    pub fn window(&self, width: usize) -> &str {
        char_window(&self.text, self.offset, width)
    }

    /// Start over from the first character with a fresh pause
    pub fn reset(&mut self, now: Millis) {
        self.restart(now);
    }

    fn restart(&mut self, now: Millis) {
        self.offset = 0;
        self.paused = true;
        self.pause_start_ms = now;
    }
}

/// Slice of `text` covering `width` characters starting at character `offset`
pub(crate) fn char_window(text: &str, offset: usize, width: usize) -> &str {
    let mut bounds = text.char_indices().map(|(i, _)| i);
    let Some(start) = bounds.nth(offset) else {
        return "";
    };
    let end = match width {
        0 => start,
        _ => bounds.nth(width - 1).unwrap_or(text.len()),
    };
    &text[start..end]
}
