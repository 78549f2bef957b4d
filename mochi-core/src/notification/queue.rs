//! Bounded notification queue with time-based expiry
//!
//! Items are kept in arrival order. A newly pushed item always becomes the
//! active one and starts its own display timer; when the active item times
//! out it is removed and the oldest remaining item is shown next with a
//! fresh timer.

use heapless::Vec;

use super::item::NotificationItem;
use crate::config::NotificationTiming;
use crate::{elapsed, Millis};

/// Fixed-capacity notification FIFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQueue<const C: usize> {
    items: Vec<NotificationItem, C>,
    active_index: usize,
    active_since: Millis,
    timing: NotificationTiming,
}

impl<const C: usize> NotificationQueue<C> {
    const NONZERO_CAPACITY: () = assert!(C > 0, "notification queue needs capacity");

    /// Create an empty queue
    pub fn new(timing: NotificationTiming) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::NONZERO_CAPACITY;

        Self {
            items: Vec::new(),
            active_index: 0,
            active_since: 0,
            timing,
        }
    }

    /// Enqueue a notification and make it the active one
    ///
    /// When the queue is full the oldest item is evicted and returned.
    pub fn push(&mut self, item: NotificationItem, now: Millis) -> Option<NotificationItem> {
        let evicted = if self.items.is_full() {
            Some(self.items.remove(0))
        } else {
            None
        };

        // Cannot fail: a slot was freed above if the queue was full
        let _ = self.items.push(item);

        self.active_index = self.items.len() - 1;
        self.active_since = now;
        evicted
    }

    /// Remove the active notification once its display time has elapsed
    ///
    /// Returns the removed item. The next item (the oldest remaining) becomes
    /// active immediately with a fresh timer. Does nothing if the active
    /// item is still within its display time.
    pub fn expire(&mut self, now: Millis, navigation_active: bool) -> Option<NotificationItem> {
        if self.items.is_empty() {
            return None;
        }

        if elapsed(now, self.active_since) < self.timeout(navigation_active) {
            return None;
        }

        let removed = self.items.remove(self.active_index);
        self.active_index = 0;
        if !self.items.is_empty() {
            self.active_since = now;
        }
        Some(removed)
    }

    /// Check if a notification is currently within its display time
    pub fn has_active(&self, now: Millis, navigation_active: bool) -> bool {
        !self.items.is_empty()
            && elapsed(now, self.active_since) < self.timeout(navigation_active)
    }

    /// Display timeout for the given navigation context
    pub fn timeout(&self, navigation_active: bool) -> Millis {
        self.timing.timeout(navigation_active)
    }

    /// The notification being shown, if any
    pub fn active(&self) -> Option<&NotificationItem> {
        self.items.get(self.active_index)
    }

    /// Index of the active notification
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Timestamp the active notification started displaying
    pub fn active_since(&self) -> Millis {
        self.active_since
    }

    /// 1-based position of the active item and the queue length ("2/4")
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.active_index + 1, self.items.len()))
        }
    }

    /// Number of queued notifications
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queue capacity
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Queued notifications in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &NotificationItem> {
        self.items.iter()
    }
}
