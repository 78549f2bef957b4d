//! Notification items delivered by the phone app

use heapless::String;

use crate::config::{MAX_APP_LEN, MAX_MESSAGE_LEN, MAX_TITLE_LEN};
use crate::{truncated, Millis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placeholder shown when the app name is empty
pub const UNKNOWN_APP: &str = "Unknown App";

/// Placeholder shown when both message and title are empty
pub const NO_CONTENT: &str = "No content";

/// A single notification, immutable once enqueued
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotificationItem {
    app: String<MAX_APP_LEN>,
    title: String<MAX_TITLE_LEN>,
    message: String<MAX_MESSAGE_LEN>,
    received_ms: Millis,
}

impl NotificationItem {
    /// Create a notification, truncating fields that exceed their capacity
    pub fn new(app: &str, title: &str, message: &str, received_ms: Millis) -> Self {
        Self {
            app: truncated(app),
            title: truncated(title),
            message: truncated(message),
            received_ms,
        }
    }

    /// Raw app name (may be empty)
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Raw title (may be empty)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw message (may be empty)
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Arrival timestamp
    pub fn received_ms(&self) -> Millis {
        self.received_ms
    }

    /// App name for the header line
    pub fn app_label(&self) -> &str {
        if self.app.is_empty() {
            UNKNOWN_APP
        } else {
            &self.app
        }
    }

    /// Body text: the message, else the title, else a placeholder
    pub fn body(&self) -> &str {
        if !self.message.is_empty() {
            &self.message
        } else if !self.title.is_empty() {
            &self.title
        } else {
            NO_CONTENT
        }
    }
}
