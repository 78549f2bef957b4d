//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! The wireless transport delivers decoded phone events into `LINK_EVENTS`;
//! the controller task is the only consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use mochi_core::state::LinkEvent;

/// Channel capacity for link events
const LINK_EVENT_CHANNEL_SIZE: usize = 8;

/// Events from the phone link (connection, navigation, weather, notifications)
pub static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, LINK_EVENT_CHANNEL_SIZE> =
    Channel::new();
