//! Face selection state machine
//!
//! Runs once per control-loop tick. Priority order:
//!
//! 1. Notification: an active notification interrupts everything
//! 2. Navigation: while the phone is connected and navigating
//! 3. Rotation: Time -> Weather -> Forecast, each for its dwell time,
//!    skipping faces that are disabled or have no data
//!
//! After face selection a disabled face is never left current, and the
//! redraw decision is made from the face change and per-face refresh
//! intervals.

use crate::config::{DisplayConfig, FaceConfig, RedrawIntervals};
use crate::face::Face;
use crate::{elapsed, Millis};

/// Per-tick inputs gathered from the queue, the cache and the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInputs {
    /// Phone app connected
    pub connection_active: bool,
    /// Phone reports an active route
    pub navigation_active: bool,
    /// A notification is within its display time
    pub notification_active: bool,
    /// Weather can be shown (live or cached)
    pub weather_available: bool,
    /// At least one forecast entry beyond current weather
    pub forecast_available: bool,
}

impl TickInputs {
    /// Check if a rotating face has the data it needs
    pub const fn has_data_for(&self, face: Face) -> bool {
        match face {
            Face::Weather => self.weather_available,
            Face::Forecast => self.forecast_available,
            _ => true,
        }
    }
}

/// Outcome of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision {
    /// Face to show
    pub face: Face,
    /// Renderer must redraw `face`
    pub redraw: bool,
    /// Face differs from the one at the start of the tick
    pub face_changed: bool,
    /// Renderer should dim briefly before drawing the new face
    pub transition: bool,
}

/// Scheduler state, owned by the control loop for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerState {
    /// Face currently selected
    pub current: Face,
    /// Face drawn by the last redraw
    pub previous: Face,
    /// When the rotation timer was last reset
    pub last_switch_ms: Millis,
    /// When the last redraw was requested
    pub last_redraw_ms: Millis,
    /// Explicit redraw request
    pub dirty: bool,
}

impl SchedulerState {
    /// Initial state: the first enabled rotating face, needing a draw
    pub fn new(faces: &FaceConfig) -> Self {
        let face = faces.enabled.resting_face();
        Self {
            current: face,
            previous: face,
            last_switch_ms: 0,
            last_redraw_ms: 0,
            dirty: true,
        }
    }
}

/// Decides which face is visible and whether it needs a redraw
#[derive(Debug, Clone)]
pub struct ModeScheduler {
    state: SchedulerState,
    redraw: RedrawIntervals,
}

impl ModeScheduler {
    /// Create a scheduler starting on the first enabled rotating face
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            state: SchedulerState::new(&config.faces),
            redraw: config.redraw,
        }
    }

    /// Create a scheduler from an explicit state
    pub fn with_state(state: SchedulerState, redraw: RedrawIntervals) -> Self {
        Self { state, redraw }
    }

    /// Current scheduler state
    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Face currently selected
    pub fn current(&self) -> Face {
        self.state.current
    }

    /// Force a redraw on the next tick
    pub fn mark_dirty(&mut self) {
        self.state.dirty = true;
    }

    /// Advance the state machine by one tick
    pub fn update(&mut self, now: Millis, inputs: &TickInputs, faces: &FaceConfig) -> Decision {
        let start = self.state.current;

        if faces.is_enabled(Face::Notification) && inputs.notification_active {
            self.state.current = Face::Notification;
        } else if faces.is_enabled(Face::Navigation)
            && inputs.connection_active
            && inputs.navigation_active
        {
            if self.state.current != Face::Navigation {
                self.state.current = Face::Navigation;
                self.state.last_switch_ms = now;
            }
        } else {
            self.rotate(now, inputs, faces);
        }

        // A disabled face is never reported as current
        if !faces.is_enabled(self.state.current) {
            let fallback = faces.enabled.first_enabled();
            if fallback != self.state.current {
                self.state.current = fallback;
                self.state.dirty = true;
            }
        }

        let face = self.state.current;
        let face_changed = face != start;
        let since_redraw = elapsed(now, self.state.last_redraw_ms);
        let periodic = self
            .redraw
            .get(face)
            .is_some_and(|interval| since_redraw >= interval);

        let redraw = self.state.dirty
            || face_changed
            || periodic
            || (!face.is_live() && face != self.state.previous);

        let transition = face_changed && self.state.previous != Face::Time;

        if redraw {
            self.state.previous = face;
            self.state.last_redraw_ms = now;
            self.state.dirty = false;
        }

        Decision {
            face,
            redraw,
            face_changed,
            transition,
        }
    }

    /// Timed rotation between Time, Weather and Forecast
    fn rotate(&mut self, now: Millis, inputs: &TickInputs, faces: &FaceConfig) {
        // Leaving navigation returns to the rotation without waiting
        if self.state.current == Face::Navigation {
            self.state.current = faces.enabled.resting_face();
            self.state.last_switch_ms = now;
        } else if let Some(dwell) = faces.dwell(self.state.current) {
            if elapsed(now, self.state.last_switch_ms) >= dwell {
                // Reset even when staying put, so the check does not fire
                // every tick once no alternative exists
                self.state.current = next_eligible(self.state.current, inputs, faces);
                self.state.last_switch_ms = now;
            }
        }

        // Notification queue drained while the notification face was up
        if self.state.current == Face::Notification {
            self.state.current = faces.enabled.resting_face();
        }
    }
}

/// Next enabled face with data in ring order, or `current` if there is none
fn next_eligible(current: Face, inputs: &TickInputs, faces: &FaceConfig) -> Face {
    let Some(pos) = Face::CYCLE.iter().position(|&f| f == current) else {
        return current;
    };

    (1..Face::CYCLE.len())
        .map(|step| Face::CYCLE[(pos + step) % Face::CYCLE.len()])
        .find(|&face| faces.is_enabled(face) && inputs.has_data_for(face))
        .unwrap_or(current)
}
