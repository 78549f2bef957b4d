//! Display faces
//!
//! A face is one of the mutually exclusive screens the scheduler can
//! select. Time, Weather and Forecast rotate on a timer; Notification and
//! Navigation interrupt the rotation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of faces
pub const FACE_COUNT: usize = 5;

/// Visual state selected by the mode scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    /// Clock face (hh:mm:ss)
    Time,
    /// Current weather conditions
    Weather,
    /// Multi-entry forecast
    Forecast,
    /// Active notification from the phone
    Notification,
    /// Turn-by-turn navigation
    Navigation,
}

impl Face {
    /// All faces in fallback priority order
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Time,
        Face::Weather,
        Face::Forecast,
        Face::Notification,
        Face::Navigation,
    ];

    /// Rotating faces in ring order
    pub const CYCLE: [Face; 3] = [Face::Time, Face::Weather, Face::Forecast];

    /// Stable index of this face (0-4)
    pub const fn index(self) -> usize {
        match self {
            Face::Time => 0,
            Face::Weather => 1,
            Face::Forecast => 2,
            Face::Notification => 3,
            Face::Navigation => 4,
        }
    }

    /// Check if this face takes part in the timed rotation
    pub const fn is_cyclic(self) -> bool {
        matches!(self, Face::Time | Face::Weather | Face::Forecast)
    }

    /// Check if this face redraws periodically while it stays visible
    pub const fn is_live(self) -> bool {
        matches!(self, Face::Time | Face::Navigation)
    }

    /// Short name used in logs and configuration keys
    pub const fn name(self) -> &'static str {
        match self {
            Face::Time => "time",
            Face::Weather => "weather",
            Face::Forecast => "forecast",
            Face::Notification => "notification",
            Face::Navigation => "navigation",
        }
    }

    /// Look up a face by its configuration key
    pub fn from_name(name: &str) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.name() == name)
    }
}

/// Set of enabled faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceSet {
    bits: u8,
}

impl Default for FaceSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FaceSet {
    /// Every face enabled
    pub const fn all() -> Self {
        Self { bits: 0b1_1111 }
    }

    /// No face enabled
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Build a set from a list of faces
    pub fn from_faces(faces: &[Face]) -> Self {
        faces.iter().fold(Self::empty(), |set, &face| set.with(face))
    }

    /// Return a copy with `face` enabled
    pub const fn with(self, face: Face) -> Self {
        Self {
            bits: self.bits | (1 << face.index()),
        }
    }

    /// Return a copy with `face` disabled
    pub const fn without(self, face: Face) -> Self {
        Self {
            bits: self.bits & !(1 << face.index()),
        }
    }

    /// Enable or disable a face in place
    pub fn set(&mut self, face: Face, enabled: bool) {
        *self = if enabled {
            self.with(face)
        } else {
            self.without(face)
        };
    }

    /// Check if a face is enabled
    pub const fn contains(self, face: Face) -> bool {
        self.bits & (1 << face.index()) != 0
    }

    /// Check if no face is enabled
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// First enabled rotating face (Time > Weather > Forecast)
    pub fn first_cyclic(self) -> Option<Face> {
        Face::CYCLE.into_iter().find(|&face| self.contains(face))
    }

    /// First enabled face in fallback priority order
    ///
    /// Returns `Face::Time` for an empty set so a definite face is always
    /// reported.
    pub fn first_enabled(self) -> Face {
        Face::ALL
            .into_iter()
            .find(|&face| self.contains(face))
            .unwrap_or(Face::Time)
    }

    /// Face the rotation returns to after an interruption
    ///
    /// Prefers the rotating faces and only falls back to the overall
    /// priority order when none of them is enabled.
    pub fn resting_face(self) -> Face {
        self.first_cyclic().unwrap_or_else(|| self.first_enabled())
    }

    /// Iterate over enabled faces in priority order
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |&face| self.contains(face))
    }
}
