//! Collaborator traits
//!
//! These traits define the interface between the scheduling core and the
//! board: where time comes from and who draws the faces.

pub mod clock;
pub mod renderer;

pub use clock::Clock;
pub use renderer::FaceRenderer;
