//! Face renderer trait

use crate::controller::FaceView;
use crate::face::Face;

/// Draws faces on the panel
///
/// The core only decides what to show; layouts, fonts and icons belong to
/// the implementation.
pub trait FaceRenderer {
    /// Driver-specific error
    type Error;

    /// Dim (`true`) or restore (`false`) the panel brightness
    fn set_dimmed(&mut self, dimmed: bool) -> Result<(), Self::Error>;

    /// Draw `face` from the data in `view`
    fn render(&mut self, face: Face, view: &FaceView<'_>) -> Result<(), Self::Error>;
}
