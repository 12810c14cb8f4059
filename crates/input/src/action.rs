use glam::Vec2;

/// A camera interaction produced by the windowing layer.
///
/// The frame clock consumes these through [`crate::InteractionQueue`], never raw
/// mouse or touch events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Rotate around the orbit target by a pointer delta in pixels.
    Orbit(Vec2),
    /// Slide the orbit target by a pointer delta in pixels.
    Pan(Vec2),
    /// Dolly in (positive) or out (negative) by wheel steps.
    Zoom(f32),
}

/// Accumulated interaction since the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraDelta {
    pub orbit: Vec2,
    pub pan: Vec2,
    pub zoom: f32,
}

impl CameraDelta {
    pub fn accumulate(&mut self, action: CameraAction) {
        match action {
            CameraAction::Orbit(d) => self.orbit += d,
            CameraAction::Pan(d) => self.pan += d,
            CameraAction::Zoom(steps) => self.zoom += steps,
        }
    }
}
