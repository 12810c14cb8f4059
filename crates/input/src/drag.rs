use crate::CameraAction;
use glam::Vec2;

/// Pointer buttons that steer the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Turns pointer motion into camera actions while buttons are held.
///
/// Buttons are tracked independently: releasing one never ends a drag held by
/// another. The primary button orbits; secondary or middle pans.
#[derive(Debug, Clone, Default)]
pub struct PointerDrag {
    primary: bool,
    secondary: bool,
    middle: bool,
    last: Option<Vec2>,
}

impl PointerDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: PointerButton) {
        *self.slot(button) = true;
    }

    pub fn release(&mut self, button: PointerButton) {
        *self.slot(button) = false;
    }

    /// Forget every held button, e.g. when the window loses focus and
    /// releases can no longer be observed.
    pub fn release_all(&mut self) {
        if self.is_dragging() {
            tracing::debug!("pointer drag cancelled");
        }
        self.primary = false;
        self.secondary = false;
        self.middle = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.primary || self.secondary || self.middle
    }

    /// The pointer left the window; the next position starts a fresh delta.
    pub fn leave(&mut self) {
        self.last = None;
    }

    /// Record a pointer position and return the action for the motion since
    /// the previous one, if a button is held.
    pub fn moved(&mut self, position: Vec2) -> Option<CameraAction> {
        let last = self.last.replace(position)?;
        let delta = position - last;
        if self.primary {
            Some(CameraAction::Orbit(delta))
        } else if self.secondary || self.middle {
            Some(CameraAction::Pan(delta))
        } else {
            None
        }
    }

    fn slot(&mut self, button: PointerButton) -> &mut bool {
        match button {
            PointerButton::Primary => &mut self.primary,
            PointerButton::Secondary => &mut self.secondary,
            PointerButton::Middle => &mut self.middle,
        }
    }
}
