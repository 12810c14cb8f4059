//! Camera interaction: pointer input mapped to orbit/pan/zoom actions.
//!
//! # Invariants
//! - Input arriving between ticks is merged and applied once, at the next tick.
//! - A tick with no input since the previous one leaves the camera untouched.
//! - A pointer drag lasts only while its button is held.

pub mod action;
mod drag;

pub use action::{CameraAction, CameraDelta};
pub use drag::{PointerButton, PointerDrag};

/// Pending camera interaction, filled by event handlers and drained by the frame clock.
#[derive(Debug, Default)]
pub struct InteractionQueue {
    pending: Option<CameraDelta>,
}

impl InteractionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: CameraAction) {
        tracing::trace!(?action, "camera input");
        self.pending
            .get_or_insert_with(CameraDelta::default)
            .accumulate(action);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take everything accumulated since the last call.
    pub fn take(&mut self) -> Option<CameraDelta> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn empty_queue_yields_nothing() {
        let mut queue = InteractionQueue::new();
        assert!(!queue.is_pending());
        assert!(queue.take().is_none());
    }

    #[test]
    fn take_drains_merged_input() {
        let mut queue = InteractionQueue::new();
        queue.push(CameraAction::Orbit(Vec2::new(2.0, 0.0)));
        queue.push(CameraAction::Zoom(1.0));
        assert!(queue.is_pending());

        let delta = queue.take().unwrap();
        assert_eq!(delta.orbit, Vec2::new(2.0, 0.0));
        assert_eq!(delta.zoom, 1.0);
        assert!(queue.take().is_none());
    }
}
