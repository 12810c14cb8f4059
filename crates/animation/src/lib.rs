//! Oscillation animator: yoyo tweens on the vertical axis of scene nodes.
//!
//! # Invariants
//! - Task progress stays in [0, 1]; period is positive and finite.
//! - A finished pass reverses direction; tasks never complete.
//! - A task writes only `position.y` of its target.
//! - A task whose target is gone is skipped without error.

mod animator;
mod easing;
mod oscillation;

pub use animator::{Animator, TaskId};
pub use easing::cubic_in_out;
pub use oscillation::{Direction, OscillationTask};

/// Errors from task construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("oscillation period must be positive and finite, got {0} ms")]
    InvalidPeriod(f32),
    #[error("oscillation range must be finite, got [{low}, {high}]")]
    InvalidRange { low: f32, high: f32 },
}
