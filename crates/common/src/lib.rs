//! Shared types used across the seascape workspace.

mod types;

pub use types::{Color, EntityId, Transform};
