//! Parameter panel binding: compile-time schemas of numeric controls.
//!
//! A group is a plain struct of [`ParamSpec`] fields with an enum naming each
//! field. A [`Binding`] pairs a group with the function that re-derives scene
//! state from it.
//!
//! # Invariants
//! - Recompute runs once when a group is bound and exactly once per value change.
//! - Recompute always sees the full group, never a single field.
//! - Values written through a binding are clamped to `[min, max]` and snapped to `step`.

mod binding;
mod groups;
mod spec;

pub use binding::Binding;
pub use groups::{HeadColorField, HeadColorParams, SkyField, SkyParams};
pub use spec::{ParamSpec, ParameterGroup};

/// Errors from parameter schema validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("{field}: value, bounds and step must be finite")]
    NotFinite { field: &'static str },
    #[error("{field}: min {min} exceeds max {max}")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field}: step must be positive, got {step}")]
    NonPositiveStep { field: &'static str, step: f32 },
    #[error("{field}: value {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
