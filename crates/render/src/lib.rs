//! Rendering adapter: everything a backend needs to draw one frame.
//!
//! # Invariants
//! - Renderers read a [`Frame`]; they never mutate the scene.
//! - Sky, water and tone mapping are plain uniform values written by the world.
//!
//! The [`DebugTextRenderer`] is the headless backend used by the CLI and tests;
//! the wgpu backend lives in `seascape-render-wgpu`.

mod camera;
mod renderer;
mod uniforms;

pub use camera::OrbitCamera;
pub use renderer::{DebugTextRenderer, Frame, Renderer};
pub use uniforms::{SkyUniforms, ToneMapping, WaterUniforms};
