//! wgpu render backend for the seascape.
//!
//! Draws a full-screen sky, the water plane and one instanced cube per scene
//! node, colored by its material. The shading is stylised, not physically based.
//!
//! # Invariants
//! - Renderer never mutates world state.
//! - Everything drawn is derived from the submitted [`seascape_render::Frame`].

mod gpu;
mod shaders;

pub use gpu::{WgpuFrameTarget, WgpuRenderer};
