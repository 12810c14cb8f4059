//! Scene graph: the single shared mutable resource of a running scene.
//!
//! # Invariants
//! - Nodes reference meshes, materials and textures by handle; clones share them.
//! - Node iteration order is deterministic (BTreeMap keyed by EntityId).
//! - Writers touch disjoint fields: animators own `position.y` of their target,
//!   parameter bindings own the materials they are bound to.

mod graph;

pub use graph::{
    Material, MaterialHandle, Mesh, MeshHandle, Motion, SceneGraph, SceneNode, Texture,
    TextureHandle,
};
