use seascape_common::{Color, EntityId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A handle referencing a mesh registered with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// A handle referencing a material registered with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// A handle referencing a texture registered with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Mesh metadata. Vertex data stays with the asset loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
}

/// Surface material. `color` multiplies the texture and may exceed 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub color: Color,
    pub texture: Option<TextureHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            color: Color::WHITE,
            texture: None,
        }
    }
}

/// A texture known to the scene, identified by the content hash of its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    pub content_id: u64,
}

/// Whether a node is driven by an oscillation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    Static,
    Animated,
}

/// A placed, independently transformable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
    pub motion: Motion,
}

/// The scene graph: nodes plus the mesh, material and texture tables they share.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, SceneNode>,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    textures: Vec<Texture>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read-only access to all nodes (BTreeMap for deterministic iteration).
    pub fn nodes(&self) -> &BTreeMap<EntityId, SceneNode> {
        &self.nodes
    }

    /// Insert a node and return its new id.
    pub fn spawn(&mut self, node: SceneNode) -> EntityId {
        let id = EntityId::new();
        self.spawn_with_id(id, node);
        id
    }

    /// Insert a node under an id chosen by the caller, replacing any node
    /// already stored there.
    pub fn spawn_with_id(&mut self, id: EntityId, node: SceneNode) {
        tracing::trace!(id = %id.short(), name = %node.name, "spawn node");
        self.nodes.insert(id, node);
    }

    /// Remove a node. Returns it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<SceneNode> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() as u32 - 1)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle(self.materials.len() as u32 - 1)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0 as usize)
    }

    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(handle.0 as usize)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        self.textures.push(texture);
        TextureHandle(self.textures.len() as u32 - 1)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0 as usize)
    }

    /// Resolve the color a node is drawn with.
    pub fn node_color(&self, node: &SceneNode) -> Color {
        self.material(node.material)
            .map(|m| m.color)
            .unwrap_or(Color::WHITE)
    }

    /// Deterministic FNV-1a hash over nodes and materials, for cheap comparisons.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (id, node) in &self.nodes {
            mix(&mut h, id.0.as_bytes());
            let t = &node.transform;
            for v in [t.position, t.rotation, t.scale] {
                mix(&mut h, &v.x.to_le_bytes());
                mix(&mut h, &v.y.to_le_bytes());
                mix(&mut h, &v.z.to_le_bytes());
            }
            mix(&mut h, &node.mesh.0.to_le_bytes());
            mix(&mut h, &node.material.0.to_le_bytes());
        }
        for m in &self.materials {
            mix(&mut h, &m.color.r.to_le_bytes());
            mix(&mut h, &m.color.g.to_le_bytes());
            mix(&mut h, &m.color.b.to_le_bytes());
        }
        h
    }
}
