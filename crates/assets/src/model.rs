use crate::texture::file_name;
use crate::{AssetId, AssetLoadError};
use gltf::{Gltf, Material, Mesh, Semantic};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshInfo {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub name: String,
    pub base_color: [f32; 4],
}

/// Mesh and material metadata of a glTF model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub id: AssetId,
    /// Name of the default scene, or the file name when it has none.
    pub name: String,
    pub meshes: Vec<MeshInfo>,
    pub materials: Vec<MaterialInfo>,
}

impl ModelAsset {
    pub fn vertex_count(&self) -> u32 {
        self.meshes.iter().map(|m| m.vertex_count).sum()
    }

    pub fn index_count(&self) -> u32 {
        self.meshes.iter().map(|m| m.index_count).sum()
    }
}

/// Accepts both the binary container and plain glTF JSON.
pub(crate) fn load_model(path: &Path) -> Result<ModelAsset, AssetLoadError> {
    let _span = tracing::info_span!("load_model", path = %path.display()).entered();
    let bytes = std::fs::read(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let gltf = Gltf::from_slice(&bytes).map_err(|source| AssetLoadError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let meshes: Vec<MeshInfo> = gltf.meshes().map(mesh_info).collect();
    if meshes.is_empty() {
        return Err(AssetLoadError::NoMesh {
            path: path.to_path_buf(),
        });
    }

    let name = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .and_then(|scene| scene.name().map(str::to_owned))
        .unwrap_or_else(|| file_name(path));

    let model = ModelAsset {
        id: AssetId::of(&bytes),
        name,
        meshes,
        materials: gltf.materials().enumerate().map(material_info).collect(),
    };
    tracing::debug!(
        meshes = model.meshes.len(),
        vertices = model.vertex_count(),
        embedded = gltf.blob.is_some(),
        "model loaded"
    );
    Ok(model)
}

fn mesh_info(mesh: Mesh<'_>) -> MeshInfo {
    let mut info = MeshInfo {
        name: mesh
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index())),
        vertex_count: 0,
        index_count: 0,
    };
    for primitive in mesh.primitives() {
        info.vertex_count += primitive
            .get(&Semantic::Positions)
            .map_or(0, |positions| positions.count() as u32);
        info.index_count += primitive
            .indices()
            .map_or(0, |indices| indices.count() as u32);
    }
    info
}

fn material_info((i, material): (usize, Material<'_>)) -> MaterialInfo {
    MaterialInfo {
        name: material
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("material_{i}")),
        base_color: material.pbr_metallic_roughness().base_color_factor(),
    }
}
