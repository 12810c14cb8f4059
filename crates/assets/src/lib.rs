//! Asset loading: textures and glTF/GLB models, resolved against an asset root.
//!
//! Loads return `Result<_, AssetLoadError>`; dependent loads are chained with
//! `and_then` and can run on a worker thread, handing the result back through
//! a [`PendingLoad`]. Pixel and vertex data are not decoded here: a texture is
//! identified and measured from its header, a model is reduced to its mesh and
//! material metadata.
//!
//! # Invariants
//! - Asset ids are content hashes of the file bytes.
//! - A failed load never leaves partial state behind.

mod model;
mod pending;
mod texture;

pub use model::{MaterialInfo, MeshInfo, ModelAsset};
pub use pending::PendingLoad;
pub use texture::{TextureAsset, TextureFormat};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Content-addressed asset id: the first eight bytes of the SHA-256 of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AssetId {
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(head))
    }
}

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: unrecognised texture format", .path.display())]
    UnsupportedTexture { path: PathBuf },
    #[error("{}: unreadable image: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{}: invalid glTF: {source}", .path.display())]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },
    #[error("{}: model contains no meshes", .path.display())]
    NoMesh { path: PathBuf },
    #[error("asset loader stopped before delivering a result")]
    Disconnected,
}

/// The textured head: its color map and the model it is applied to.
#[derive(Debug, Clone)]
pub struct HeadAsset {
    pub texture: TextureAsset,
    pub model: ModelAsset,
}

/// Resolves asset paths against a root directory and loads them.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn texture(&self, relative: impl AsRef<Path>) -> Result<TextureAsset, AssetLoadError> {
        texture::load_texture(&self.resolve(relative))
    }

    pub fn model(&self, relative: impl AsRef<Path>) -> Result<ModelAsset, AssetLoadError> {
        model::load_model(&self.resolve(relative))
    }

    /// Load the color map, then the model it belongs to. The model is only
    /// read once the texture loaded successfully.
    pub fn head(
        &self,
        texture: impl AsRef<Path>,
        model: impl AsRef<Path>,
    ) -> Result<HeadAsset, AssetLoadError> {
        self.texture(texture)
            .and_then(|texture| self.model(model).map(|model| HeadAsset { texture, model }))
    }

    /// [`AssetLoader::head`] on a worker thread.
    pub fn spawn_head(
        &self,
        texture: impl Into<PathBuf>,
        model: impl Into<PathBuf>,
    ) -> PendingLoad<HeadAsset> {
        let loader = self.clone();
        let (texture, model) = (texture.into(), model.into());
        PendingLoad::spawn("head", move || loader.head(texture, model))
    }

    /// [`AssetLoader::texture`] on a worker thread.
    pub fn spawn_texture(&self, relative: impl Into<PathBuf>) -> PendingLoad<TextureAsset> {
        let loader = self.clone();
        let relative = relative.into();
        PendingLoad::spawn("texture", move || loader.texture(relative))
    }
}
