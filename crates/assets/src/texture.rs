use crate::{AssetId, AssetLoadError};
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Image containers accepted for scene textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    Jpeg,
    Png,
}

impl TextureFormat {
    /// Identify the container from the leading bytes.
    pub fn guess(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

/// A texture file that has been read and identified. Only the header is
/// decoded; pixels stay on disk until a backend uploads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureAsset {
    pub id: AssetId,
    pub name: String,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
}

pub(crate) fn load_texture(path: &Path) -> Result<TextureAsset, AssetLoadError> {
    let _span = tracing::info_span!("load_texture", path = %path.display()).entered();
    let bytes = std::fs::read(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = TextureFormat::guess(&bytes).ok_or_else(|| AssetLoadError::UnsupportedTexture {
        path: path.to_path_buf(),
    })?;
    let (width, height) = ImageReader::with_format(Cursor::new(&bytes[..]), format.image_format())
        .into_dimensions()
        .map_err(|source| AssetLoadError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    let texture = TextureAsset {
        id: AssetId::of(&bytes),
        name: file_name(path),
        format,
        width,
        height,
        byte_len: bytes.len(),
    };
    tracing::debug!(?texture.format, width, height, bytes = texture.byte_len, "texture loaded");
    Ok(texture)
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
