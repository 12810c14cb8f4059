use crate::placement::{IntRange, PlacementError, PlacementSpec};
use glam::Vec3;
use seascape_params::{HeadColorParams, ParamError, ParameterGroup, SkyParams};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Params(#[from] ParamError),
}

/// Every tunable constant of the scene. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub water: WaterConfig,
    pub sky: SkyConfig,
    pub heads: HeadsConfig,
    pub front_head: FrontHeadConfig,
    pub hero: HeroConfig,
    pub camera: CameraConfig,
    /// Oscillation time advanced per frame tick, in milliseconds.
    pub frame_step_ms: f32,
    pub assets: AssetPaths,
    /// Starting values and slider bounds of the "Sky" panel.
    pub sky_panel: SkyParams,
    /// Starting values and slider bounds of the "Head" panel.
    pub head_color: HeadColorParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            water: WaterConfig::default(),
            sky: SkyConfig::default(),
            heads: HeadsConfig::default(),
            front_head: FrontHeadConfig::default(),
            hero: HeroConfig::default(),
            camera: CameraConfig::default(),
            frame_step_ms: 1000.0 / 60.0,
            assets: AssetPaths::default(),
            sky_panel: SkyParams::default(),
            head_color: HeadColorParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Phase added to the water time uniform per tick.
    pub phase_increment: f64,
    pub size: f32,
    pub level: f32,
    pub distortion_scale: f32,
    pub alpha: f32,
    pub color: [u8; 3],
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            phase_increment: 1.0 / (60.0 * 50.0),
            size: 1000.0,
            level: -1.0,
            distortion_scale: 3.7,
            alpha: 1.0,
            color: [255, 0, 0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Uniform scale of the sky dome.
    pub scale: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self { scale: 450_000.0 }
    }
}

/// The randomly scattered bobbing heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadsConfig {
    pub count: usize,
    pub x: IntRange,
    pub z: IntRange,
    pub period_ms: IntRange,
    pub bob_low: f32,
    pub bob_high: f32,
}

impl Default for HeadsConfig {
    fn default() -> Self {
        Self {
            count: 20,
            x: IntRange::new(-100, 100),
            z: IntRange::new(0, 100),
            period_ms: IntRange::new(3000, 12000),
            bob_low: -3.0,
            bob_high: -1.0,
        }
    }
}

impl HeadsConfig {
    pub fn placement(&self) -> PlacementSpec {
        PlacementSpec {
            count: self.count,
            x: self.x,
            z: self.z,
            period_ms: self.period_ms,
            bob_low: self.bob_low,
            bob_high: self.bob_high,
        }
    }
}

/// The single head bobbing right in front of the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontHeadConfig {
    pub position: Vec3,
    pub period_ms: f32,
}

impl Default for FrontHeadConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(-0.3, -2.1, 8.0),
            period_ms: 8000.0,
        }
    }
}

/// The large, static, textured head on the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -1.0, -400.0),
            rotation: Vec3::new(-PI / 2.0, PI / 6.0, PI / 2.0),
            scale: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 0.1),
        }
    }
}

/// Asset locations, relative to `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub root: PathBuf,
    pub water_normals: PathBuf,
    pub head_texture: PathBuf,
    pub head_model: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            water_normals: PathBuf::from("water/Water_1_M_Normal.jpg"),
            head_texture: PathBuf::from("model/Map-COL.jpg"),
            head_model: PathBuf::from("model/LeePerrySmith.glb"),
        }
    }
}

impl SceneConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("water.phase_increment", self.water.phase_increment)?;
        positive("water.size", self.water.size as f64)?;
        positive("sky.scale", self.sky.scale as f64)?;
        positive("frame_step_ms", self.frame_step_ms as f64)?;
        positive("front_head.period_ms", self.front_head.period_ms as f64)?;
        positive("hero.scale", self.hero.scale as f64)?;
        positive("camera.fov_degrees", self.camera.fov_degrees as f64)?;
        positive("camera.near", self.camera.near as f64)?;
        if self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid {
                field: "camera.far",
                reason: format!(
                    "must exceed near ({}), got {}",
                    self.camera.near, self.camera.far
                ),
            });
        }
        self.heads.placement().validate()?;
        self.sky_panel.validate()?;
        self.head_color.validate()?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}
