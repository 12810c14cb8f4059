use glam::Vec3;
use seascape_common::Color;
use seascape_scene::TextureHandle;

/// Inputs of the sky effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyUniforms {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    /// Unit vector towards the sun.
    pub sun_position: Vec3,
    /// Radius of the sky dome in world units.
    pub dome_radius: f32,
}

impl Default for SkyUniforms {
    fn default() -> Self {
        Self {
            turbidity: 2.0,
            rayleigh: 1.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            sun_position: Vec3::Y,
            dome_radius: 450_000.0,
        }
    }
}

/// Inputs of the water effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterUniforms {
    /// Phase of the wave animation.
    pub time: f32,
    pub distortion_scale: f32,
    pub alpha: f32,
    pub color: Color,
    pub sun_direction: Vec3,
    /// Height of the plane.
    pub level: f32,
    /// Edge length of the square plane.
    pub size: f32,
    pub normals: Option<TextureHandle>,
}

impl Default for WaterUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            distortion_scale: 3.7,
            alpha: 1.0,
            color: Color::from_rgb8(255, 0, 0),
            sun_direction: Vec3::new(0.70707, 0.70707, 0.0),
            level: -1.0,
            size: 1000.0,
            normals: None,
        }
    }
}

/// Renderer tone-mapping settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMapping {
    pub exposure: f32,
}

impl Default for ToneMapping {
    fn default() -> Self {
        Self { exposure: 1.0 }
    }
}
