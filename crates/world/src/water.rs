use crate::config::WaterConfig;
use seascape_common::Color;
use seascape_render::WaterUniforms;

/// The animated water plane.
///
/// The phase accumulates in `f64` and only the uniform sees the `f32` copy,
/// so long sessions do not lose increments to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterSurface {
    phase: f64,
    increment: f64,
    pub uniforms: WaterUniforms,
}

impl WaterSurface {
    pub fn new(config: &WaterConfig) -> Self {
        let [r, g, b] = config.color;
        Self {
            phase: 0.0,
            increment: config.phase_increment,
            uniforms: WaterUniforms {
                time: 0.0,
                distortion_scale: config.distortion_scale,
                alpha: config.alpha,
                color: Color::from_rgb8(r, g, b),
                level: config.level,
                size: config.size,
                ..WaterUniforms::default()
            },
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Advance by one tick's increment.
    pub fn advance(&mut self) {
        self.phase += self.increment;
        self.uniforms.time = self.phase as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_thousand_ticks_make_one_unit() {
        let mut water = WaterSurface::new(&WaterConfig::default());
        for _ in 0..3000 {
            water.advance();
        }
        assert!((water.phase() - 1.0).abs() < 1e-9);
        assert!((water.uniforms.time - 1.0).abs() < 1e-6);
    }

    #[test]
    fn phase_strictly_increases() {
        let mut water = WaterSurface::new(&WaterConfig::default());
        let mut last = water.phase();
        for _ in 0..100 {
            water.advance();
            assert!(water.phase() > last);
            last = water.phase();
        }
    }

    #[test]
    fn uniforms_follow_config() {
        let water = WaterSurface::new(&WaterConfig::default());
        assert_eq!(water.uniforms.color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(water.uniforms.distortion_scale, 3.7);
        assert_eq!(water.uniforms.size, 1000.0);
        assert!(water.uniforms.normals.is_none());
    }
}
