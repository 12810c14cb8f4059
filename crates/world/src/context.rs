use crate::config::SceneConfig;
use crate::water::WaterSurface;
use seascape_animation::Animator;
use seascape_input::InteractionQueue;
use seascape_render::{Frame, OrbitCamera, SkyUniforms, ToneMapping};
use seascape_scene::SceneGraph;

/// All mutable world state, passed explicitly to placement, animation,
/// parameter recompute and the frame clock.
#[derive(Debug)]
pub struct WorldContext {
    pub scene: SceneGraph,
    pub animator: Animator,
    pub camera: OrbitCamera,
    pub interaction: InteractionQueue,
    pub water: WaterSurface,
    pub sky: SkyUniforms,
    pub tone_mapping: ToneMapping,
}

impl WorldContext {
    /// Empty scene with the sea, sky dome and camera set up from `config`.
    pub fn new(config: &SceneConfig) -> Self {
        let mut camera = OrbitCamera::looking_at(
            config.camera.position,
            glam::Vec3::ZERO,
            config.camera.fov_degrees.to_radians(),
        );
        camera.near = config.camera.near;
        camera.far = config.camera.far;

        Self {
            scene: SceneGraph::new(),
            animator: Animator::new(),
            camera,
            interaction: InteractionQueue::new(),
            water: WaterSurface::new(&config.water),
            sky: SkyUniforms {
                dome_radius: config.sky.scale,
                ..SkyUniforms::default()
            },
            tone_mapping: ToneMapping::default(),
        }
    }

    /// Borrow the current state as a renderable frame.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            scene: &self.scene,
            camera: &self.camera,
            sky: &self.sky,
            water: &self.water.uniforms,
            tone_mapping: self.tone_mapping,
        }
    }

    /// The viewport changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        tracing::debug!(width, height, aspect = self.camera.aspect, "viewport resized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn new_context_follows_config() {
        let config = SceneConfig::default();
        let ctx = WorldContext::new(&config);
        assert!(ctx.scene.is_empty());
        assert!(ctx.animator.is_empty());
        assert!((ctx.camera.position() - Vec3::new(0.0, 0.0, 0.1)).length() < 1e-6);
        assert_eq!(ctx.camera.far, 1000.0);
        assert_eq!(ctx.sky.dome_radius, 450_000.0);
        assert_eq!(ctx.water.uniforms.level, -1.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut ctx = WorldContext::new(&SceneConfig::default());
        ctx.resize(1000, 500);
        assert_eq!(ctx.camera.aspect, 2.0);
        assert_eq!(ctx.frame().camera.aspect, 2.0);
    }
}
