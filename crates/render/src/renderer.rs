use crate::camera::OrbitCamera;
use crate::uniforms::{SkyUniforms, ToneMapping, WaterUniforms};
use seascape_scene::SceneGraph;
use std::fmt::Write;

/// Everything submitted to a renderer for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a SceneGraph,
    pub camera: &'a OrbitCamera,
    pub sky: &'a SkyUniforms,
    pub water: &'a WaterUniforms,
    pub tone_mapping: ToneMapping,
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer reads the frame and produces output. It never mutates the
/// scene; scene state is owned by the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &Frame<'_>) -> Self::Output;
}

/// Headless renderer producing a human-readable dump of each frame.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame<'_>) -> String {
        self.frames += 1;
        let mut out = String::new();
        let eye = frame.camera.position();
        let sun = frame.sky.sun_position;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame {} (nodes={}, exposure={:.4}) ===",
            self.frames,
            frame.scene.len(),
            frame.tone_mapping.exposure
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})",
            eye.x, eye.y, eye.z, frame.camera.target.x, frame.camera.target.y, frame.camera.target.z
        );
        let _ = writeln!(
            out,
            "Sky: sun=({:.4}, {:.4}, {:.4}) turbidity={:.3} rayleigh={:.3} mie={:.4}/{:.3}",
            sun.x,
            sun.y,
            sun.z,
            frame.sky.turbidity,
            frame.sky.rayleigh,
            frame.sky.mie_coefficient,
            frame.sky.mie_directional_g
        );
        let _ = writeln!(
            out,
            "Water: time={:.5} level={:.2} distortion={:.2}",
            frame.water.time, frame.water.level, frame.water.distortion_scale
        );

        for (id, node) in frame.scene.nodes() {
            let p = node.transform.position;
            let c = frame.scene.node_color(node);
            let _ = writeln!(
                out,
                "  [{}] {} pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})",
                id.short(),
                node.name,
                p.x,
                p.y,
                p.z,
                c.r,
                c.g,
                c.b
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use seascape_common::Transform;
    use seascape_scene::{Material, Mesh, Motion, SceneNode};

    fn render(scene: &SceneGraph) -> String {
        let camera = OrbitCamera::default();
        let sky = SkyUniforms::default();
        let water = WaterUniforms::default();
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&Frame {
            scene,
            camera: &camera,
            sky: &sky,
            water: &water,
            tone_mapping: ToneMapping { exposure: 0.5 },
        })
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let output = render(&SceneGraph::new());
        assert!(output.contains("Frame 1"));
        assert!(output.contains("nodes=0"));
        assert!(output.contains("exposure=0.5000"));
    }

    #[test]
    fn debug_renderer_with_nodes() {
        let mut scene = SceneGraph::new();
        let mesh = scene.add_mesh(Mesh {
            name: "head".into(),
            vertex_count: 0,
            index_count: 0,
        });
        let material = scene.add_material(Material::default());
        scene.spawn(SceneNode {
            name: "model-face".into(),
            transform: Transform {
                position: Vec3::new(1.0, 2.0, 3.0),
                ..Transform::default()
            },
            mesh,
            material,
            motion: Motion::Static,
        });

        let output = render(&scene);
        assert!(output.contains("nodes=1"));
        assert!(output.contains("model-face pos=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn frames_are_counted() {
        let scene = SceneGraph::new();
        let camera = OrbitCamera::default();
        let sky = SkyUniforms::default();
        let water = WaterUniforms::default();
        let frame = Frame {
            scene: &scene,
            camera: &camera,
            sky: &sky,
            water: &water,
            tone_mapping: ToneMapping::default(),
        };
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&frame);
        let second = renderer.render(&frame);
        assert_eq!(renderer.frames(), 2);
        assert!(second.contains("Frame 2"));
    }
}
