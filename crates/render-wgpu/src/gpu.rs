use crate::shaders;
use bytemuck::{Pod, Zeroable};
use seascape_render::{Frame, Renderer};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    sun: [f32; 4],
    sky: [f32; 4],
    water: [f32; 4],
    water_color: [f32; 4],
    water_sun: [f32; 4],
}

impl FrameUniforms {
    pub(crate) fn from_frame(frame: &Frame<'_>) -> Self {
        let vp = frame.camera.view_projection();
        let eye = frame.camera.position();
        let sky = frame.sky;
        let water = frame.water;
        let sun = sky.sun_position;
        let water_sun = water.sun_direction;
        Self {
            view_proj: vp.to_cols_array_2d(),
            inv_view_proj: vp.inverse().to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            sun: [sun.x, sun.y, sun.z, frame.tone_mapping.exposure],
            sky: [
                sky.turbidity,
                sky.rayleigh,
                sky.mie_coefficient,
                sky.mie_directional_g,
            ],
            water: [
                water.time,
                water.distortion_scale,
                water.alpha,
                water.level,
            ],
            water_color: water.color.to_rgba(water.size),
            water_sun: [
                water_sun.x,
                water_sun.y,
                water_sun.z,
                if water.normals.is_some() { 1.0 } else { 0.0 },
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

/// One instance per scene node, in scene order, capped at `max`.
pub(crate) fn head_instances(frame: &Frame<'_>, max: usize) -> Vec<InstanceData> {
    frame
        .scene
        .nodes()
        .values()
        .take(max)
        .map(|node| {
            let cols = node.transform.matrix().to_cols_array_2d();
            InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                color: frame.scene.node_color(node).to_rgba(1.0),
            }
        })
        .collect()
}

/// Unit cube standing in for the head mesh.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = std::array::from_fn(|i| (normal[i] + su * u[i] + sv * v[i]) * p);
            vertices.push(Vertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// wgpu-based seascape renderer: sky, water plane, instanced heads.
pub struct WgpuRenderer {
    sky_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,
    head_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

struct PipelineDesc<'a> {
    label: &'a str,
    source: String,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    blend: wgpu::BlendState,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_uniforms_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_uniforms_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let build = |desc: PipelineDesc<'_>| {
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(desc.label),
                source: wgpu::ShaderSource::Wgsl(desc.source.into()),
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(desc.label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some(desc.vs),
                    compilation_options: Default::default(),
                    buffers: desc.buffers,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some(desc.fs),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(desc.blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: desc.cull_mode,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: desc.depth_write,
                    depth_compare: desc.depth_compare,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            })
        };

        let sky_pipeline = build(PipelineDesc {
            label: "sky_pipeline",
            source: shaders::sky_shader(),
            vs: "vs_sky",
            fs: "fs_sky",
            buffers: &[],
            blend: wgpu::BlendState::REPLACE,
            cull_mode: None,
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
        });

        let water_pipeline = build(PipelineDesc {
            label: "water_pipeline",
            source: shaders::water_shader(),
            vs: "vs_water",
            fs: "fs_water",
            buffers: &[],
            blend: wgpu::BlendState::ALPHA_BLENDING,
            cull_mode: None,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        });

        let head_pipeline = build(PipelineDesc {
            label: "head_pipeline",
            source: shaders::heads_shader(),
            vs: "vs_head",
            fs: "fs_head",
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        2 => Float32x4,
                        3 => Float32x4,
                        4 => Float32x4,
                        5 => Float32x4,
                        6 => Float32x4,
                    ],
                },
            ],
            blend: wgpu::BlendState::REPLACE,
            cull_mode: Some(wgpu::Face::Back),
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        });

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let max_instances = 1_024u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            sky_pipeline,
            water_pipeline,
            head_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count: cube_indices.len() as u32,
            instance_buffer,
            max_instances,
            depth_texture: Self::create_depth_texture(device, width, height),
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Draw one frame into `view`: sky, then heads, then the blended water.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame<'_>,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_frame(frame)),
        );

        let instances = head_instances(frame, self.max_instances as usize);
        if instances.len() < frame.scene.len() {
            tracing::warn!(
                nodes = frame.scene.len(),
                drawn = instances.len(),
                "instance buffer full"
            );
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            pass.set_pipeline(&self.sky_pipeline);
            pass.draw(0..3, 0..1);

            // Heads go before the water so the translucent plane blends over them.
            if !instances.is_empty() {
                pass.set_pipeline(&self.head_pipeline);
                pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.cube_index_count, 0, 0..instances.len() as u32);
            }

            pass.set_pipeline(&self.water_pipeline);
            pass.draw(0..6, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// A [`WgpuRenderer`] bound to one surface texture, usable as a [`Renderer`]
/// by the frame clock.
pub struct WgpuFrameTarget<'a> {
    pub renderer: &'a WgpuRenderer,
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub view: &'a wgpu::TextureView,
}

impl Renderer for WgpuFrameTarget<'_> {
    type Output = ();

    fn render(&mut self, frame: &Frame<'_>) {
        self.renderer.render(self.device, self.queue, self.view, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use seascape_common::{Color, Transform};
    use seascape_render::{OrbitCamera, SkyUniforms, ToneMapping, WaterUniforms};
    use seascape_scene::{Material, Mesh, Motion, SceneGraph, SceneNode};

    fn scene_with_heads(n: usize) -> SceneGraph {
        let mut scene = SceneGraph::new();
        let mesh = scene.add_mesh(Mesh {
            name: "head".into(),
            vertex_count: 0,
            index_count: 0,
        });
        let material = scene.add_material(Material {
            color: Color::new(1.0, 1.5, 2.0),
            ..Material::default()
        });
        for i in 0..n {
            scene.spawn(SceneNode {
                name: format!("head-{i}"),
                transform: Transform {
                    position: Vec3::new(i as f32, 0.0, 0.0),
                    ..Transform::default()
                },
                mesh,
                material,
                motion: Motion::Animated,
            });
        }
        scene
    }

    fn with_frame<T>(scene: &SceneGraph, f: impl FnOnce(&Frame<'_>) -> T) -> T {
        let camera = OrbitCamera::default();
        let sky = SkyUniforms::default();
        let water = WaterUniforms {
            time: 0.25,
            ..WaterUniforms::default()
        };
        f(&Frame {
            scene,
            camera: &camera,
            sky: &sky,
            water: &water,
            tone_mapping: ToneMapping { exposure: 0.5 },
        })
    }

    #[test]
    fn uniforms_pack_frame_state() {
        let scene = SceneGraph::new();
        let u = with_frame(&scene, FrameUniforms::from_frame);
        assert_eq!(u.sun, [0.0, 1.0, 0.0, 0.5]);
        assert_eq!(u.water, [0.25, 3.7, 1.0, -1.0]);
        assert_eq!(u.water_color, [1.0, 0.0, 0.0, 1000.0]);
        assert_eq!(u.water_sun[3], 0.0);
        assert!((u.camera_pos[2] - 0.1).abs() < 1e-6);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn instances_carry_material_color() {
        let scene = scene_with_heads(3);
        let instances = with_frame(&scene, |f| head_instances(f, 100));
        assert_eq!(instances.len(), 3);
        assert!(instances.iter().all(|i| i.color == [1.0, 1.5, 2.0, 1.0]));
    }

    #[test]
    fn instances_are_capped() {
        let scene = scene_with_heads(5);
        let instances = with_frame(&scene, |f| head_instances(f, 2));
        assert_eq!(instances.len(), 2);
    }

    #[test]
    fn cube_faces_point_outwards() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from(vertices[tri[k] as usize].position));
            let normal = Vec3::from(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
        }
    }
}
