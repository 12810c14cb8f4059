use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seascape_assets::{AssetLoader, HeadAsset, PendingLoad, TextureAsset};
use seascape_input::{CameraAction, PointerButton, PointerDrag};
use seascape_params::ParameterGroup;
use seascape_render::Renderer;
use seascape_render_wgpu::{WgpuFrameTarget, WgpuRenderer};
use seascape_world::{SceneConfig, Seascape};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Wheel pixels per zoom step on touchpads.
const PIXELS_PER_ZOOM_STEP: f32 = 50.0;

#[derive(Parser)]
#[command(name = "seascape-desktop", about = "Seascape desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (JSON). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for head placement. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Application state.
struct AppState {
    seascape: Seascape,
    rng: StdRng,
    head_load: Option<PendingLoad<HeadAsset>>,
    normals_load: Option<PendingLoad<TextureAsset>>,
    drag: PointerDrag,
    show_panel: bool,
}

impl AppState {
    fn new(config: SceneConfig, seed: Option<u64>) -> Result<Self> {
        let loader = AssetLoader::new(config.assets.root.clone());
        tracing::info!(root = %loader.root().display(), "loading assets");
        let head_load = loader.spawn_head(
            config.assets.head_texture.clone(),
            config.assets.head_model.clone(),
        );
        let normals_load = loader.spawn_texture(config.assets.water_normals.clone());

        Ok(Self {
            seascape: Seascape::new(config)?,
            rng: seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64),
            head_load: Some(head_load),
            normals_load: Some(normals_load),
            drag: PointerDrag::new(),
            show_panel: true,
        })
    }

    /// Hand finished loads to the world. The clock starts once the head
    /// load has resolved, whether or not it succeeded.
    fn poll_loads(&mut self) {
        if let Some(result) = self.normals_load.as_ref().and_then(PendingLoad::poll) {
            self.normals_load = None;
            self.seascape.set_water_normals(result);
        }
        if let Some(result) = self.head_load.as_ref().and_then(PendingLoad::poll) {
            self.head_load = None;
            if let Err(e) = self.seascape.populate(result, &mut self.rng) {
                tracing::error!("failed to place heads: {e}");
            }
            self.seascape.start();
        }
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        let at = Vec2::new(position.x as f32, position.y as f32);
        if let Some(action) = self.drag.moved(at) {
            self.seascape.push_camera(action);
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_ZOOM_STEP,
        };
        if steps != 0.0 {
            self.seascape.push_camera(CameraAction::Zoom(steps));
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::right("parameters")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Seascape");
                ui.separator();
                let clock = self.seascape.clock();
                ui.label(format!("Tick: {}  ({:?})", clock.ticks(), clock.state()));
                ui.label(format!(
                    "Nodes: {}  Tasks: {}",
                    self.seascape.ctx.scene.len(),
                    self.seascape.ctx.animator.len()
                ));
                if self.head_load.is_some() {
                    ui.label("Loading head...");
                }
                ui.separator();

                let sky = parameter_folder(ui, self.seascape.sky_panel().group());
                for (field, value) in sky {
                    self.seascape.set_sky(field, value);
                }

                let head = self
                    .seascape
                    .head_panel()
                    .map(|panel| parameter_folder(ui, panel.group()))
                    .unwrap_or_default();
                for (field, value) in head {
                    self.seascape.set_head_color(field, value);
                }

                ui.separator();
                ui.small("F1: Toggle Panel | LMB: Orbit | RMB: Pan | Wheel: Zoom");
            });
    }
}

/// One collapsible folder of sliders. Returns the controls the user moved.
fn parameter_folder<G: ParameterGroup>(ui: &mut egui::Ui, group: &G) -> Vec<(G::Field, f32)> {
    let mut changes = Vec::new();
    egui::CollapsingHeader::new(G::NAME)
        .default_open(true)
        .show(ui, |ui| {
            for &field in G::FIELDS {
                let spec = group.spec(field);
                let mut value = spec.value;
                let slider = egui::Slider::new(&mut value, spec.min..=spec.max)
                    .step_by(spec.step as f64)
                    .text(G::label(field));
                if ui.add(slider).changed() {
                    changes.push((field, value));
                }
            }
        });
    changes
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn redraw(&mut self) {
        self.state.poll_loads();

        let (Some(window), Some(surface), Some(device), Some(queue), Some(config)) = (
            &self.window,
            &self.surface,
            &self.device,
            &self.queue,
            &self.config,
        ) else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(renderer) = &self.renderer {
            let mut target = WgpuFrameTarget {
                renderer,
                device,
                queue,
                view: &view,
            };
            if self.state.seascape.tick(&mut target).is_none() {
                // Still constructing: show the sea and sky without advancing time.
                target.render(&self.state.seascape.ctx.frame());
            }
        }

        let (Some(egui_winit), Some(egui_renderer)) =
            (&mut self.egui_winit, &mut self.egui_renderer)
        else {
            return;
        };
        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Seascape")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("seascape_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Linear output encoding.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.seascape.resize(config.width, config.height);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Releases end a drag even when egui claims them, e.g. over the side panel.
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button,
            ..
        } = event
        {
            if let Some(button) = pointer_button(button) {
                self.state.drag.release(button);
            }
        }

        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.seascape.resize(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.show_panel = !self.state.show_panel;
            }
            WindowEvent::MouseInput {
                button,
                state: ElementState::Pressed,
                ..
            } => {
                if let Some(button) = pointer_button(button) {
                    self.state.drag.press(button);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.drag.release_all();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.handle_cursor(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.drag.leave();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.handle_wheel(delta);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("seascape-desktop starting");

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let state = AppState::new(config, cli.seed)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
