use crate::clock::FrameClock;
use crate::config::{ConfigError, SceneConfig};
use crate::context::WorldContext;
use crate::head::bind_head_color;
use crate::placement::{self, PlacementError};
use crate::sky::bind_sky;
use glam::Vec3;
use rand::Rng;
use seascape_assets::{AssetLoadError, HeadAsset, TextureAsset};
use seascape_common::{Color, EntityId, Transform};
use seascape_input::CameraAction;
use seascape_params::{Binding, HeadColorField, HeadColorParams, SkyField, SkyParams};
use seascape_render::Renderer;
use seascape_scene::{Material, Mesh, Motion, SceneNode, Texture};

/// Name of the textured template node that stays on the horizon.
pub const HERO_NAME: &str = "model-face";

/// The assembled scene together with its clock and parameter panels.
pub struct Seascape {
    pub ctx: WorldContext,
    clock: FrameClock,
    sky_panel: Binding<SkyParams, WorldContext>,
    head_panel: Option<Binding<HeadColorParams, WorldContext>>,
    config: SceneConfig,
    hero: Option<EntityId>,
}

impl Seascape {
    /// Validate `config` and set up the sea and the sky. Heads come later,
    /// through [`Seascape::populate`].
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut ctx = WorldContext::new(&config);
        let sky_panel = bind_sky(config.sky_panel.clone(), &mut ctx);
        tracing::info!(
            water_size = config.water.size,
            sky_scale = config.sky.scale,
            "sea and sky ready"
        );
        Ok(Self {
            ctx,
            clock: FrameClock::new(config.frame_step_ms),
            sky_panel,
            head_panel: None,
            config,
            hero: None,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn sky_panel(&self) -> &Binding<SkyParams, WorldContext> {
        &self.sky_panel
    }

    /// The "Head" color panel, once the head has been populated.
    pub fn head_panel(&self) -> Option<&Binding<HeadColorParams, WorldContext>> {
        self.head_panel.as_ref()
    }

    pub fn hero(&self) -> Option<EntityId> {
        self.hero
    }

    pub fn set_sky(&mut self, field: SkyField, value: f32) -> bool {
        self.sky_panel.set(field, value, &mut self.ctx)
    }

    /// Returns false if the value did not change or no head panel exists.
    pub fn set_head_color(&mut self, field: HeadColorField, value: f32) -> bool {
        match self.head_panel.as_mut() {
            Some(panel) => panel.set(field, value, &mut self.ctx),
            None => false,
        }
    }

    /// Attach the water normal map. A failed load leaves the water without one.
    pub fn set_water_normals(&mut self, loaded: Result<TextureAsset, AssetLoadError>) {
        match loaded {
            Ok(texture) => {
                let handle = self.ctx.scene.add_texture(Texture {
                    name: texture.name,
                    content_id: texture.id.0,
                });
                self.ctx.water.uniforms.normals = Some(handle);
                tracing::info!(
                    texture = handle.0,
                    width = texture.width,
                    height = texture.height,
                    "water normals attached"
                );
            }
            Err(err) => tracing::error!(error = %err, "water normals unavailable"),
        }
    }

    /// Build every head from the loaded asset: the random scatter, the front
    /// head and the static hero. A failed asset load is logged and leaves the
    /// scene without heads. Returns the number of nodes added.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        loaded: Result<HeadAsset, AssetLoadError>,
        rng: &mut R,
    ) -> Result<usize, PlacementError> {
        let asset = match loaded {
            Ok(asset) => asset,
            Err(err) => {
                tracing::error!(error = %err, "head asset unavailable, skipping heads");
                return Ok(0);
            }
        };
        let spec = self.config.heads.placement();
        spec.validate()?;
        let _span = tracing::info_span!("populate", model = %asset.model.name).entered();

        let ctx = &mut self.ctx;
        let mesh = ctx.scene.add_mesh(Mesh {
            name: asset.model.name.clone(),
            vertex_count: asset.model.vertex_count(),
            index_count: asset.model.index_count(),
        });
        let base = asset.model.materials.first();
        let material = ctx.scene.add_material(Material {
            name: base.map_or_else(|| "head".to_owned(), |m| m.name.clone()),
            color: base.map_or(Color::WHITE, |m| {
                Color::new(m.base_color[0], m.base_color[1], m.base_color[2])
            }),
            texture: None,
        });
        let template = SceneNode {
            name: "head".into(),
            transform: Transform::default(),
            mesh,
            material,
            motion: Motion::Static,
        };

        let front = &self.config.front_head;
        let bob = (self.config.heads.bob_low, self.config.heads.bob_high);
        // The front head's task is created first so a bad period fails early.
        placement::place(
            ctx,
            &template,
            "head-front".into(),
            front.position,
            front.period_ms,
            bob,
        )?;
        let scattered = placement::generate(ctx, &template, &spec, rng)?;

        let hero = &self.config.hero;
        let texture = ctx.scene.add_texture(Texture {
            name: asset.texture.name,
            content_id: asset.texture.id.0,
        });
        if let Some(m) = ctx.scene.material_mut(material) {
            m.texture = Some(texture);
        }
        let hero_id = ctx.scene.spawn(SceneNode {
            name: HERO_NAME.into(),
            transform: Transform {
                position: hero.position,
                rotation: hero.rotation,
                scale: Vec3::splat(hero.scale),
            },
            ..template
        });
        self.hero = Some(hero_id);
        self.head_panel = Some(bind_head_color(
            self.config.head_color.clone(),
            material,
            &mut self.ctx,
        ));

        let added = scattered.len() + 2;
        tracing::info!(added, "heads populated");
        Ok(added)
    }

    /// Finish construction: the clock starts ticking.
    pub fn start(&mut self) -> bool {
        self.clock.start()
    }

    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> Option<R::Output> {
        self.clock.tick(&mut self.ctx, renderer)
    }

    pub fn push_camera(&mut self, action: CameraAction) {
        self.ctx.interaction.push(action);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }
}

impl std::fmt::Debug for Seascape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seascape")
            .field("nodes", &self.ctx.scene.len())
            .field("tasks", &self.ctx.animator.len())
            .field("clock", &self.clock)
            .field("hero", &self.hero)
            .finish_non_exhaustive()
    }
}
