use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use seascape_assets::AssetLoader;
use seascape_params::ParameterGroup;
use seascape_render::DebugTextRenderer;
use seascape_world::{SceneConfig, Seascape, sun_direction};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seascape-cli", about = "Headless seascape tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (JSON). Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the configured parameter panels
    Info,
    /// Print the effective scene config as JSON
    Config,
    /// Build the scene and run it through the debug text renderer
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// RNG seed for head placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Print every Nth frame instead of only the last one
        #[arg(long)]
        every: Option<u64>,
    },
    /// Derive the sun direction from panel angles
    Sun {
        #[arg(short, long, default_value = "0.425")]
        inclination: f32,
        #[arg(short, long, default_value = "0.25")]
        azimuth: f32,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    Ok(match path {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    })
}

fn print_group<G: ParameterGroup>(group: &G) {
    println!("[{}]", G::NAME);
    for &field in G::FIELDS {
        let spec = group.spec(field);
        println!(
            "  {:<16} {:>8} in [{}, {}] step {}",
            G::label(field),
            spec.value,
            spec.min,
            spec.max,
            spec.step
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = load_config(cli.config.as_ref())?;
            println!("seascape-cli v{}", env!("CARGO_PKG_VERSION"));
            print_group(&config.sky_panel);
            print_group(&config.head_color);
        }
        Commands::Config => {
            let config = load_config(cli.config.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Simulate {
            ticks,
            seed,
            every,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let loader = AssetLoader::new(config.assets.root.clone());
            tracing::info!(root = %loader.root().display(), "loading assets");
            let head = loader.head(&config.assets.head_texture, &config.assets.head_model);
            let normals = loader.texture(&config.assets.water_normals);

            let mut seascape = Seascape::new(config)?;
            seascape.set_water_normals(normals);
            let placed = seascape.populate(head, &mut StdRng::seed_from_u64(seed))?;
            seascape.start();
            tracing::info!(seed, heads = placed, "scene populated");
            println!("Simulate: seed={seed}, ticks={ticks}, heads={placed}");

            let mut renderer = DebugTextRenderer::new();
            let mut last = None;
            for tick in 1..=ticks {
                let frame = seascape.tick(&mut renderer);
                if every.is_some_and(|n| n > 0 && tick % n == 0) {
                    if let Some(text) = &frame {
                        print!("{text}");
                    }
                }
                last = frame;
            }
            if every.is_none() {
                if let Some(text) = last {
                    print!("{text}");
                }
            }
            tracing::info!(ticks = seascape.clock().ticks(), "simulation finished");
            println!(
                "Done: tick={}, water phase={:.6}, state hash={:#x}",
                seascape.clock().ticks(),
                seascape.ctx.water.phase(),
                seascape.ctx.scene.state_hash()
            );
        }
        Commands::Sun {
            inclination,
            azimuth,
        } => {
            let sun = sun_direction(inclination, azimuth);
            println!(
                "inclination={inclination} azimuth={azimuth} -> sun=({:.6}, {:.6}, {:.6})",
                sun.x, sun.y, sun.z
            );
        }
    }

    Ok(())
}
