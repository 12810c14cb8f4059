//! Seascape world: composes the scene, animates it and ticks it into a renderer.
//!
//! [`Seascape`] owns a [`WorldContext`] and the [`FrameClock`]. Construction
//! sets up the sea and sky, [`Seascape::populate`] places the heads once the
//! head asset arrives, and [`Seascape::start`] moves the clock to `Running`.
//!
//! # Invariants
//! - Every `Animated` node has exactly one oscillation task.
//! - Placement validates its whole request before touching the scene.
//! - A tick runs water, animation, camera input and render, in that order.

pub mod clock;
pub mod config;
pub mod context;
pub mod head;
pub mod placement;
pub mod sky;
pub mod water;

mod seascape;

pub use clock::{ClockState, FrameClock};
pub use config::{
    AssetPaths, CameraConfig, ConfigError, FrontHeadConfig, HeadsConfig, HeroConfig, SceneConfig,
    SkyConfig, WaterConfig,
};
pub use context::WorldContext;
pub use head::bind_head_color;
pub use placement::{IntRange, PlacementError, PlacementSpec, generate, place};
pub use seascape::{HERO_NAME, Seascape};
pub use sky::{apply_sky, bind_sky, sun_direction};
pub use water::WaterSurface;
