//! Instance placement: scatter copies of a template and give each one a bob.

use crate::context::WorldContext;
use glam::Vec3;
use rand::Rng;
use seascape_animation::AnimationError;
use seascape_common::EntityId;
use seascape_scene::{Motion, SceneNode};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Errors from placement requests. Raised before the scene is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("{field}: invalid range [{min}, {max})")]
    InvalidRange {
        field: &'static str,
        min: i32,
        max: i32,
    },
    #[error("bob range {low} -> {high} must be finite")]
    InvalidBob { low: f32, high: f32 },
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Half-open integer range `[min, max)`. `min == max` always samples `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `floor(random * (max - min)) + min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let span = (self.max as i64 - self.min as i64) as f64;
        let offset = (rng.random::<f64>() * span).floor() as i64;
        (self.min as i64 + offset) as i32
    }

    fn validate(&self, field: &'static str) -> Result<(), PlacementError> {
        if self.min > self.max {
            return Err(PlacementError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// A request for `count` bobbing copies of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSpec {
    pub count: usize,
    pub x: IntRange,
    pub z: IntRange,
    pub period_ms: IntRange,
    pub bob_low: f32,
    pub bob_high: f32,
}

impl PlacementSpec {
    pub fn validate(&self) -> Result<(), PlacementError> {
        self.x.validate("x")?;
        self.z.validate("z")?;
        self.period_ms.validate("period_ms")?;
        if self.period_ms.min <= 0 {
            return Err(PlacementError::InvalidRange {
                field: "period_ms",
                min: self.period_ms.min,
                max: self.period_ms.max,
            });
        }
        if !self.bob_low.is_finite() || !self.bob_high.is_finite() {
            return Err(PlacementError::InvalidBob {
                low: self.bob_low,
                high: self.bob_high,
            });
        }
        Ok(())
    }
}

/// Scatter `spec.count` copies of `template` and register one oscillation
/// task per copy. Copies share the template's mesh and material.
pub fn generate<R: Rng + ?Sized>(
    ctx: &mut WorldContext,
    template: &SceneNode,
    spec: &PlacementSpec,
    rng: &mut R,
) -> Result<Vec<EntityId>, PlacementError> {
    spec.validate()?;
    let _span = tracing::debug_span!("generate", count = spec.count).entered();

    let mut placed = Vec::with_capacity(spec.count);
    for i in 0..spec.count {
        let x = spec.x.sample(rng) as f32;
        let z = spec.z.sample(rng) as f32;
        let period = spec.period_ms.sample(rng) as f32;
        let position = Vec3::new(x, template.transform.position.y, z);
        let id = place(
            ctx,
            template,
            format!("{}-{i}", template.name),
            position,
            period,
            (spec.bob_low, spec.bob_high),
        )?;
        placed.push(id);
    }
    tracing::info!(placed = placed.len(), "instances generated");
    Ok(placed)
}

/// Place one bobbing copy of `template` at `position`, turned to face +Z.
pub fn place(
    ctx: &mut WorldContext,
    template: &SceneNode,
    name: String,
    position: Vec3,
    period_ms: f32,
    (low, high): (f32, f32),
) -> Result<EntityId, PlacementError> {
    let mut node = template.clone();
    node.name = name;
    node.transform.position = position;
    node.transform.rotation.y = PI;
    node.motion = Motion::Animated;

    let target = EntityId::new();
    // Build the task before spawning so a rejected period leaves no orphan node.
    ctx.animator.create_task(target, low, high, period_ms)?;
    ctx.scene.spawn_with_id(target, node);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use seascape_common::Transform;
    use seascape_scene::{Material, Mesh};

    fn setup() -> (WorldContext, SceneNode) {
        let mut ctx = WorldContext::new(&SceneConfig::default());
        let mesh = ctx.scene.add_mesh(Mesh {
            name: "head".into(),
            vertex_count: 8,
            index_count: 36,
        });
        let material = ctx.scene.add_material(Material::default());
        let template = SceneNode {
            name: "head".into(),
            transform: Transform::default(),
            mesh,
            material,
            motion: Motion::Static,
        };
        (ctx, template)
    }

    fn spec(count: usize) -> PlacementSpec {
        SceneConfig::default().heads.placement().with_count(count)
    }

    impl PlacementSpec {
        fn with_count(mut self, count: usize) -> Self {
            self.count = count;
            self
        }
    }

    #[test]
    fn sample_stays_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = IntRange::new(-100, 100);
        for _ in 0..10_000 {
            let v = range.sample(&mut rng);
            assert!((-100..100).contains(&v));
        }
    }

    #[test]
    fn sample_reaches_min_and_never_max() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = IntRange::new(0, 3);
        let mut counts = [0usize; 4];
        for _ in 0..30_000 {
            counts[range.sample(&mut rng) as usize] += 1;
        }
        assert_eq!(counts[3], 0);
        // Each of 0, 1, 2 lands near a third of the draws.
        for &n in &counts[..3] {
            assert!((9_000..11_000).contains(&n), "{counts:?}");
        }

        let wide = IntRange::new(-100, 100);
        let (lo, hi) = (0..20_000)
            .map(|_| wide.sample(&mut rng))
            .fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        assert_eq!((lo, hi), (-100, 99));
    }

    #[test]
    fn degenerate_range_yields_min() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(IntRange::new(5, 5).sample(&mut rng), 5);
    }

    #[test]
    fn generates_count_instances_in_bounds() {
        let (mut ctx, template) = setup();
        let mut rng = StdRng::seed_from_u64(42);
        let ids = generate(&mut ctx, &template, &spec(20), &mut rng).unwrap();

        assert_eq!(ids.len(), 20);
        assert_eq!(ctx.scene.len(), 20);
        assert_eq!(ctx.animator.len(), 20);
        for id in &ids {
            let node = ctx.scene.get(*id).unwrap();
            let p = node.transform.position;
            assert!((-100.0..100.0).contains(&p.x));
            assert!((0.0..100.0).contains(&p.z));
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(node.transform.rotation.y, PI);
            assert_eq!(node.motion, Motion::Animated);
            assert_eq!(node.material, template.material);
            assert_eq!(ctx.animator.tasks_for(*id), 1);
        }
        for task in ctx.animator.tasks().values() {
            assert!((3000.0..12000.0).contains(&task.period_ms()));
            assert_eq!(task.range(), (-3.0, -1.0));
        }
    }

    #[test]
    fn zero_count_leaves_scene_unchanged() {
        let (mut ctx, template) = setup();
        let before = ctx.scene.state_hash();
        let mut rng = StdRng::seed_from_u64(42);
        let ids = generate(&mut ctx, &template, &spec(0), &mut rng).unwrap();
        assert!(ids.is_empty());
        assert_eq!(ctx.scene.state_hash(), before);
        assert!(ctx.animator.is_empty());
    }

    #[test]
    fn inverted_range_fails_before_mutation() {
        let (mut ctx, template) = setup();
        let mut bad = spec(5);
        bad.z = IntRange::new(10, 0);
        let mut rng = StdRng::seed_from_u64(42);
        let err = generate(&mut ctx, &template, &bad, &mut rng).unwrap_err();
        assert_eq!(
            err,
            PlacementError::InvalidRange {
                field: "z",
                min: 10,
                max: 0
            }
        );
        assert!(ctx.scene.is_empty());
        assert!(ctx.animator.is_empty());
    }

    #[test]
    fn non_positive_period_is_invalid_range() {
        let mut bad = spec(1);
        bad.period_ms = IntRange::new(0, 10);
        assert!(matches!(
            bad.validate(),
            Err(PlacementError::InvalidRange {
                field: "period_ms",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_bob_is_rejected() {
        let mut bad = spec(1);
        bad.bob_high = f32::NAN;
        assert!(matches!(
            bad.validate(),
            Err(PlacementError::InvalidBob { .. })
        ));
    }

    #[test]
    fn same_seed_same_layout() {
        let positions = |seed| {
            let (mut ctx, template) = setup();
            let mut rng = StdRng::seed_from_u64(seed);
            let ids = generate(&mut ctx, &template, &spec(10), &mut rng).unwrap();
            ids.iter()
                .map(|id| ctx.scene.get(*id).unwrap().transform.position)
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(9), positions(9));
    }

    #[test]
    fn place_rejects_bad_period_without_spawning() {
        let (mut ctx, template) = setup();
        let err = place(
            &mut ctx,
            &template,
            "front".into(),
            Vec3::ZERO,
            0.0,
            (-3.0, -1.0),
        )
        .unwrap_err();
        assert!(matches!(err, PlacementError::Animation(_)));
        assert!(ctx.scene.is_empty());
    }
}
