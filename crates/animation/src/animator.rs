use crate::AnimationError;
use crate::oscillation::OscillationTask;
use seascape_common::EntityId;
use seascape_scene::SceneGraph;
use std::collections::BTreeMap;

/// Identifier of a task registered with an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Owns every oscillation task and advances them together.
///
/// Tasks are independent of each other; the only thing they share is the
/// elapsed time handed to [`Animator::tick`].
#[derive(Debug, Default)]
pub struct Animator {
    tasks: BTreeMap<TaskId, OscillationTask>,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: TaskId) -> Option<&OscillationTask> {
        self.tasks.get(&id)
    }

    pub fn tasks(&self) -> &BTreeMap<TaskId, OscillationTask> {
        &self.tasks
    }

    /// Number of tasks driving `target`.
    pub fn tasks_for(&self, target: EntityId) -> usize {
        self.tasks.values().filter(|t| t.target() == target).count()
    }

    /// Register a yoyo between `low` and `high` on the vertical position of `target`.
    pub fn create_task(
        &mut self,
        target: EntityId,
        low: f32,
        high: f32,
        period_ms: f32,
    ) -> Result<TaskId, AnimationError> {
        let task = OscillationTask::new(target, low, high, period_ms)?;
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(id, task);
        tracing::debug!(
            task = id.0,
            target = %target.short(),
            low,
            high,
            period_ms,
            "oscillation task created"
        );
        Ok(id)
    }

    /// Advance every task by `elapsed_ms` and write its value to the target's
    /// `position.y`. Returns how many targets were updated.
    pub fn tick(&mut self, scene: &mut SceneGraph, elapsed_ms: f32) -> usize {
        let mut applied = 0;
        for (id, task) in self.tasks.iter_mut() {
            *task = task.advanced(elapsed_ms);
            match scene.get_mut(task.target()) {
                Some(node) => {
                    node.transform.position.y = task.value();
                    applied += 1;
                }
                None => {
                    tracing::trace!(task = id.0, "target no longer in scene, skipping");
                }
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use seascape_common::Transform;
    use seascape_scene::{Material, Mesh, Motion, SceneNode};

    fn spawn_head(scene: &mut SceneGraph, position: Vec3) -> EntityId {
        let mesh = scene.add_mesh(Mesh {
            name: "head".into(),
            vertex_count: 0,
            index_count: 0,
        });
        let material = scene.add_material(Material::default());
        scene.spawn(SceneNode {
            name: "head".into(),
            transform: Transform {
                position,
                ..Transform::default()
            },
            mesh,
            material,
            motion: Motion::Animated,
        })
    }

    #[test]
    fn task_ids_are_unique() {
        let mut animator = Animator::new();
        let target = EntityId::new();
        let a = animator.create_task(target, 0.0, 1.0, 100.0).unwrap();
        let b = animator.create_task(target, 0.0, 1.0, 100.0).unwrap();
        assert_ne!(a, b);
        assert_eq!(animator.len(), 2);
        assert_eq!(animator.tasks_for(target), 2);
    }

    #[test]
    fn invalid_task_is_not_registered() {
        let mut animator = Animator::new();
        assert!(animator.create_task(EntityId::new(), 0.0, 1.0, 0.0).is_err());
        assert!(animator.is_empty());
    }

    #[test]
    fn tick_writes_only_vertical_position() {
        let mut scene = SceneGraph::new();
        let id = spawn_head(&mut scene, Vec3::new(5.0, 0.0, 7.0));
        scene.get_mut(id).unwrap().transform.rotation.y = 1.0;

        let mut animator = Animator::new();
        animator.create_task(id, -3.0, -1.0, 1000.0).unwrap();
        assert_eq!(animator.tick(&mut scene, 500.0), 1);

        let t = scene.get(id).unwrap().transform;
        assert_eq!(t.position.x, 5.0);
        assert_eq!(t.position.z, 7.0);
        assert!((t.position.y - -2.0).abs() < 1e-6);
        assert_eq!(t.rotation.y, 1.0);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn tasks_are_independent() {
        let mut scene = SceneGraph::new();
        let fast = spawn_head(&mut scene, Vec3::ZERO);
        let slow = spawn_head(&mut scene, Vec3::ZERO);

        let mut animator = Animator::new();
        animator.create_task(fast, 0.0, 1.0, 100.0).unwrap();
        animator.create_task(slow, 0.0, 1.0, 400.0).unwrap();
        animator.tick(&mut scene, 50.0);

        let y_fast = scene.get(fast).unwrap().transform.position.y;
        let y_slow = scene.get(slow).unwrap().transform.position.y;
        assert!((y_fast - 0.5).abs() < 1e-6);
        assert!(y_slow < y_fast);
    }

    #[test]
    fn stale_target_is_skipped() {
        let mut scene = SceneGraph::new();
        let live = spawn_head(&mut scene, Vec3::ZERO);
        let gone = spawn_head(&mut scene, Vec3::ZERO);

        let mut animator = Animator::new();
        animator.create_task(live, 0.0, 1.0, 100.0).unwrap();
        animator.create_task(gone, 0.0, 1.0, 100.0).unwrap();
        scene.despawn(gone);

        assert_eq!(animator.tick(&mut scene, 10.0), 1);
        // The orphaned task keeps its state and keeps being skipped.
        assert_eq!(animator.len(), 2);
        assert_eq!(animator.tick(&mut scene, 10.0), 1);
    }

    #[test]
    fn repeated_ticks_stay_bounded() {
        let mut scene = SceneGraph::new();
        let id = spawn_head(&mut scene, Vec3::ZERO);
        let mut animator = Animator::new();
        animator.create_task(id, -3.0, -1.0, 3000.0).unwrap();

        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..10_000 {
            animator.tick(&mut scene, 1000.0 / 60.0);
            let y = scene.get(id).unwrap().transform.position.y;
            assert!((-3.0..=-1.0).contains(&y));
            seen_low |= y == -3.0;
            seen_high |= y == -1.0;
        }
        assert!(seen_low && seen_high);
    }
}
