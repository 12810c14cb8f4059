use crate::context::WorldContext;
use seascape_render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// World construction has not finished; ticks are ignored.
    Idle,
    Running,
}

/// The per-refresh loop driver.
///
/// Each tick runs, in order: water phase, oscillation tasks, pending camera
/// input, render. Time advances by a fixed step per tick, independent of
/// wall-clock time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    state: ClockState,
    ticks: u64,
    step_ms: f32,
}

impl FrameClock {
    pub fn new(step_ms: f32) -> Self {
        Self {
            state: ClockState::Idle,
            ticks: 0,
            step_ms,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Ticks run since [`FrameClock::start`].
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }

    /// Leave `Idle`. Returns false if the clock was already running.
    pub fn start(&mut self) -> bool {
        if self.state == ClockState::Running {
            return false;
        }
        self.state = ClockState::Running;
        tracing::info!(step_ms = self.step_ms, "frame clock started");
        true
    }

    /// Run one tick. Returns the renderer output, or `None` while idle.
    pub fn tick<R: Renderer>(
        &mut self,
        ctx: &mut WorldContext,
        renderer: &mut R,
    ) -> Option<R::Output> {
        if self.state == ClockState::Idle {
            return None;
        }
        self.ticks += 1;
        let _span = tracing::trace_span!("tick", n = self.ticks).entered();

        ctx.water.advance();
        let animated = ctx.animator.tick(&mut ctx.scene, self.step_ms);
        if let Some(delta) = ctx.interaction.take() {
            ctx.camera.orbit(delta.orbit.x, delta.orbit.y);
            ctx.camera.pan(delta.pan.x, delta.pan.y);
            ctx.camera.zoom(delta.zoom);
            tracing::trace!(?delta, "camera input applied");
        }
        tracing::trace!(animated, water = ctx.water.phase(), "tick advanced");

        Some(renderer.render(&ctx.frame()))
    }
}
