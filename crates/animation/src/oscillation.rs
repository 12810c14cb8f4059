use crate::AnimationError;
use crate::easing::cubic_in_out;
use seascape_common::EntityId;

/// Which way the current pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From `low` towards `high`.
    Forward,
    /// From `high` back towards `low`.
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// A bounded yoyo tween on one scalar.
///
/// The task holds its target by id only; it never keeps the node alive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillationTask {
    target: EntityId,
    low: f32,
    high: f32,
    period_ms: f32,
    progress: f32,
    direction: Direction,
}

impl OscillationTask {
    /// Start a task at `low`, heading towards `high`.
    pub fn new(
        target: EntityId,
        low: f32,
        high: f32,
        period_ms: f32,
    ) -> Result<Self, AnimationError> {
        if !(period_ms.is_finite() && period_ms > 0.0) {
            return Err(AnimationError::InvalidPeriod(period_ms));
        }
        if !(low.is_finite() && high.is_finite()) {
            return Err(AnimationError::InvalidRange { low, high });
        }
        Ok(Self {
            target,
            low,
            high,
            period_ms,
            progress: 0.0,
            direction: Direction::Forward,
        })
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn range(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The task state after `elapsed_ms` more milliseconds.
    ///
    /// Reaching the end of a pass clamps to the endpoint and flips direction with
    /// progress reset to zero; any overshoot is dropped. A single step turns
    /// around at most once.
    pub fn advanced(self, elapsed_ms: f32) -> Self {
        let step = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0) / self.period_ms
        } else {
            0.0
        };
        let progress = self.progress + step;
        if progress >= 1.0 {
            Self {
                progress: 0.0,
                direction: self.direction.flipped(),
                ..self
            }
        } else {
            Self { progress, ..self }
        }
    }

    /// Current interpolated value.
    pub fn value(&self) -> f32 {
        let eased = cubic_in_out(self.progress);
        let (from, to) = match self.direction {
            Direction::Forward => (self.low, self.high),
            Direction::Reverse => (self.high, self.low),
        };
        from + (to - from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(period_ms: f32) -> OscillationTask {
        OscillationTask::new(EntityId::new(), -3.0, -1.0, period_ms).unwrap()
    }

    #[test]
    fn starts_at_low_heading_forward() {
        let t = task(1000.0);
        assert_eq!(t.value(), -3.0);
        assert_eq!(t.direction(), Direction::Forward);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn rejects_bad_period() {
        let id = EntityId::new();
        assert_eq!(
            OscillationTask::new(id, 0.0, 1.0, 0.0),
            Err(AnimationError::InvalidPeriod(0.0))
        );
        assert!(OscillationTask::new(id, 0.0, 1.0, -5.0).is_err());
        assert!(OscillationTask::new(id, 0.0, 1.0, f32::NAN).is_err());
        assert!(OscillationTask::new(id, 0.0, 1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn rejects_non_finite_range() {
        let id = EntityId::new();
        assert!(matches!(
            OscillationTask::new(id, f32::NAN, 1.0, 100.0),
            Err(AnimationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn half_period_reaches_midpoint() {
        let t = task(1000.0).advanced(500.0);
        assert!((t.value() - -2.0).abs() < 1e-6);
    }

    #[test]
    fn full_pass_lands_on_high_and_reverses() {
        let t = task(1000.0).advanced(1000.0);
        assert_eq!(t.direction(), Direction::Reverse);
        assert_eq!(t.progress(), 0.0);
        assert_eq!(t.value(), -1.0);
    }

    #[test]
    fn reverse_pass_returns_to_low() {
        let t = task(1000.0).advanced(1000.0).advanced(1000.0);
        assert_eq!(t.direction(), Direction::Forward);
        assert_eq!(t.value(), -3.0);
    }

    #[test]
    fn easing_is_not_linear() {
        let t = task(1000.0).advanced(250.0);
        // Linear would give -2.5; ease-in lags behind.
        assert!(t.value() < -2.5);
    }

    #[test]
    fn negative_or_nan_elapsed_does_not_move() {
        let t = task(1000.0).advanced(100.0);
        assert_eq!(t.advanced(-50.0), t);
        assert_eq!(t.advanced(f32::NAN), t);
    }

    #[test]
    fn many_periods_stay_in_range_and_touch_both_ends() {
        let mut t = task(3000.0);
        let mut hit_low = false;
        let mut hit_high = false;
        for _ in 0..20_000 {
            t = t.advanced(1000.0 / 60.0);
            let v = t.value();
            assert!((-3.0..=-1.0).contains(&v), "value {v} escaped range");
            assert!((0.0..=1.0).contains(&t.progress()));
            hit_low |= v == -3.0;
            hit_high |= v == -1.0;
        }
        assert!(hit_low && hit_high);
    }
}
