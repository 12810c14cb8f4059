use crate::ParamError;
use serde::{Deserialize, Serialize};

/// One numeric control: current value plus the range and step the panel enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamSpec {
    pub const fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            value,
            min,
            max,
            step,
        }
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ParamError> {
        let Self {
            value,
            min,
            max,
            step,
        } = *self;
        if ![value, min, max, step].iter().all(|v| v.is_finite()) {
            return Err(ParamError::NotFinite { field });
        }
        if min > max {
            return Err(ParamError::EmptyRange { field, min, max });
        }
        if step <= 0.0 {
            return Err(ParamError::NonPositiveStep { field, step });
        }
        if !(min..=max).contains(&value) {
            return Err(ParamError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Clamp `raw` into range and snap it to the nearest step from `min`.
    ///
    /// A value already on the step grid (within float noise) is kept as given.
    pub fn quantize(&self, raw: f32) -> f32 {
        let steps = ((raw - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        let value = if (snapped - raw).abs() <= self.tolerance() {
            raw
        } else {
            snapped
        };
        value.clamp(self.min, self.max)
    }

    fn tolerance(&self) -> f32 {
        self.step * 1e-3
    }

    /// Store a quantized `raw`. Returns whether the stored value changed.
    pub fn set(&mut self, raw: f32) -> bool {
        if !raw.is_finite() {
            return false;
        }
        let next = self.quantize(raw);
        if (next - self.value).abs() <= self.tolerance() {
            return false;
        }
        self.value = next;
        true
    }
}

/// A group of controls whose fields are known at compile time.
pub trait ParameterGroup {
    /// Enum naming each control of the group.
    type Field: Copy + Eq + std::fmt::Debug + 'static;

    /// Panel folder title.
    const NAME: &'static str;

    /// Every field, in panel order.
    const FIELDS: &'static [Self::Field];

    fn label(field: Self::Field) -> &'static str;

    fn spec(&self, field: Self::Field) -> &ParamSpec;

    fn spec_mut(&mut self, field: Self::Field) -> &mut ParamSpec;

    fn value(&self, field: Self::Field) -> f32 {
        self.spec(field).value
    }

    fn validate(&self) -> Result<(), ParamError> {
        Self::FIELDS
            .iter()
            .try_for_each(|&f| self.spec(f).validate(Self::label(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_clamps_and_snaps() {
        let spec = ParamSpec::new(0.5, 0.0, 1.0, 0.25);
        assert_eq!(spec.quantize(2.0), 1.0);
        assert_eq!(spec.quantize(-1.0), 0.0);
        assert_eq!(spec.quantize(0.3), 0.25);
        assert_eq!(spec.quantize(0.4), 0.5);
    }

    #[test]
    fn set_reports_change() {
        let mut spec = ParamSpec::new(0.5, 0.0, 1.0, 0.25);
        assert!(!spec.set(0.5));
        assert!(!spec.set(0.55));
        assert!(spec.set(0.75));
        assert_eq!(spec.value, 0.75);
        assert!(!spec.set(f32::NAN));
        assert_eq!(spec.value, 0.75);
    }

    #[test]
    fn validate_rejects_bad_specs() {
        assert!(ParamSpec::new(0.5, 0.0, 1.0, 0.1).validate("x").is_ok());
        assert_eq!(
            ParamSpec::new(0.5, 1.0, 0.0, 0.1).validate("x"),
            Err(ParamError::EmptyRange {
                field: "x",
                min: 1.0,
                max: 0.0
            })
        );
        assert!(matches!(
            ParamSpec::new(0.5, 0.0, 1.0, 0.0).validate("x"),
            Err(ParamError::NonPositiveStep { .. })
        ));
        assert!(matches!(
            ParamSpec::new(2.0, 0.0, 1.0, 0.1).validate("x"),
            Err(ParamError::OutOfRange { .. })
        ));
        assert!(matches!(
            ParamSpec::new(f32::NAN, 0.0, 1.0, 0.1).validate("x"),
            Err(ParamError::NotFinite { .. })
        ));
    }
}
