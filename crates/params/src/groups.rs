use crate::spec::{ParamSpec, ParameterGroup};
use serde::{Deserialize, Serialize};

/// Controls of the "Sky" folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyField {
    Turbidity,
    Rayleigh,
    MieCoefficient,
    MieDirectionalG,
    /// Sun elevation, 0..1.
    Inclination,
    /// Sun heading, 0..1; 0.25 faces front.
    Azimuth,
    /// Renderer tone-mapping exposure.
    Exposure,
}

/// Atmosphere and sun parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyParams {
    pub turbidity: ParamSpec,
    pub rayleigh: ParamSpec,
    pub mie_coefficient: ParamSpec,
    pub mie_directional_g: ParamSpec,
    pub inclination: ParamSpec,
    pub azimuth: ParamSpec,
    pub exposure: ParamSpec,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            turbidity: ParamSpec::new(0.1, 0.0, 20.0, 0.1),
            rayleigh: ParamSpec::new(0.01, 0.0, 4.0, 0.001),
            mie_coefficient: ParamSpec::new(0.005, 0.0, 0.1, 0.001),
            mie_directional_g: ParamSpec::new(0.7, 0.0, 1.0, 0.001),
            inclination: ParamSpec::new(0.425, 0.0, 1.0, 0.0001),
            azimuth: ParamSpec::new(0.25, 0.0, 1.0, 0.0001),
            exposure: ParamSpec::new(0.5, 0.0, 1.0, 0.0001),
        }
    }
}

impl ParameterGroup for SkyParams {
    type Field = SkyField;

    const NAME: &'static str = "Sky";

    const FIELDS: &'static [SkyField] = &[
        SkyField::Turbidity,
        SkyField::Rayleigh,
        SkyField::MieCoefficient,
        SkyField::MieDirectionalG,
        SkyField::Inclination,
        SkyField::Azimuth,
        SkyField::Exposure,
    ];

    fn label(field: SkyField) -> &'static str {
        match field {
            SkyField::Turbidity => "turbidity",
            SkyField::Rayleigh => "rayleigh",
            SkyField::MieCoefficient => "mieCoefficient",
            SkyField::MieDirectionalG => "mieDirectionalG",
            SkyField::Inclination => "inclination",
            SkyField::Azimuth => "azimuth",
            SkyField::Exposure => "exposure",
        }
    }

    fn spec(&self, field: SkyField) -> &ParamSpec {
        match field {
            SkyField::Turbidity => &self.turbidity,
            SkyField::Rayleigh => &self.rayleigh,
            SkyField::MieCoefficient => &self.mie_coefficient,
            SkyField::MieDirectionalG => &self.mie_directional_g,
            SkyField::Inclination => &self.inclination,
            SkyField::Azimuth => &self.azimuth,
            SkyField::Exposure => &self.exposure,
        }
    }

    fn spec_mut(&mut self, field: SkyField) -> &mut ParamSpec {
        match field {
            SkyField::Turbidity => &mut self.turbidity,
            SkyField::Rayleigh => &mut self.rayleigh,
            SkyField::MieCoefficient => &mut self.mie_coefficient,
            SkyField::MieDirectionalG => &mut self.mie_directional_g,
            SkyField::Inclination => &mut self.inclination,
            SkyField::Azimuth => &mut self.azimuth,
            SkyField::Exposure => &mut self.exposure,
        }
    }
}

/// Controls of the "Head" folder: one channel each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadColorField {
    R,
    G,
    B,
}

/// Material color of the bound head, channels in [0, 5].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadColorParams {
    pub r: ParamSpec,
    pub g: ParamSpec,
    pub b: ParamSpec,
}

impl Default for HeadColorParams {
    fn default() -> Self {
        Self::with_rgb(1.0, 1.5, 2.0)
    }
}

impl HeadColorParams {
    pub fn with_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: ParamSpec::new(r, 0.0, 5.0, 0.01),
            g: ParamSpec::new(g, 0.0, 5.0, 0.01),
            b: ParamSpec::new(b, 0.0, 5.0, 0.01),
        }
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.r.value, self.g.value, self.b.value]
    }
}

impl ParameterGroup for HeadColorParams {
    type Field = HeadColorField;

    const NAME: &'static str = "Head";

    const FIELDS: &'static [HeadColorField] =
        &[HeadColorField::R, HeadColorField::G, HeadColorField::B];

    fn label(field: HeadColorField) -> &'static str {
        match field {
            HeadColorField::R => "r",
            HeadColorField::G => "g",
            HeadColorField::B => "b",
        }
    }

    fn spec(&self, field: HeadColorField) -> &ParamSpec {
        match field {
            HeadColorField::R => &self.r,
            HeadColorField::G => &self.g,
            HeadColorField::B => &self.b,
        }
    }

    fn spec_mut(&mut self, field: HeadColorField) -> &mut ParamSpec {
        match field {
            HeadColorField::R => &mut self.r,
            HeadColorField::G => &mut self.g,
            HeadColorField::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SkyParams::default().validate().is_ok());
        assert!(HeadColorParams::default().validate().is_ok());
    }

    #[test]
    fn every_field_has_a_distinct_label() {
        let mut labels: Vec<&str> = SkyParams::FIELDS
            .iter()
            .map(|&f| SkyParams::label(f))
            .collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), SkyParams::FIELDS.len());
    }

    #[test]
    fn spec_and_spec_mut_agree() {
        let mut sky = SkyParams::default();
        for &field in SkyParams::FIELDS {
            let before = *sky.spec(field);
            sky.spec_mut(field).value = before.max;
            assert_eq!(sky.value(field), before.max);
        }
    }

    #[test]
    fn head_color_defaults() {
        assert_eq!(HeadColorParams::default().rgb(), [1.0, 1.5, 2.0]);
        assert_eq!(HeadColorParams::default().r.max, 5.0);
    }
}
