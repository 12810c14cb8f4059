use crate::context::WorldContext;
use glam::Vec3;
use seascape_params::{Binding, ParameterGroup, SkyField, SkyParams};
use std::f32::consts::PI;

/// Unit vector towards the sun for panel angles in `0..1`.
///
/// `θ = π(inclination − 0.5)`, `φ = 2π(azimuth − 0.5)`,
/// direction `(cos φ, sin φ sin θ, sin φ cos θ)`.
pub fn sun_direction(inclination: f32, azimuth: f32) -> Vec3 {
    let theta = PI * (inclination - 0.5);
    let phi = 2.0 * PI * (azimuth - 0.5);
    Vec3::new(phi.cos(), phi.sin() * theta.sin(), phi.sin() * theta.cos())
}

/// Recompute for the "Sky" group: sky uniforms plus tone-mapping exposure.
pub fn apply_sky(params: &SkyParams, ctx: &mut WorldContext) {
    let sun = sun_direction(
        params.value(SkyField::Inclination),
        params.value(SkyField::Azimuth),
    );
    let sky = &mut ctx.sky;
    sky.turbidity = params.value(SkyField::Turbidity);
    sky.rayleigh = params.value(SkyField::Rayleigh);
    sky.mie_coefficient = params.value(SkyField::MieCoefficient);
    sky.mie_directional_g = params.value(SkyField::MieDirectionalG);
    sky.sun_position = sun;
    ctx.tone_mapping.exposure = params.value(SkyField::Exposure);
    tracing::trace!(?sun, exposure = ctx.tone_mapping.exposure, "sky recomputed");
}

pub fn bind_sky(params: SkyParams, ctx: &mut WorldContext) -> Binding<SkyParams, WorldContext> {
    Binding::bind(params, ctx, apply_sky)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn centered_angles_point_along_x() {
        assert_eq!(sun_direction(0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn sun_direction_is_unit_length() {
        for i in 0..=10 {
            for a in 0..=10 {
                let sun = sun_direction(i as f32 / 10.0, a as f32 / 10.0);
                assert!((sun.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn quarter_azimuth_faces_front() {
        // Default panel values: inclination 0.425, azimuth 0.25.
        let sun = sun_direction(0.425, 0.25);
        let theta = PI * -0.075;
        assert!(close(sun, Vec3::new(0.0, -theta.sin(), -theta.cos())));
    }

    #[test]
    fn bind_writes_uniforms_and_exposure() {
        let mut ctx = WorldContext::new(&SceneConfig::default());
        let binding = bind_sky(SkyParams::default(), &mut ctx);
        assert_eq!(binding.recompute_count(), 1);
        assert_eq!(ctx.sky.turbidity, 0.1);
        assert_eq!(ctx.sky.rayleigh, 0.01);
        assert_eq!(ctx.sky.mie_coefficient, 0.005);
        assert_eq!(ctx.sky.mie_directional_g, 0.7);
        assert_eq!(ctx.tone_mapping.exposure, 0.5);
        assert!(close(ctx.sky.sun_position, sun_direction(0.425, 0.25)));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut ctx = WorldContext::new(&SceneConfig::default());
        let mut binding = bind_sky(SkyParams::default(), &mut ctx);
        let first = (ctx.sky, ctx.tone_mapping);
        binding.refresh(&mut ctx);
        binding.refresh(&mut ctx);
        assert_eq!((ctx.sky, ctx.tone_mapping), first);
        assert_eq!(binding.recompute_count(), 3);
    }

    #[test]
    fn panel_change_moves_the_sun() {
        let mut ctx = WorldContext::new(&SceneConfig::default());
        let mut binding = bind_sky(SkyParams::default(), &mut ctx);
        assert!(binding.set(SkyField::Inclination, 0.5, &mut ctx));
        assert!(binding.set(SkyField::Azimuth, 0.5, &mut ctx));
        assert!(close(ctx.sky.sun_position, Vec3::X));
        assert!(binding.set(SkyField::Exposure, 0.9, &mut ctx));
        assert_eq!(ctx.tone_mapping.exposure, 0.9);
        assert_eq!(binding.recompute_count(), 4);
    }

    #[test]
    fn dome_radius_is_untouched() {
        let mut ctx = WorldContext::new(&SceneConfig::default());
        bind_sky(SkyParams::default(), &mut ctx);
        assert_eq!(ctx.sky.dome_radius, 450_000.0);
    }
}
