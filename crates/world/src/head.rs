use crate::context::WorldContext;
use seascape_common::Color;
use seascape_params::{Binding, HeadColorParams};
use seascape_scene::MaterialHandle;

/// Bind the "Head" color group to `material`.
///
/// Every node drawn with `material` changes color together.
pub fn bind_head_color(
    params: HeadColorParams,
    material: MaterialHandle,
    ctx: &mut WorldContext,
) -> Binding<HeadColorParams, WorldContext> {
    Binding::bind(params, ctx, move |params: &HeadColorParams, ctx: &mut WorldContext| {
        let [r, g, b] = params.rgb();
        match ctx.scene.material_mut(material) {
            Some(m) => m.color = Color::new(r, g, b),
            None => tracing::warn!(material = material.0, "head material missing"),
        }
    })
}
