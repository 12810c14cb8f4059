/// Per-frame uniforms shared by every pipeline. Layout matches `FrameUniforms` in gpu.rs.
const UNIFORMS: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    // xyz: unit vector towards the sun, w: exposure
    sun: vec4<f32>,
    // turbidity, rayleigh, mie coefficient, mie directional g
    sky: vec4<f32>,
    // time, distortion scale, alpha, level
    water: vec4<f32>,
    // rgb, w: plane size
    water_color: vec4<f32>,
    // xyz: water sun direction, w: 1 when a normal map is attached
    water_sun: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
"#;

/// Full-screen sky gradient with a sun disc. Not physically based.
const SKY: &str = r#"
struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_sky(@builtin(vertex_index) index: u32) -> SkyOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    let ndc = uv * 2.0 - 1.0;
    var out: SkyOutput;
    out.clip_position = vec4<f32>(ndc, 1.0, 1.0);
    out.ndc = ndc;
    return out;
}

@fragment
fn fs_sky(in: SkyOutput) -> @location(0) vec4<f32> {
    let far = uniforms.inv_view_proj * vec4<f32>(in.ndc, 1.0, 1.0);
    let dir = normalize(far.xyz / far.w - uniforms.camera_pos.xyz);
    let sun = normalize(uniforms.sun.xyz);

    let turbidity = uniforms.sky.x;
    let rayleigh = uniforms.sky.y;
    let mie = uniforms.sky.z;
    let g = uniforms.sky.w;

    let height = clamp(dir.y, 0.0, 1.0);
    let zenith = vec3<f32>(0.15, 0.35, 0.8) * (0.4 + rayleigh);
    let horizon = mix(vec3<f32>(0.75, 0.8, 0.9), vec3<f32>(0.9, 0.7, 0.5), clamp(turbidity / 20.0, 0.0, 1.0));
    var color = mix(horizon, zenith, pow(height, 0.5));

    let cos_sun = max(dot(dir, sun), 0.0);
    let halo = pow(cos_sun, mix(8.0, 256.0, g)) * (mie * 40.0);
    let disc = smoothstep(0.9995, 0.9999, cos_sun);
    color = color + vec3<f32>(1.0, 0.9, 0.7) * (halo + disc * 4.0);

    let exposed = color * uniforms.sun.w * 2.0;
    return vec4<f32>(exposed / (vec3<f32>(1.0) + exposed), 1.0);
}
"#;

/// Square water plane with a scrolling ripple and sun glint.
const WATER: &str = r#"
struct WaterOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
};

@vertex
fn vs_water(@builtin(vertex_index) index: u32) -> WaterOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5), vec2<f32>(0.5, -0.5), vec2<f32>(0.5, 0.5),
        vec2<f32>(0.5, 0.5), vec2<f32>(-0.5, 0.5), vec2<f32>(-0.5, -0.5),
    );
    let c = corners[index] * uniforms.water_color.w;
    let world_pos = vec3<f32>(c.x, uniforms.water.w, c.y);
    var out: WaterOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world_pos, 1.0);
    out.world_pos = world_pos;
    return out;
}

@fragment
fn fs_water(in: WaterOutput) -> @location(0) vec4<f32> {
    let time = uniforms.water.x;
    let distortion = uniforms.water.y;
    let p = in.world_pos.xz * 0.05;
    // Two crossing wave trains; the normal map, when present, adds a finer one.
    var ripple = vec2<f32>(
        sin(p.x * 3.0 + time * 20.0) + sin((p.x + p.y) * 1.7 + time * 13.0),
        cos(p.y * 2.5 - time * 17.0) + cos((p.x - p.y) * 2.1 + time * 11.0),
    );
    ripple = ripple + uniforms.water_sun.w * vec2<f32>(sin(p.y * 9.0 + time * 40.0), cos(p.x * 9.0 - time * 40.0)) * 0.5;
    let normal = normalize(vec3<f32>(ripple.x * distortion * 0.02, 1.0, ripple.y * distortion * 0.02));

    let view = normalize(uniforms.camera_pos.xyz - in.world_pos);
    let half_dir = normalize(view + normalize(uniforms.water_sun.xyz));
    let glint = pow(max(dot(normal, half_dir), 0.0), 100.0);
    let fresnel = pow(1.0 - max(dot(normal, view), 0.0), 3.0);

    let base = uniforms.water_color.rgb * 0.3;
    let reflection = vec3<f32>(0.6, 0.7, 0.8) * fresnel;
    let color = base + reflection + vec3<f32>(glint);
    return vec4<f32>(color, uniforms.water.z);
}
"#;

/// Instanced heads, colored by their material under white ambient light.
const HEADS: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_head(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_head(in: VertexOutput) -> @location(0) vec4<f32> {
    let sun = normalize(uniforms.sun.xyz);
    let lighting = 0.7 + 0.3 * max(dot(in.world_normal, sun), 0.0);
    return vec4<f32>(clamp(in.color.rgb * lighting * 0.5, vec3<f32>(0.0), vec3<f32>(1.0)), in.color.a);
}
"#;

pub fn sky_shader() -> String {
    format!("{UNIFORMS}{SKY}")
}

pub fn water_shader() -> String {
    format!("{UNIFORMS}{WATER}")
}

pub fn heads_shader() -> String {
    format!("{UNIFORMS}{HEADS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shader_declares_the_shared_uniforms() {
        for source in [sky_shader(), water_shader(), heads_shader()] {
            assert!(source.contains("var<uniform> uniforms: Uniforms;"));
        }
    }

    #[test]
    fn entry_points_exist() {
        assert!(sky_shader().contains("fn vs_sky") && sky_shader().contains("fn fs_sky"));
        assert!(water_shader().contains("fn vs_water") && water_shader().contains("fn fs_water"));
        assert!(heads_shader().contains("fn vs_head") && heads_shader().contains("fn fs_head"));
    }
}
