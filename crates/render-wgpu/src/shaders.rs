/// WGSL shader for the lit cubes: directional + point + spot Phong lighting
/// with diffuse and specular maps.
pub const LIGHTING_SHADER: &str = r#"
struct Frame {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    view_pos: vec4<f32>,
};

struct DirLight {
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
};

struct PointLight {
    position: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    // x = constant, y = linear, z = quadratic
    attenuation: vec4<f32>,
};

struct SpotLight {
    position: vec4<f32>,
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    attenuation: vec4<f32>,
    // x = cos(inner cone), y = cos(outer cone)
    cutoffs: vec4<f32>,
};

struct Lights {
    directional: DirLight,
    points: array<PointLight, 4>,
    spot: SpotLight,
    // x = shininess
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(0) @binding(1)
var<uniform> lights: Lights;

@group(1) @binding(0)
var diffuse_map: texture_2d<f32>;

@group(1) @binding(1)
var specular_map: texture_2d<f32>;

@group(1) @binding(2)
var map_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) tint: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.proj * frame.view * world_pos;
    out.world_pos = world_pos.xyz;
    // rotation + uniform scale only, so the model matrix is fine for normals
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv;
    out.tint = instance.color;
    return out;
}

fn specular_term(light_dir: vec3<f32>, normal: vec3<f32>, view_dir: vec3<f32>) -> f32 {
    let reflect_dir = reflect(-light_dir, normal);
    return pow(max(dot(view_dir, reflect_dir), 0.0), lights.material.x);
}

fn attenuate(att: vec4<f32>, distance: f32) -> f32 {
    return 1.0 / (att.x + att.y * distance + att.z * distance * distance);
}

fn directional_light(light: DirLight, normal: vec3<f32>, view_dir: vec3<f32>, albedo: vec3<f32>, gloss: vec3<f32>) -> vec3<f32> {
    let light_dir = normalize(-light.direction.xyz);
    let diff = max(dot(normal, light_dir), 0.0);
    let spec = specular_term(light_dir, normal, view_dir);
    return light.ambient.xyz * albedo
        + light.diffuse.xyz * diff * albedo
        + light.specular.xyz * spec * gloss;
}

fn point_light(light: PointLight, normal: vec3<f32>, frag_pos: vec3<f32>, view_dir: vec3<f32>, albedo: vec3<f32>, gloss: vec3<f32>) -> vec3<f32> {
    let to_light = light.position.xyz - frag_pos;
    let light_dir = normalize(to_light);
    let diff = max(dot(normal, light_dir), 0.0);
    let spec = specular_term(light_dir, normal, view_dir);
    let fade = attenuate(light.attenuation, length(to_light));
    return (light.ambient.xyz * albedo
        + light.diffuse.xyz * diff * albedo
        + light.specular.xyz * spec * gloss) * fade;
}

fn spot_light(light: SpotLight, normal: vec3<f32>, frag_pos: vec3<f32>, view_dir: vec3<f32>, albedo: vec3<f32>, gloss: vec3<f32>) -> vec3<f32> {
    let to_light = light.position.xyz - frag_pos;
    let light_dir = normalize(to_light);
    let diff = max(dot(normal, light_dir), 0.0);
    let spec = specular_term(light_dir, normal, view_dir);
    let fade = attenuate(light.attenuation, length(to_light));

    let theta = dot(light_dir, normalize(-light.direction.xyz));
    let epsilon = light.cutoffs.x - light.cutoffs.y;
    let intensity = clamp((theta - light.cutoffs.y) / epsilon, 0.0, 1.0);

    return (light.ambient.xyz * albedo
        + (light.diffuse.xyz * diff * albedo + light.specular.xyz * spec * gloss) * intensity) * fade;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(diffuse_map, map_sampler, in.uv).rgb * in.tint.rgb;
    let gloss = textureSample(specular_map, map_sampler, in.uv).rgb;

    let normal = normalize(in.world_normal);
    let view_dir = normalize(frame.view_pos.xyz - in.world_pos);

    var color = directional_light(lights.directional, normal, view_dir, albedo, gloss);
    for (var i = 0u; i < 4u; i = i + 1u) {
        color += point_light(lights.points[i], normal, in.world_pos, view_dir, albedo, gloss);
    }
    color += spot_light(lights.spot, normal, in.world_pos, view_dir, albedo, gloss);

    return vec4<f32>(color, 1.0);
}
"#;

/// WGSL shader for the lamp markers: flat per-instance color.
pub const LAMP_SHADER: &str = r#"
struct Frame {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    view_pos: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

struct LampVertex {
    @location(0) position: vec3<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
};

struct LampOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_lamp(vertex: LampVertex, instance: InstanceInput) -> LampOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    var out: LampOutput;
    out.clip_position = frame.proj * frame.view * model * vec4<f32>(vertex.position, 1.0);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_lamp(in: LampOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lightbox_render::POINT_LIGHT_COUNT;

    fn validate_wgsl(name: &str, source: &str) -> naga::valid::ModuleInfo {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("{name} failed to parse:\n{}", e.emit_to_string(source)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name} failed validation: {e:?}"))
    }

    #[test]
    fn lighting_shader_validates() {
        validate_wgsl("lighting shader", LIGHTING_SHADER);
    }

    #[test]
    fn lamp_shader_validates() {
        validate_wgsl("lamp shader", LAMP_SHADER);
    }

    #[test]
    fn entry_points_present() {
        assert!(LIGHTING_SHADER.contains("fn vs_main"));
        assert!(LIGHTING_SHADER.contains("fn fs_main"));
        assert!(LAMP_SHADER.contains("fn vs_lamp"));
        assert!(LAMP_SHADER.contains("fn fs_lamp"));
    }

    #[test]
    fn point_light_array_matches_scene() {
        let decl = format!("array<PointLight, {POINT_LIGHT_COUNT}>");
        assert!(LIGHTING_SHADER.contains(&decl));
        let bound = format!("i < {POINT_LIGHT_COUNT}u");
        assert!(LIGHTING_SHADER.contains(&bound));
    }
}
