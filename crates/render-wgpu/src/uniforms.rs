//! CPU-side mirrors of the WGSL uniform and vertex layouts.
//!
//! Every uniform field is a `vec4` or `mat4` so the Rust and WGSL layouts
//! agree without explicit padding.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use lightbox_render::{Attenuation, CubeMesh, POINT_LIGHT_COUNT, RenderView, Scene};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct FrameUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    view_pos: [f32; 4],
}

impl FrameUniforms {
    pub(crate) fn new(view: &RenderView, aspect: f32) -> Self {
        Self {
            view: view.view.to_cols_array_2d(),
            proj: view.projection(aspect).to_cols_array_2d(),
            view_pos: point(view.eye),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct DirLightUniform {
    direction: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct PointLightUniform {
    position: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    attenuation: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct SpotLightUniform {
    position: [f32; 4],
    direction: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    attenuation: [f32; 4],
    cutoffs: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct LightUniforms {
    directional: DirLightUniform,
    points: [PointLightUniform; POINT_LIGHT_COUNT],
    spot: SpotLightUniform,
    material: [f32; 4],
}

impl LightUniforms {
    /// Pack the scene lights. The spotlight sits at the eye and points along
    /// the view direction.
    pub(crate) fn new(scene: &Scene, view: &RenderView) -> Self {
        let d = &scene.directional;
        let s = &scene.spot;
        let (inner, outer) = s.cutoffs();
        Self {
            directional: DirLightUniform {
                direction: direction(d.direction),
                ambient: color(d.ambient),
                diffuse: color(d.diffuse),
                specular: color(d.specular),
            },
            points: scene.point_lights.map(|p| PointLightUniform {
                position: point(p.position),
                ambient: color(p.ambient),
                diffuse: color(p.diffuse),
                specular: color(p.specular),
                attenuation: attenuation(&p.attenuation),
            }),
            spot: SpotLightUniform {
                position: point(view.eye),
                direction: direction(view.front),
                ambient: color(s.ambient),
                diffuse: color(s.diffuse),
                specular: color(s.specular),
                attenuation: attenuation(&s.attenuation),
                cutoffs: [inner, outer, 0.0, 0.0],
            },
            material: [scene.material.shininess, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

pub(crate) fn mesh_vertices(mesh: &CubeMesh) -> Vec<Vertex> {
    mesh.vertices
        .iter()
        .map(|v| Vertex {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            uv: v.uv.to_array(),
        })
        .collect()
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

impl InstanceData {
    pub(crate) fn new(model: Mat4, tint: Vec3) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: tint.extend(1.0).to_array(),
        }
    }
}

/// Cube instances followed by lamp instances.
pub(crate) fn scene_instances(scene: &Scene) -> Vec<InstanceData> {
    let cubes = scene
        .cube_transforms()
        .into_iter()
        .map(|m| InstanceData::new(m, Vec3::ONE));
    let lamps = scene
        .lamp_transforms()
        .into_iter()
        .map(|m| InstanceData::new(m, scene.lamp_color));
    cubes.chain(lamps).collect()
}

fn point(v: Vec3) -> [f32; 4] {
    v.extend(1.0).to_array()
}

fn direction(v: Vec3) -> [f32; 4] {
    v.extend(0.0).to_array()
}

fn color(v: Vec3) -> [f32; 4] {
    v.extend(1.0).to_array()
}

fn attenuation(a: &Attenuation) -> [f32; 4] {
    [a.constant, a.linear, a.quadratic, 0.0]
}
