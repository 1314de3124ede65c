//! Rendering adapter: renderer-agnostic scene data and view.
//!
//! # Invariants
//! - Renderers never mutate the camera; they read a [`RenderView`] snapshot.
//! - The scene is fixed data: one cube mesh, ten placements, a directional
//!   light, four point lights and a spotlight that follows the camera.

mod renderer;
mod scene;
mod view;

pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{
    Attenuation, CubeMesh, DirectionalLight, Material, MeshVertex, POINT_LIGHT_COUNT, PointLight,
    Scene, SpotLight,
};
pub use view::RenderView;

pub fn crate_info() -> &'static str {
    "lightbox-render v0.1.0"
}
