//! wgpu render backend for the lightbox demo.
//!
//! Draws the fixed scene with two pipelines: a Phong lighting pipeline for
//! the textured cubes (directional, four point lights, camera spotlight) and
//! an unlit pipeline for the lamp markers.
//!
//! # Invariants
//! - Renderer never mutates the camera; it reads a `RenderView` per frame.
//! - Uniform structs are built from `vec4`/`mat4` only and match the WGSL
//!   declarations byte for byte.

mod gpu;
mod shaders;
mod texture;
mod uniforms;

pub use gpu::{RendererOptions, WgpuRenderer};
pub use texture::{RenderError, TextureData};
