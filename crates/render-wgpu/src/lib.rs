//! wgpu render backend for the flycube demo.
//!
//! Draws a lit cube, a small light-source marker and the spinning textured
//! cubes from one [`flycube_frame::FrameTransforms`] per frame.
//!
//! # Invariants
//! - The renderer never mutates camera or pipeline state.
//! - Asset failures (textures, shader overrides) are logged and replaced by
//!   built-in fallbacks; they never abort a frame.

mod context;
mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use context::{GpuContext, GpuInitError};
pub use gpu::WgpuRenderer;
pub use mesh::{CUBE_VERTEX_COUNT, LitVertex, TexturedVertex, lit_cube_vertices, textured_cube_vertices};
pub use shaders::{ShaderError, ShaderSources};
pub use texture::{
    TextureError, decode_texture, decode_texture_within, fallback_texture, load_or_fallback,
};
