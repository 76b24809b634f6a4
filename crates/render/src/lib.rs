//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate the camera or pipeline state.
//! - Everything a renderer draws derives from one [`FrameTransforms`].
//!
//! The GPU backend lives in `flycube-render-wgpu`. This crate keeps the
//! trait and a text renderer used by the CLI and tests.

mod renderer;

pub use flycube_frame::FrameTransforms;
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "flycube-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
