//! Per-frame transform pipeline.
//!
//! Each frame: measure elapsed time, apply held movement to the camera, then
//! build the view, projection and model matrices the renderer consumes.
//!
//! # Invariants
//! - The pipeline owns no camera; the host passes it in every frame.
//! - Textured instance `i` spins at `i` times the base angular speed, so
//!   instance 0 never rotates. The angle is never wrapped.
//! - Given the same timestamps and held keys, the camera trajectory is identical.

mod clock;
mod pipeline;
mod projection;
mod scene;

pub use clock::{FrameClock, MonotonicClock};
pub use pipeline::{FramePipeline, FrameTransforms};
pub use projection::Projection;
pub use scene::{SceneLayout, TEXTURED_CUBE_OFFSETS, spin_angle, textured_instance_model};
