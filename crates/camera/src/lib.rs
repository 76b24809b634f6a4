//! Fly camera for the flycube demo.
//!
//! Orientation is held as yaw/pitch in degrees against a fixed world-up
//! vector. The `front`/`right`/`up` basis is derived from those angles and
//! can only change through the camera's own input operations.
//!
//! # Invariants
//! - The basis is orthonormal and consistent with yaw/pitch whenever queried.
//! - Movement never changes orientation.
//! - Zoom stays within [`MIN_ZOOM`, `MAX_ZOOM`].

mod camera;

pub use camera::{
    Camera, CameraMovement, DEFAULT_MOVEMENT_SPEED, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_PITCH,
    DEFAULT_YAW, DEFAULT_ZOOM, MAX_PITCH, MAX_ZOOM, MIN_ZOOM,
};
