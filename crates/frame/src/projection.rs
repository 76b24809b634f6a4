use flycube_common::ProjectionSettings;
use glam::Mat4;

/// Perspective projection with a fixed aspect ratio and clip planes.
/// The vertical field of view is supplied per frame from the camera zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_settings(&ProjectionSettings::default())
    }
}

impl Projection {
    pub fn from_settings(settings: &ProjectionSettings) -> Self {
        Self {
            aspect: settings.aspect_ratio,
            near: settings.near,
            far: settings.far,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Right-handed perspective with a [0, 1] depth range.
    pub fn matrix(&self, fov_degrees: f32) -> Mat4 {
        Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}
