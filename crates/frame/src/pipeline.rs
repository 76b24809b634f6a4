use crate::clock::FrameClock;
use crate::projection::Projection;
use crate::scene::SceneLayout;
use flycube_camera::Camera;
use flycube_common::Settings;
use flycube_input::HeldMovement;
use glam::{Mat4, Vec3};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransforms {
    /// Seconds since start.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub view: Mat4,
    pub projection: Mat4,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub camera_position: Vec3,
    pub lit_cube: Mat4,
    pub light_marker: Mat4,
    pub textured: Vec<Mat4>,
}

impl FrameTransforms {
    /// Column-major floats, as uploaded to uniform and instance buffers.
    pub fn view_cols(&self) -> [f32; 16] {
        self.view.to_cols_array()
    }

    pub fn projection_cols(&self) -> [f32; 16] {
        self.projection.to_cols_array()
    }

    /// Models in draw order: lit cube, light marker, then textured instances.
    pub fn models(&self) -> impl Iterator<Item = &Mat4> {
        [&self.lit_cube, &self.light_marker]
            .into_iter()
            .chain(self.textured.iter())
    }

    pub fn model_count(&self) -> usize {
        2 + self.textured.len()
    }
}

/// Frame-to-frame transform state. The camera itself is owned by the host.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    clock: FrameClock,
    projection: Projection,
    layout: SceneLayout,
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl FramePipeline {
    pub fn new(projection: Projection, layout: SceneLayout) -> Self {
        Self {
            clock: FrameClock::new(),
            projection,
            layout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Projection::from_settings(&settings.projection),
            SceneLayout::from_settings(&settings.scene),
        )
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// Run one frame: tick the clock, move the camera for every held
    /// direction, then build the frame's matrices.
    pub fn advance(&mut self, camera: &mut Camera, now: f32, held: &HeldMovement) -> FrameTransforms {
        let delta = self.clock.tick(now);
        for direction in held.iter() {
            camera.process_keyboard(direction, delta);
        }
        tracing::trace!(now, delta, position = ?camera.position(), "frame advanced");
        self.transforms(camera, now, delta)
    }

    /// Matrices for the camera's current state at `time`, without touching the clock.
    pub fn transforms(&self, camera: &Camera, time: f32, delta: f32) -> FrameTransforms {
        let fov_degrees = camera.zoom();
        FrameTransforms {
            time,
            delta,
            view: camera.view_matrix(),
            projection: self.projection.matrix(fov_degrees),
            fov_degrees,
            camera_position: camera.position(),
            lit_cube: self.layout.lit_cube_model(),
            light_marker: self.layout.light_marker_model(),
            textured: self.layout.textured_models(time),
        }
    }
}
