use flycube_common::SceneSettings;
use glam::{Mat4, Vec3};

/// World-space offsets of the textured cubes. Index order drives their spin speed.
pub const TEXTURED_CUBE_OFFSETS: [Vec3; 9] = [
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Spin angle in radians of instance `index` at `time` seconds.
pub fn spin_angle(index: usize, time: f32, speed_degrees: f32) -> f32 {
    time * speed_degrees.to_radians() * index as f32
}

/// `translate(offset) * rotate(angle, axis)`.
pub fn textured_instance_model(
    offset: Vec3,
    index: usize,
    time: f32,
    speed_degrees: f32,
    axis: Vec3,
) -> Mat4 {
    Mat4::from_translation(offset)
        * Mat4::from_axis_angle(axis.normalize(), spin_angle(index, time, speed_degrees))
}

/// Static placement of the lit cube, light marker and textured cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub light_position: Vec3,
    pub light_scale: f32,
    pub spin_speed: f32,
    pub spin_axis: Vec3,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::from_settings(&SceneSettings::default())
    }
}

impl SceneLayout {
    pub fn from_settings(settings: &SceneSettings) -> Self {
        let spin_axis = if settings.spin_axis.length_squared() > 0.0 {
            settings.spin_axis
        } else {
            tracing::warn!("scene.spin_axis is zero; spinning around +Y");
            Vec3::Y
        };
        Self {
            light_position: settings.light_position,
            light_scale: settings.light_scale,
            spin_speed: settings.spin_speed,
            spin_axis,
        }
    }

    pub fn lit_cube_model(&self) -> Mat4 {
        Mat4::IDENTITY
    }

    pub fn light_marker_model(&self) -> Mat4 {
        Mat4::from_translation(self.light_position) * Mat4::from_scale(Vec3::splat(self.light_scale))
    }

    pub fn textured_models(&self, time: f32) -> Vec<Mat4> {
        TEXTURED_CUBE_OFFSETS
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                textured_instance_model(*offset, i, time, self.spin_speed, self.spin_axis)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_zero_never_rotates() {
        for step in 0..100 {
            let t = step as f32 * 3.7;
            assert_eq!(spin_angle(0, t, 50.0), 0.0);
            let m = textured_instance_model(TEXTURED_CUBE_OFFSETS[0], 0, t, 50.0, Vec3::new(0.5, 1.0, 0.0));
            assert!(m.abs_diff_eq(Mat4::from_translation(TEXTURED_CUBE_OFFSETS[0]), 1e-6));
        }
    }

    #[test]
    fn angle_increases_with_time_for_later_instances() {
        for i in 1..TEXTURED_CUBE_OFFSETS.len() {
            let mut previous = spin_angle(i, 0.0, 50.0);
            for step in 1..200 {
                let angle = spin_angle(i, step as f32 * 0.25, 50.0);
                assert!(angle > previous, "instance {i} step {step}");
                previous = angle;
            }
        }
    }

    #[test]
    fn angle_scales_with_index() {
        let t = 2.0;
        assert!((spin_angle(3, t, 50.0) - 3.0 * spin_angle(1, t, 50.0)).abs() < 1e-5);
        assert!((spin_angle(1, 1.0, 50.0) - 50.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn instance_model_keeps_offset_as_translation() {
        let layout = SceneLayout::default();
        let models = layout.textured_models(12.5);
        assert_eq!(models.len(), TEXTURED_CUBE_OFFSETS.len());
        for (model, offset) in models.iter().zip(TEXTURED_CUBE_OFFSETS) {
            assert!(model.w_axis.truncate().abs_diff_eq(offset, 1e-6));
        }
    }

    #[test]
    fn light_marker_is_scaled_and_placed() {
        let layout = SceneLayout::default();
        let m = layout.light_marker_model();
        let corner = m.transform_point3(Vec3::splat(0.5));
        assert!(corner.abs_diff_eq(Vec3::new(1.2, 1.0, 2.0) + Vec3::splat(0.1), 1e-6));
        assert_eq!(layout.lit_cube_model(), Mat4::IDENTITY);
    }

    #[test]
    fn zero_axis_falls_back_to_y() {
        let settings = SceneSettings {
            spin_axis: Vec3::ZERO,
            ..SceneSettings::default()
        };
        let layout = SceneLayout::from_settings(&settings);
        assert_eq!(layout.spin_axis, Vec3::Y);
    }
}
