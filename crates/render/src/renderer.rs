use flycube_frame::FrameTransforms;
use glam::{Mat4, Quat, Vec3};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given transforms.
    fn render(&self, frame: &FrameTransforms) -> Self::Output;
}

/// Produces a human-readable description of a frame.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Include full column-major matrices, not just decomposed transforms.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

fn describe(out: &mut String, label: &str, model: &Mat4) {
    let (scale, rotation, translation): (Vec3, Quat, Vec3) = model.to_scale_rotation_translation();
    let (axis, angle) = rotation.to_axis_angle();
    let _ = writeln!(
        out,
        "  {label:<12} pos=({:.2}, {:.2}, {:.2}) scale={:.2} angle={:.1}deg axis=({:.2}, {:.2}, {:.2})",
        translation.x,
        translation.y,
        translation.z,
        scale.x,
        angle.to_degrees(),
        axis.x,
        axis.y,
        axis.z
    );
}

fn write_matrix(out: &mut String, label: &str, cols: [f32; 16]) {
    let _ = writeln!(out, "  {label}:");
    for row in 0..4 {
        let _ = writeln!(
            out,
            "    [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
            cols[row],
            cols[4 + row],
            cols[8 + row],
            cols[12 + row]
        );
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameTransforms) -> String {
        let mut out = String::new();
        let p = frame.camera_position;
        let _ = writeln!(
            out,
            "=== Frame (t={:.3}s, dt={:.4}s) ===",
            frame.time, frame.delta
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.1}",
            p.x, p.y, p.z, frame.fov_degrees
        );
        let _ = writeln!(out, "Models: {}", frame.model_count());

        describe(&mut out, "lit_cube", &frame.lit_cube);
        describe(&mut out, "light", &frame.light_marker);
        for (i, model) in frame.textured.iter().enumerate() {
            describe(&mut out, &format!("textured[{i}]"), model);
        }

        if self.verbose {
            write_matrix(&mut out, "view", frame.view_cols());
            write_matrix(&mut out, "projection", frame.projection_cols());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flycube_camera::Camera;
    use flycube_frame::FramePipeline;
    use flycube_input::HeldMovement;

    fn frame_at(time: f32) -> FrameTransforms {
        let mut pipeline = FramePipeline::default();
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        pipeline.advance(&mut camera, time, &HeldMovement::new())
    }

    #[test]
    fn describes_camera_and_models() {
        let output = DebugTextRenderer::new().render(&frame_at(1.0));
        assert!(output.contains("t=1.000s"));
        assert!(output.contains("pos=(0.00, 0.00, 3.00) fov=45.0"));
        assert!(output.contains("Models: 11"));
        assert!(output.contains("textured[8]"));
        assert!(!output.contains("projection:"));
    }

    #[test]
    fn verbose_includes_matrices() {
        let output = DebugTextRenderer::verbose().render(&frame_at(0.5));
        assert!(output.contains("view:"));
        assert!(output.contains("projection:"));
    }

    #[test]
    fn light_marker_scale_is_reported() {
        let output = DebugTextRenderer::new().render(&frame_at(0.0));
        assert!(output.contains("light        pos=(1.20, 1.00, 2.00) scale=0.20"));
    }
}
