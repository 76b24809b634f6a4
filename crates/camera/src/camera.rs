use flycube_common::CameraSettings;
use glam::{Mat4, Vec3};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_MOVEMENT_SPEED: f32 = 2.5;
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch limit in degrees when pitch is constrained. Keeps `front` away from `world_up`.
pub const MAX_PITCH: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Direction of a keyboard-driven camera move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

impl CameraMovement {
    /// All directions in the order held keys are applied each frame.
    pub const ALL: [CameraMovement; 4] = [
        CameraMovement::Forward,
        CameraMovement::Left,
        CameraMovement::Backward,
        CameraMovement::Right,
    ];
}

/// Fly camera with position, yaw/pitch orientation and a zoom-based field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Camera at `position` facing down -Z with +Y as world up.
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Camera with explicit world-up vector and yaw/pitch in degrees.
    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    /// Scalar form of [`Camera::with_orientation`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        up_x: f32,
        up_y: f32,
        up_z: f32,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self::with_orientation(
            Vec3::new(pos_x, pos_y, pos_z),
            Vec3::new(up_x, up_y, up_z),
            yaw,
            pitch,
        )
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self::with_orientation(
            settings.position,
            settings.world_up,
            settings.yaw,
            settings.pitch,
        );
        camera.movement_speed = settings.movement_speed;
        camera.mouse_sensitivity = settings.mouse_sensitivity;
        camera.zoom = settings.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera
    }

    /// Override movement speed (units/s) and mouse sensitivity (degrees/pixel).
    pub fn with_tuning(mut self, movement_speed: f32, mouse_sensitivity: f32) -> Self {
        self.movement_speed = movement_speed;
        self.mouse_sensitivity = mouse_sensitivity;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Right-handed look-at matrix from `position` towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a cursor delta in pixels. `yoffset` is positive when the cursor moves up.
    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        }

        self.update_vectors();
    }

    /// Scrolling up narrows the field of view.
    pub fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front length {}", f.length());
        assert!((r.length() - 1.0).abs() < EPS, "right length {}", r.length());
        assert!((u.length() - 1.0).abs() < EPS, "up length {}", u.length());
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    #[test]
    fn default_orientation_faces_negative_z() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(cam.yaw(), DEFAULT_YAW);
        assert_eq!(cam.pitch(), DEFAULT_PITCH);
        assert_eq!(cam.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn default_view_matrix_is_look_at() {
        let p = Vec3::new(0.0, 0.0, 3.0);
        let cam = Camera::new(p);
        let expected = Mat4::look_at_rh(p, p + Vec3::NEG_Z, Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn basis_stays_orthonormal_across_angles() {
        let mut yaw = -720.0;
        while yaw <= 720.0 {
            let mut pitch = -89.0;
            while pitch <= 89.0 {
                let cam = Camera::with_orientation(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_orthonormal(&cam);
                pitch += 7.5;
            }
            yaw += 13.0;
        }
    }

    #[test]
    fn basis_stays_orthonormal_after_mouse_moves() {
        let mut cam = Camera::default();
        for i in 0..200 {
            let dx = ((i * 37) % 101) as f32 - 50.0;
            let dy = ((i * 53) % 89) as f32 - 44.0;
            cam.process_mouse_movement(dx, dy, true);
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn pitch_is_constrained() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(0.0, 10_000.0, true);
        assert_eq!(cam.pitch(), MAX_PITCH);
        cam.process_mouse_movement(0.0, -50_000.0, true);
        assert_eq!(cam.pitch(), -MAX_PITCH);

        for i in 0..500 {
            let dy = if i % 3 == 0 { 400.0 } else { -170.0 };
            cam.process_mouse_movement(1.0, dy, true);
            assert!(cam.pitch() >= -MAX_PITCH && cam.pitch() <= MAX_PITCH);
        }
    }

    #[test]
    fn unconstrained_pitch_can_exceed_limit() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(0.0, 1000.0, false);
        assert!((cam.pitch() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(10_000.0, 0.0, true);
        assert!((cam.yaw() - (DEFAULT_YAW + 1000.0)).abs() < 1e-3);
        assert_orthonormal(&cam);
    }

    #[test]
    fn mouse_sensitivity_scales_offsets() {
        let mut cam = Camera::default().with_tuning(2.5, 0.5);
        cam.process_mouse_movement(10.0, 4.0, true);
        assert!((cam.yaw() - (DEFAULT_YAW + 5.0)).abs() < EPS);
        assert!((cam.pitch() - 2.0).abs() < EPS);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(-10.0);
        assert_eq!(cam.zoom(), MAX_ZOOM);
        cam.process_mouse_scroll(100.0);
        assert_eq!(cam.zoom(), MIN_ZOOM);
        cam.process_mouse_scroll(-3.0);
        assert_eq!(cam.zoom(), 4.0);

        for i in 0..300 {
            let dy = if i % 2 == 0 { 7.3 } else { -11.1 };
            cam.process_mouse_scroll(dy);
            assert!(cam.zoom() >= MIN_ZOOM && cam.zoom() <= MAX_ZOOM);
        }
    }

    #[test]
    fn forward_then_backward_returns_to_start() {
        let mut cam = Camera::with_orientation(Vec3::new(1.0, -2.0, 5.0), Vec3::Y, 33.0, 21.0);
        let start = cam.position();
        cam.process_keyboard(CameraMovement::Forward, 0.016);
        assert!(!cam.position().abs_diff_eq(start, EPS));
        cam.process_keyboard(CameraMovement::Backward, 0.016);
        assert!(cam.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn keyboard_moves_along_basis() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -2.5), EPS));
        cam.process_keyboard(CameraMovement::Right, 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(5.0, 0.0, -2.5), EPS));
        cam.process_keyboard(CameraMovement::Left, 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -2.5), EPS));
    }

    #[test]
    fn movement_does_not_change_orientation() {
        let mut cam = Camera::with_orientation(Vec3::ZERO, Vec3::Y, 12.0, -30.0);
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        for direction in CameraMovement::ALL {
            cam.process_keyboard(direction, 0.5);
        }
        assert_eq!(cam.front(), f);
        assert_eq!(cam.right(), r);
        assert_eq!(cam.up(), u);
    }

    #[test]
    fn from_components_matches_with_orientation() {
        let a = Camera::from_components(1.0, 2.0, 3.0, 0.0, 1.0, 0.0, -45.0, 10.0);
        let b = Camera::with_orientation(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, -45.0, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn from_settings_applies_tuning_and_clamps_zoom() {
        let settings = CameraSettings {
            movement_speed: 7.0,
            mouse_sensitivity: 0.25,
            zoom: 90.0,
            ..CameraSettings::default()
        };
        let cam = Camera::from_settings(&settings);
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.movement_speed(), 7.0);
        assert_eq!(cam.mouse_sensitivity(), 0.25);
        assert_eq!(cam.zoom(), MAX_ZOOM);
    }
}
