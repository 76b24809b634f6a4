use glam::Vec2;

/// Pixel scroll deltas (touchpads) are divided by this to get wheel lines.
pub const PIXELS_PER_LINE: f32 = 20.0;

pub fn pixel_scroll_to_lines(pixels: f64) -> f32 {
    pixels as f32 / PIXELS_PER_LINE
}

/// Turns absolute cursor positions into look deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseLook {
    last: Vec2,
    first_sample: bool,
}

impl MouseLook {
    /// `initial` is the reference point before any sample arrives, usually the window center.
    pub fn new(initial: Vec2) -> Self {
        Self {
            last: initial,
            first_sample: true,
        }
    }

    pub fn centered(width: u32, height: u32) -> Self {
        Self::new(Vec2::new(width as f32 / 2.0, height as f32 / 2.0))
    }

    /// Re-arm the first-sample guard so the next cursor event does not jump the view.
    pub fn reset(&mut self) {
        self.first_sample = true;
    }

    pub fn last_position(&self) -> Vec2 {
        self.last
    }

    /// Feed a cursor position and get `(xoffset, yoffset)`.
    /// Y is flipped because screen Y grows downward.
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Vec2 {
        if self.first_sample {
            self.last = Vec2::new(x, y);
            self.first_sample = false;
        }

        let offset = Vec2::new(x - self.last.x, self.last.y - y);
        self.last = Vec2::new(x, y);
        offset
    }

    /// Feed a relative motion (raw device delta). The virtual cursor it moves
    /// is unbounded, so a grabbed cursor pinned at the window edge still turns the view.
    pub fn motion(&mut self, dx: f32, dy: f32) -> Vec2 {
        let next = self.last + Vec2::new(dx, dy);
        self.cursor_moved(next.x, next.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flycube_camera::Camera;

    #[test]
    fn first_sample_is_zero_delta() {
        let mut look = MouseLook::centered(800, 600);
        assert_eq!(look.cursor_moved(5.0, 590.0), Vec2::ZERO);
        assert_eq!(look.last_position(), Vec2::new(5.0, 590.0));
    }

    #[test]
    fn first_sample_causes_no_rotation() {
        let mut look = MouseLook::centered(800, 600);
        let mut cam = Camera::default();
        let before = cam.clone();
        let delta = look.cursor_moved(1234.0, -77.0);
        cam.process_mouse_movement(delta.x, delta.y, true);
        assert_eq!(cam.yaw(), before.yaw());
        assert_eq!(cam.pitch(), before.pitch());
        assert_eq!(cam.front(), before.front());
    }

    #[test]
    fn later_samples_invert_y() {
        let mut look = MouseLook::centered(800, 600);
        look.cursor_moved(400.0, 300.0);
        assert_eq!(look.cursor_moved(410.0, 290.0), Vec2::new(10.0, 10.0));
        assert_eq!(look.cursor_moved(400.0, 310.0), Vec2::new(-10.0, -20.0));
    }

    #[test]
    fn reset_rearms_first_sample() {
        let mut look = MouseLook::centered(800, 600);
        look.cursor_moved(100.0, 100.0);
        look.reset();
        assert_eq!(look.cursor_moved(700.0, 20.0), Vec2::ZERO);
        assert_eq!(look.cursor_moved(701.0, 20.0), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn motion_accumulates_past_window_bounds() {
        let mut look = MouseLook::centered(800, 600);
        assert_eq!(look.motion(25.0, 0.0), Vec2::ZERO);
        for _ in 0..1000 {
            assert_eq!(look.motion(25.0, -4.0), Vec2::new(25.0, 4.0));
        }
        assert!(look.last_position().x > 800.0);
    }

    #[test]
    fn long_one_way_drag_turns_camera_around() {
        let mut look = MouseLook::centered(800, 600);
        let mut cam = Camera::default();
        let start_yaw = cam.yaw();
        for _ in 0..10_000 {
            let delta = look.motion(25.0, 0.0);
            cam.process_mouse_movement(delta.x, delta.y, true);
        }
        assert!(cam.yaw() - start_yaw > 180.0);
    }

    #[test]
    fn pixel_scroll_converts_to_lines() {
        assert_eq!(pixel_scroll_to_lines(40.0), 2.0);
        assert_eq!(pixel_scroll_to_lines(-10.0), -0.5);
    }
}
