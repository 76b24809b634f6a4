use flycube_camera::Camera;
use flycube_common::Settings;
use flycube_frame::{FramePipeline, FrameTransforms, MonotonicClock};
use flycube_input::{Action, ActionMap, HeldMovement, MouseLook};

/// Everything that persists across frames, independent of the window and GPU.
pub struct AppState {
    pub settings: Settings,
    pub camera: Camera,
    pub pipeline: FramePipeline,
    actions: ActionMap,
    held: HeldMovement,
    mouse: MouseLook,
    clock: MonotonicClock,
    show_overlay: bool,
    quit_requested: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let camera = Camera::from_settings(&settings.camera);
        let pipeline = FramePipeline::from_settings(&settings);
        let actions = ActionMap::from_settings(&settings.keybindings);
        let mouse = MouseLook::centered(settings.window.width, settings.window.height);
        Self {
            settings,
            camera,
            pipeline,
            actions,
            held: HeldMovement::new(),
            mouse,
            clock: MonotonicClock::new(),
            show_overlay: false,
            quit_requested: false,
        }
    }

    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn held(&self) -> &HeldMovement {
        &self.held
    }

    /// `key` is the key's name, e.g. `"KeyW"`. Repeats only matter for held movement.
    pub fn handle_key(&mut self, key: &str, pressed: bool, repeat: bool) {
        let Some(action) = self.actions.lookup(key) else {
            return;
        };

        match action {
            Action::Move(direction) => self.held.set(direction, pressed),
            Action::Quit if pressed => {
                tracing::info!("quit requested");
                self.quit_requested = true;
            }
            Action::ToggleOverlay if pressed && !repeat => {
                self.show_overlay = !self.show_overlay;
                tracing::debug!(show = self.show_overlay, "overlay toggled");
            }
            _ => {}
        }
    }

    /// Raw mouse motion, in device units, while the cursor is grabbed.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        let offset = self.mouse.motion(dx, dy);
        self.camera.process_mouse_movement(offset.x, offset.y, true);
    }

    pub fn scrolled(&mut self, lines: f32) {
        self.camera.process_mouse_scroll(lines);
    }

    /// Losing focus drops held keys; regaining it re-arms the first-sample guard.
    pub fn focus_changed(&mut self, focused: bool) {
        if focused {
            self.mouse.reset();
        } else {
            self.held.release_all();
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        if self.settings.projection.match_window_aspect {
            self.pipeline.projection_mut().set_viewport(width, height);
        }
    }

    pub fn next_frame(&mut self) -> FrameTransforms {
        self.advance_to(self.clock.now())
    }

    pub fn advance_to(&mut self, now: f32) -> FrameTransforms {
        self.pipeline.advance(&mut self.camera, now, &self.held)
    }

    pub fn draw_ui(&self, ctx: &egui::Context) {
        if !self.show_overlay {
            return;
        }

        let cam = &self.camera;
        egui::Window::new("flycube")
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.0}", self.pipeline.clock().fps()));
                ui.separator();
                ui.label(format!(
                    "Position: ({:.2}, {:.2}, {:.2})",
                    cam.position().x,
                    cam.position().y,
                    cam.position().z
                ));
                ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", cam.yaw(), cam.pitch()));
                ui.label(format!("FOV: {:.1}", cam.zoom()));
                ui.separator();
                ui.small("WASD: Move | Mouse: Look | Scroll: Zoom | F1: Overlay | Esc: Quit");
            });
    }
}
