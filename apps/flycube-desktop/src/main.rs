mod state;

use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use flycube_common::Settings;
use flycube_input::pixel_scroll_to_lines;
use flycube_render_wgpu::{GpuContext, WgpuRenderer};
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

/// Settings picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "flycube.toml";

#[derive(Parser)]
#[command(name = "flycube-desktop", about = "Fly a camera around lit and textured cubes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    init_error: Option<anyhow::Error>,
    // Device events arrive regardless of focus.
    focused: bool,
}

impl GpuApp {
    fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            init_error: None,
            focused: true,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let win = &self.state.settings.window;
        let attrs = Window::default_attributes()
            .with_title(win.title.clone())
            .with_inner_size(PhysicalSize::new(win.width, win.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let renderer = WgpuRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            size.width,
            size.height,
            &self.state.settings,
        );
        self.state.resized(size.width, size.height);

        capture_cursor(&window);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        let frame = self.state.next_frame();

        let (Some(window), Some(gpu), Some(renderer)) = (&self.window, &self.gpu, &self.renderer)
        else {
            return;
        };
        let Some(output) = gpu.acquire() else {
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        if let (Some(egui_winit), Some(egui_renderer)) =
            (&mut self.egui_winit, &mut self.egui_renderer)
        {
            let raw_input = egui_winit.take_egui_input(window);
            let full_output = self.egui_ctx.run(raw_input, |ctx| {
                self.state.draw_ui(ctx);
            });
            egui_winit.handle_platform_output(window, full_output.platform_output);

            let paint_jobs = self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point);
            let (width, height) = gpu.size();
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [width, height],
                pixels_per_point: full_output.pixels_per_point,
            };

            for (id, image_delta) in &full_output.textures_delta.set {
                egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
            }
            let mut encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("overlay_encoder"),
                });
            egui_renderer.update_buffers(
                &gpu.device,
                &gpu.queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("overlay_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();
                egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            gpu.queue.submit(std::iter::once(encoder.finish()));
            for id in &full_output.textures_delta.free {
                egui_renderer.free_texture(id);
            }
        }

        output.present();
    }
}

/// Hide and grab the cursor. Mouse look reads raw device motion, so either
/// grab mode works; Locked is not available everywhere.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        tracing::warn!("could not grab cursor: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("initialization failed: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed && !matches!(event, WindowEvent::CloseRequested) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let (width, height) = (new_size.width.max(1), new_size.height.max(1));
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(width, height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&gpu.device, width, height);
                    }
                }
                self.state.resized(width, height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(
                    &format!("{key:?}"),
                    key_state == ElementState::Pressed,
                    repeat,
                );
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pixel_scroll_to_lines(pos.y),
                };
                self.state.scrolled(lines);
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                self.state.focus_changed(focused);
                if focused {
                    if let Some(window) = &self.window {
                        capture_cursor(window);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.focused {
                self.state.mouse_motion(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.quit_requested() {
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    if let Some(path) = path {
        return Ok(Settings::load(&path)?);
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG);
    if fallback.exists() {
        return Ok(Settings::load(&fallback)?);
    }
    tracing::debug!("no {DEFAULT_CONFIG} found, using default settings");
    Ok(Settings::default())
}

/// `RUST_LOG` wins when it parses; otherwise `info`, or `debug` with `--verbose`.
fn log_filter(verbose: bool, from_env: Option<String>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            cli.verbose,
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        ))
        .init();

    tracing::info!("flycube-desktop starting");

    let settings = load_settings(cli.config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(settings);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e);
    }
    tracing::info!("flycube-desktop exiting");
    Ok(())
}
