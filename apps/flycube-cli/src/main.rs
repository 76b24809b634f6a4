use clap::{Parser, Subcommand, ValueEnum};
use flycube_camera::{Camera, CameraMovement};
use flycube_common::Settings;
use flycube_frame::FramePipeline;
use flycube_input::HeldMovement;
use flycube_render::{DebugTextRenderer, Renderer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flycube-cli", about = "Headless tools for the flycube camera demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (TOML); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the active settings summary
    Info,
    /// Fly the camera for a number of fixed-step frames
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Directions held for the whole flight (repeatable)
        #[arg(long, value_enum)]
        hold: Vec<Direction>,
        /// Horizontal mouse offset applied every frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_x: f32,
        /// Vertical mouse offset applied every frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_y: f32,
        /// Print the camera every N frames
        #[arg(long, default_value = "10")]
        every: u32,
    },
    /// Print the matrices of a single frame at a given time
    Matrices {
        /// Scene time in seconds
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        time: f32,
        /// Include full view and projection matrices
        #[arg(long)]
        full: bool,
    },
    /// Print the effective settings as TOML, or write them to a file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl From<Direction> for CameraMovement {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => CameraMovement::Forward,
            Direction::Backward => CameraMovement::Backward,
            Direction::Left => CameraMovement::Left,
            Direction::Right => CameraMovement::Right,
        }
    }
}

/// `RUST_LOG` wins when it parses; otherwise `info`, or `debug` with `--verbose`.
fn log_filter(verbose: bool, from_env: Option<String>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            cli.verbose,
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        ))
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("flycube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", flycube_common::crate_info());
            println!("render: {}", flycube_render::crate_info());
            let cam = &settings.camera;
            println!(
                "camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} zoom={:.1}",
                cam.position.x, cam.position.y, cam.position.z, cam.yaw, cam.pitch, cam.zoom
            );
            println!(
                "window: {}x{} \"{}\"",
                settings.window.width, settings.window.height, settings.window.title
            );
            println!(
                "projection: aspect={:.3} near={} far={}",
                settings.projection.aspect_ratio, settings.projection.near, settings.projection.far
            );
        }
        Commands::Simulate {
            frames,
            dt,
            hold,
            look_x,
            look_y,
            every,
        } => {
            anyhow::ensure!(dt >= 0.0, "--dt must not be negative");
            let held: HeldMovement = hold.into_iter().map(CameraMovement::from).collect();
            let mut camera = Camera::from_settings(&settings.camera);
            let mut pipeline = FramePipeline::from_settings(&settings);
            let every = every.max(1);

            println!(
                "Simulating {frames} frames at dt={dt}s, holding {:?}",
                held.iter().collect::<Vec<_>>()
            );

            // Frame 0 only establishes the clock baseline.
            let mut frame = pipeline.advance(&mut camera, 0.0, &held);
            for i in 1..=frames {
                if look_x != 0.0 || look_y != 0.0 {
                    camera.process_mouse_movement(look_x, look_y, true);
                }
                frame = pipeline.advance(&mut camera, i as f32 * dt, &held);
                if i % every == 0 || i == frames {
                    let p = camera.position();
                    println!(
                        "frame {i:>5}: pos=({:.3}, {:.3}, {:.3}) yaw={:.2} pitch={:.2}",
                        p.x,
                        p.y,
                        p.z,
                        camera.yaw(),
                        camera.pitch()
                    );
                }
            }

            print!("{}", DebugTextRenderer::new().render(&frame));
        }
        Commands::Matrices { time, full } => {
            let camera = Camera::from_settings(&settings.camera);
            let pipeline = FramePipeline::from_settings(&settings);
            let frame = pipeline.transforms(&camera, time, 0.0);
            let renderer = DebugTextRenderer { verbose: full };
            print!("{}", renderer.render(&frame));
        }
        Commands::Config { write } => match write {
            Some(path) => {
                settings.save(&path)?;
                println!("Wrote settings to {}", path.display());
            }
            None => print!("{}", settings.to_toml()?),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directives_override_verbosity() {
        assert_eq!(log_filter(false, Some("warn".into())).to_string(), "warn");
        assert_eq!(
            log_filter(true, Some("flycube_frame=trace".into())).to_string(),
            "flycube_frame=trace"
        );
    }

    #[test]
    fn verbosity_applies_without_env() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        assert_eq!(log_filter(true, None).to_string(), "debug");
    }
}
