use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use lightbox_camera::{Camera, Movement};
use lightbox_config::AppConfig;
use lightbox_input::InputState;
use lightbox_render::{DebugTextRenderer, RenderView, Renderer, Scene};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightbox-cli", about = "Headless tools for the lightbox demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the configured camera
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Fly the camera through a scripted input sequence and print the scene
    Fly {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Movement keys held for every frame (comma separated)
        #[arg(long, value_delimiter = ',')]
        hold: Vec<Direction>,
        /// Horizontal mouse motion per frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        mouse_x: f32,
        /// Vertical mouse motion per frame (window space, down is positive)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        mouse_y: f32,
        /// Scroll per frame (positive zooms in)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        scroll: f32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl From<Direction> for Movement {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Forward => Movement::Forward,
            Direction::Backward => Movement::Backward,
            Direction::Left => Movement::Left,
            Direction::Right => Movement::Right,
            Direction::Up => Movement::Up,
            Direction::Down => Movement::Down,
        }
    }
}

/// Per-frame input replayed by `fly`.
#[derive(Debug, Clone, Default)]
struct FlightScript {
    frames: u32,
    dt: f32,
    hold: Vec<Movement>,
    mouse_x: f32,
    mouse_y: f32,
    scroll: f32,
}

/// Drive a camera built from `config` through `script`, one drain per frame.
fn fly(config: &AppConfig, script: &FlightScript) -> Camera {
    let mut camera = config.build_camera();
    let mut input = InputState::new(true);
    for &movement in &script.hold {
        input.set_held(movement, true);
    }

    for frame in 0..script.frames {
        input.mouse_motion(script.mouse_x, script.mouse_y);
        input.scroll(script.scroll);
        for action in input.drain_actions() {
            action.apply(&mut camera, script.dt);
        }
        tracing::debug!(
            frame,
            x = camera.position().x,
            y = camera.position().y,
            z = camera.position().z,
            "frame simulated"
        );
    }
    camera
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load_or_default(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Info => {
            println!("lightbox-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", lightbox_camera::crate_info());
            println!("input: {}", lightbox_input::crate_info());
            println!("render: {}", lightbox_render::crate_info());

            let camera = config.build_camera();
            let p = camera.position();
            let f = camera.front();
            println!(
                "camera: pos=({:.2}, {:.2}, {:.2}) front=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} fov={:.1}",
                p.x,
                p.y,
                p.z,
                f.x,
                f.y,
                f.z,
                camera.yaw(),
                camera.pitch(),
                camera.field_of_view()
            );
            println!(
                "camera: speed={} sensitivity={} max_fov={}",
                camera.movement_speed(),
                camera.look_sensitivity(),
                camera.max_field_of_view()
            );
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
        Commands::Fly {
            frames,
            dt,
            hold,
            mouse_x,
            mouse_y,
            scroll,
        } => {
            anyhow::ensure!(dt.is_finite() && dt >= 0.0, "dt must be a non-negative number");

            let script = FlightScript {
                frames,
                dt,
                hold: hold.into_iter().map(Movement::from).collect(),
                mouse_x,
                mouse_y,
                scroll,
            };
            let camera = fly(&config, &script);

            let view = RenderView::from_camera(&camera, config.render.near, config.render.far);
            let output = DebugTextRenderer::new().render(&Scene::default(), &view);
            print!("{output}");
            println!(
                "yaw={:.2} pitch={:.2} frames={frames} dt={dt}",
                camera.yaw(),
                camera.pitch()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn held_forward_for_one_second() {
        let script = FlightScript {
            frames: 60,
            dt: 1.0 / 60.0,
            hold: vec![Movement::Forward],
            ..FlightScript::default()
        };
        let camera = fly(&AppConfig::default(), &script);
        let p = camera.position();
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0));
        assert!(approx(p.z, -2.5), "z = {}", p.z);
    }

    #[test]
    fn mouse_and_scroll_turn_and_zoom() {
        let script = FlightScript {
            frames: 10,
            dt: 0.016,
            mouse_x: 10.0,
            mouse_y: -10.0,
            scroll: 1.0,
            ..FlightScript::default()
        };
        let camera = fly(&AppConfig::default(), &script);
        // 10 frames * 10 units * 0.1 sensitivity
        assert!(approx(camera.yaw(), -80.0));
        assert!(approx(camera.pitch(), 10.0));
        assert!(approx(camera.field_of_view(), 35.0));
        assert_eq!(camera.position(), AppConfig::default().build_camera().position());
    }

    #[test]
    fn zero_frames_leaves_camera_at_config_pose() {
        let camera = fly(&AppConfig::default(), &FlightScript::default());
        assert_eq!(camera, AppConfig::default().build_camera());
    }
}
