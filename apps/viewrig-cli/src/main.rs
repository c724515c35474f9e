use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use viewrig_camera::{Camera, CameraConfig, CameraMode, CameraUniform, Projection};
use viewrig_common::{direction_from_yaw_pitch, yaw_pitch_from_direction};
use viewrig_input::ActionScript;
use viewrig_tools::CameraInspector;

#[derive(Parser)]
#[command(name = "viewrig-cli", about = "CLI tool for viewrig cameras")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build a camera and print its view and projection matrices
    View {
        #[command(flatten)]
        camera: CameraArgs,
        /// Surface width in pixels (sets the perspective aspect ratio)
        #[arg(long, requires = "height")]
        width: Option<u32>,
        /// Surface height in pixels
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },
    /// Orbit a third-person camera around its target
    Orbit {
        #[command(flatten)]
        camera: CameraArgs,
        /// Number of steps to sample
        #[arg(short, long, default_value = "8")]
        steps: usize,
        /// Yaw added per step, in degrees
        #[arg(long, default_value = "45", allow_hyphen_values = true)]
        yaw_step: f32,
        /// Pitch added per step, in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pitch_step: f32,
    },
    /// Convert a direction vector to yaw/pitch and back
    Direction {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },
    /// Replay a YAML/JSON action script against a camera
    Play {
        #[command(flatten)]
        camera: CameraArgs,
        /// Action script file
        #[arg(short, long)]
        actions: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    FirstPerson,
    ThirdPerson,
}

impl From<ModeArg> for CameraMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FirstPerson => CameraMode::FirstPerson,
            ModeArg::ThirdPerson => CameraMode::ThirdPerson,
        }
    }
}

#[derive(Args)]
struct CameraArgs {
    /// Camera config file (YAML or JSON); replaces the flags below
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Which endpoint stays fixed under rotation
    #[arg(long, value_enum, default_value = "first-person")]
    mode: ModeArg,
    /// Eye position as x,y,z
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,-10", allow_hyphen_values = true)]
    position: Vec3,
    /// Look-at target as x,y,z
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
    target: Vec3,
}

impl CameraArgs {
    fn config(&self) -> Result<CameraConfig> {
        match &self.config {
            Some(path) => CameraConfig::load(path)
                .with_context(|| format!("loading camera config {}", path.display())),
            None => Ok(CameraConfig {
                mode: self.mode.into(),
                position: self.position,
                target: self.target,
                ..CameraConfig::default()
            }),
        }
    }
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got {} components", parts.len())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("viewrig-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", viewrig_common::crate_info());
            println!("camera: {}", viewrig_camera::crate_info());
            println!("input: {}", viewrig_input::crate_info());
            println!("tools: {}", viewrig_tools::crate_info());
        }
        Commands::View {
            camera,
            width,
            height,
        } => {
            let mut config = camera.config()?;
            if let (Some(w), Some(h)) = (width, height) {
                config.projection.resize(w, h);
                config.validate()?;
            }
            let cam = config.build();
            println!("{}", CameraInspector::summary(&cam));

            let uniform = CameraUniform::new(&cam, &config.projection)
                .context("camera has no usable view transform")?;
            println!("View:\n{}", CameraInspector::format_matrix(&cam.view()?));
            println!(
                "Projection:\n{}",
                CameraInspector::format_matrix(&config.projection.projection())
            );
            println!("Uniform block: {} bytes", uniform.as_bytes().len());
        }
        Commands::Orbit {
            camera,
            steps,
            yaw_step,
            pitch_step,
        } => {
            let mut cam = camera.config()?.build();
            if cam.mode() != CameraMode::ThirdPerson {
                tracing::info!("orbit uses a third-person camera; switching mode");
                cam = Camera::third_person(cam.position(), cam.target());
            }
            println!("Orbit: {steps} steps, yaw {yaw_step}°/step, pitch {pitch_step}°/step");
            println!("  0: {}", CameraInspector::summary(&cam));
            for i in 1..=steps {
                cam.rotate(yaw_step.to_radians(), pitch_step.to_radians(), 0.0);
                println!("{i:>3}: {}", CameraInspector::summary(&cam));
            }
        }
        Commands::Direction { x, y, z } => {
            let direction = Vec3::new(x, y, z);
            let rotation = yaw_pitch_from_direction(direction);
            let [yaw, pitch, _] = rotation.to_degrees();
            let back = direction_from_yaw_pitch(rotation.yaw, rotation.pitch);
            println!("Direction: ({x}, {y}, {z})");
            println!("yaw={yaw:.3}° pitch={pitch:.3}°");
            println!(
                "Round trip: ({:.4}, {:.4}, {:.4})",
                back.x, back.y, back.z
            );
        }
        Commands::Play { camera, actions } => {
            let mut cam = camera.config()?.build();
            let script = ActionScript::load(&actions)
                .with_context(|| format!("loading action script {}", actions.display()))?;
            println!("Playing {} actions", script.actions.len());
            println!("  start: {}", CameraInspector::summary(&cam));
            script.play(&mut cam, |i, action, cam| {
                println!("{:>7}: {action:?}", i + 1);
                println!("         {}", CameraInspector::summary(cam));
            });
        }
    }

    Ok(())
}
