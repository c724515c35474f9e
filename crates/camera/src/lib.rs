//! Camera model: yaw/pitch look-at cameras in first- and third-person modes,
//! perspective and orthographic lenses, and YAML/JSON camera config.
//!
//! # Invariants
//! - `|position - target| == length` after every mutation.
//! - Third-person pitch stays within one degree of the horizon-to-pole band.
//! - View and projection matrices are derived on demand, never cached.

mod camera;
pub mod config;
mod projection;
mod uniform;

pub use camera::{Camera, CameraError, CameraMode, ORBIT_PITCH_LIMIT};
pub use config::{CameraConfig, ConfigError, ConfigFormat};
pub use projection::{Orthographic, Perspective, Projection, ProjectionError, ProjectionKind};
pub use uniform::CameraUniform;
pub use viewrig_common::Rotation;

pub fn crate_info() -> &'static str {
    "viewrig-camera v0.1.0"
}
