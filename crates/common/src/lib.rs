//! Shared math for the viewrig workspace: the [`Rotation`] angle triple and
//! the direction ↔ yaw/pitch conversion every camera update goes through.
//!
//! # Invariants
//! - Yaw 0 / pitch 0 faces +Z; positive pitch tilts downward.
//! - Roll is never recovered from a direction and is always reported as 0.

mod direction;
mod types;

pub use direction::{
    POLE_EPSILON, YawPitchExt, direction_from_yaw_pitch, normal_from_triangle,
    yaw_pitch_from_direction,
};
pub use types::Rotation;

pub fn crate_info() -> &'static str {
    "viewrig-common v0.1.0"
}
