use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::types::Rotation;

/// Threshold below which a normalized component counts as zero when picking
/// the pole and quadrant branches of [`yaw_pitch_from_direction`].
///
/// This is the smallest positive subnormal `f32`, so only components that are
/// exactly zero after normalization take the fallback branches.
pub const POLE_EPSILON: f32 = f32::from_bits(1);

/// Unit direction for the given yaw and pitch (radians).
///
/// Yaw 0 / pitch 0 looks down +Z. Positive yaw turns toward +X and positive
/// pitch tilts downward, hence the negated vertical component.
pub fn direction_from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (f64::from(yaw), f64::from(pitch));
    Vec3::new(
        (yaw.sin() * pitch.cos()) as f32,
        (-pitch.sin()) as f32,
        (yaw.cos() * pitch.cos()) as f32,
    )
}

/// Yaw and pitch (radians) pointing along `direction`. Roll is always 0.
///
/// The inverse of [`direction_from_yaw_pitch`] with these edge cases:
/// - a vector on the vertical axis gets yaw 0 and pitch ∓90° by the sign of Y;
/// - a vector with Z == 0 gets yaw ±90° by the sign of X;
/// - a negative Z adds 180° to the yaw so it lands in the right half-plane.
///
/// A zero vector yields [`Rotation::ZERO`].
pub fn yaw_pitch_from_direction(direction: Vec3) -> Rotation {
    let v = direction.try_normalize().unwrap_or(direction);

    let yaw = if v.z.abs() < POLE_EPSILON {
        if v.x > 0.0 {
            FRAC_PI_2
        } else if v.x < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        }
    } else {
        let yaw = f64::from(v.x / v.z).atan() as f32;
        if v.z < 0.0 { yaw + PI } else { yaw }
    };

    let pitch = if v.x.abs() > POLE_EPSILON || v.z.abs() > POLE_EPSILON {
        let horizontal = f64::from(v.x * v.x + v.z * v.z).sqrt() as f32;
        -(f64::from(v.y / horizontal).atan() as f32)
    } else if v.y > 0.0 {
        -FRAC_PI_2
    } else if v.y < 0.0 {
        FRAC_PI_2
    } else {
        0.0
    };

    Rotation::new(yaw, pitch, 0.0)
}

/// Unit normal of the triangle `a`, `b`, `c` (counter-clockwise winding in a
/// right-handed basis). Degenerate triangles give `Vec3::ZERO`.
pub fn normal_from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Method form of [`yaw_pitch_from_direction`].
pub trait YawPitchExt {
    fn yaw_pitch_roll(self) -> Rotation;
}

impl YawPitchExt for Vec3 {
    fn yaw_pitch_roll(self) -> Rotation {
        yaw_pitch_from_direction(self)
    }
}
