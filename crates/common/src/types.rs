use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Orientation as yaw, pitch and roll angles in radians.
///
/// Yaw turns about the vertical axis, pitch tilts down (positive) or up
/// (negative). Roll is carried along but never enters a view transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Rotation {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Build a rotation from angles given in degrees.
    pub fn from_degrees(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::new(yaw.to_radians(), pitch.to_radians(), roll.to_radians())
    }

    /// The angles converted to degrees, as `[yaw, pitch, roll]`.
    pub fn to_degrees(self) -> [f32; 3] {
        [
            self.yaw.to_degrees(),
            self.pitch.to_degrees(),
            self.roll.to_degrees(),
        ]
    }

    /// Same yaw and roll with the pitch limited to `[-limit, limit]`.
    pub fn with_pitch_clamped(self, limit: f32) -> Self {
        Self {
            pitch: self.pitch.clamp(-limit, limit),
            ..self
        }
    }
}

impl Add for Rotation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch, self.roll + rhs.roll)
    }
}

impl AddAssign for Rotation {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
