use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use viewrig_camera::config::load_document;
use viewrig_camera::{Camera, ConfigError};
use viewrig_common::Rotation;

/// A high-level camera action produced by input handling.
///
/// Key and mouse bindings translate into actions; the camera only ever sees
/// actions, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    /// Translate position and target by a world-space offset.
    Move(Vec3),
    /// Add yaw/pitch/roll deltas (radians).
    Rotate(Rotation),
    /// Add a delta to the arm length.
    Zoom(f32),
    /// Replace the arm length.
    SetLength(f32),
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

impl CameraAction {
    /// Apply this action to `camera`.
    pub fn apply(&self, camera: &mut Camera) {
        tracing::trace!(action = ?self, "applying camera action");
        match *self {
            Self::Move(offset) => camera.move_by(offset),
            Self::Rotate(delta) => camera.rotate(delta.yaw, delta.pitch, delta.roll),
            Self::Zoom(delta) => camera.set_length(camera.length() + delta),
            Self::SetLength(length) => camera.set_length(length),
            Self::Noop => {}
        }
    }
}

/// An ordered list of actions, loadable from YAML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionScript {
    pub actions: Vec<CameraAction>,
}

impl ActionScript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_document(path)
    }

    /// Apply every action in order, calling `on_step` after each one.
    pub fn play(&self, camera: &mut Camera, mut on_step: impl FnMut(usize, &CameraAction, &Camera)) {
        for (i, action) in self.actions.iter().enumerate() {
            action.apply(camera);
            on_step(i, action, camera);
        }
    }
}
