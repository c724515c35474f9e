//! Camera setup loaded from YAML or JSON.
//!
//! ```yaml
//! mode: third_person
//! position: [0.0, 2.0, -10.0]
//! target: [0.0, 0.0, 0.0]
//! projection:
//!   kind: perspective
//!   fov_degrees: 60.0
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use viewrig_common::Rotation;

use crate::camera::{Camera, CameraMode};
use crate::projection::{ProjectionError, ProjectionKind};

/// Errors from loading a config or script document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("invalid projection: {0}")]
    Projection(#[from] ProjectionError),
}

/// Document formats understood by [`load_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension (`yaml`, `yml`, `json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Deserialize `text`. YAML enums with data are written as single-key
    /// maps (`- move: [1.0, 0.0, 0.0]`) rather than `!move` tags.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, ConfigError> {
        Ok(match self {
            Self::Yaml => serde_yaml::with::singleton_map_recursive::deserialize(
                serde_yaml::Deserializer::from_str(text),
            )?,
            Self::Json => serde_json::from_str(text)?,
        })
    }
}

/// Read and deserialize a YAML or JSON file, chosen by extension.
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let _span = tracing::info_span!("load_document", path = %path.display()).entered();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let text = std::fs::read_to_string(path)?;
    let doc = format.parse(&text)?;
    tracing::debug!(?format, bytes = text.len(), "document loaded");
    Ok(doc)
}

/// Initial camera state plus the lens to pair it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
    pub position: Vec3,
    pub target: Vec3,
    /// Applied after construction, overriding the rotation derived from the
    /// two points.
    pub rotation: Option<Rotation>,
    /// Applied last.
    pub length: Option<f32>,
    pub projection: ProjectionKind,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::FirstPerson,
            position: Vec3::ZERO,
            target: Vec3::Z,
            rotation: None,
            length: None,
            projection: ProjectionKind::default(),
        }
    }
}

impl CameraConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_document(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projection.validate()?;
        Ok(())
    }

    /// Construct the camera described by this config.
    pub fn build(&self) -> Camera {
        let mut camera = Camera::new(self.mode, self.position, self.target);
        if let Some(rotation) = self.rotation {
            camera.set_rotation(rotation);
        }
        if let Some(length) = self.length {
            camera.set_length(length);
        }
        camera
    }
}
