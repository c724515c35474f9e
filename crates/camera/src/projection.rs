use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Errors from invalid projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("field of view must be within (0, 180) degrees, got {0}")]
    InvalidFov(f32),
    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),
    #[error("view volume must have positive extent, got {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },
    #[error("clip planes must satisfy near < far (perspective also needs near > 0), got near={near} far={far}")]
    InvalidDepthRange { near: f32, far: f32 },
}

/// Anything that can produce a projection matrix.
///
/// Projections are independent of the camera: the same camera can be paired
/// with a perspective or an orthographic lens. All matrices are left-handed
/// with depth mapped to `[0, 1]`.
pub trait Projection {
    fn projection(&self) -> Mat4;
}

/// Perspective lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Perspective {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Width divided by height.
    pub aspect_ratio: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl Perspective {
    pub fn new(
        fov_degrees: f32,
        near: f32,
        far: f32,
        aspect_ratio: f32,
    ) -> Result<Self, ProjectionError> {
        let lens = Self {
            fov_degrees,
            near,
            far,
            aspect_ratio,
        };
        lens.validate()?;
        Ok(lens)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ProjectionError::InvalidFov(self.fov_degrees));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(ProjectionError::InvalidAspect(self.aspect_ratio));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ProjectionError::InvalidDepthRange {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }

    /// Update the aspect ratio for a new surface size. A zero height (a
    /// minimized window) leaves it unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }
}

impl Projection for Perspective {
    fn projection(&self) -> Mat4 {
        Mat4::perspective_lh(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

/// Orthographic lens centred on the view axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orthographic {
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Orthographic {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 9.0,
            near: 0.0,
            far: 1000.0,
        }
    }
}

impl Orthographic {
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Result<Self, ProjectionError> {
        let lens = Self {
            width,
            height,
            near,
            far,
        };
        lens.validate()?;
        Ok(lens)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ProjectionError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.far > self.near) {
            return Err(ProjectionError::InvalidDepthRange {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}

impl Projection for Orthographic {
    fn projection(&self) -> Mat4 {
        let (half_w, half_h) = (self.width * 0.5, self.height * 0.5);
        Mat4::orthographic_lh(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }
}

/// Either lens, tagged by `kind` when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionKind {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

impl Default for ProjectionKind {
    fn default() -> Self {
        Self::Perspective(Perspective::default())
    }
}

impl ProjectionKind {
    pub fn validate(&self) -> Result<(), ProjectionError> {
        match self {
            Self::Perspective(p) => p.validate(),
            Self::Orthographic(o) => o.validate(),
        }
    }

    /// Forward a surface resize. Orthographic extents are in world units and
    /// do not follow the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Self::Perspective(p) = self {
            p.resize(width, height);
        }
    }
}

impl Projection for ProjectionKind {
    fn projection(&self) -> Mat4 {
        match self {
            Self::Perspective(p) => p.projection(),
            Self::Orthographic(o) => o.projection(),
        }
    }
}
