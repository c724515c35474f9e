use bytemuck::{Pod, Zeroable};

use crate::camera::{Camera, CameraError};
use crate::projection::Projection;

/// Per-frame camera block laid out for a GPU uniform buffer.
///
/// Matrices are column-major. `eye` is padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera, projection: &impl Projection) -> Result<Self, CameraError> {
        let view = camera.view()?;
        let proj = projection.projection();
        Ok(Self {
            view: view.to_cols_array_2d(),
            projection: proj.to_cols_array_2d(),
            view_proj: (proj * view).to_cols_array_2d(),
            eye: camera.position().extend(1.0).to_array(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
