use glam::Mat4;
use viewrig_camera::{Camera, CameraMode};

/// Camera inspector for developer tooling.
///
/// Read-only snapshots of camera state for logs, CLI output and debug UI.
pub struct CameraInspector;

impl CameraInspector {
    /// Produce a summary of the camera state.
    pub fn summary(camera: &Camera) -> CameraSummary {
        let p = camera.position();
        let t = camera.target();
        let r = camera.rotation();
        CameraSummary {
            mode: camera.mode(),
            position: p.to_array(),
            target: t.to_array(),
            length: camera.length(),
            rotation_degrees: r.to_degrees(),
            view_ok: camera.view().is_ok(),
        }
    }

    /// Format a matrix row by row (rows of the mathematical matrix, not columns).
    pub fn format_matrix(m: &Mat4) -> String {
        (0..4)
            .map(|i| {
                let row = m.row(i);
                format!(
                    "[{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
                    row.x, row.y, row.z, row.w
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Summary of camera state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSummary {
    pub mode: CameraMode,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub length: f32,
    /// `[yaw, pitch, roll]` in degrees.
    pub rotation_degrees: [f32; 3],
    /// Whether a view matrix can be derived.
    pub view_ok: bool,
}

impl std::fmt::Display for CameraSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Camera [{}] pos=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) length={:.2} yaw={:.1} pitch={:.1} roll={:.1}",
            self.mode,
            self.position[0],
            self.position[1],
            self.position[2],
            self.target[0],
            self.target[1],
            self.target[2],
            self.length,
            self.rotation_degrees[0],
            self.rotation_degrees[1],
            self.rotation_degrees[2],
        )?;
        if !self.view_ok {
            write!(f, " (degenerate view)")?;
        }
        Ok(())
    }
}
