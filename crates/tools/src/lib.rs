//! Developer Tooling: camera inspector and matrix dumps.
//!
//! # Invariants
//! - Tools only read camera state; they never mutate it.

mod inspector;

pub use inspector::{CameraInspector, CameraSummary};

pub fn crate_info() -> &'static str {
    "viewrig-tools v0.1.0"
}
