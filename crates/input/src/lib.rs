//! Camera input: actions that key/mouse bindings or scripts feed to a camera.
//!
//! # Invariants
//! - Every camera mutation from input goes through a [`CameraAction`].
//! - Scripts replay the same actions live input would produce.

pub mod action;

pub use action::{ActionScript, CameraAction};

pub fn crate_info() -> &'static str {
    "viewrig-input v0.1.0"
}
