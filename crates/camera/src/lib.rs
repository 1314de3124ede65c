//! Free-fly camera for the lightbox demo.
//!
//! The camera keeps a world-space position and a yaw/pitch orientation, and
//! rebuilds an orthonormal `front`/`right`/`up` basis whenever the angles
//! change. It has no roll.
//!
//! # Invariants
//! - `front`, `right` and `up` are unit length and mutually orthogonal after
//!   every orientation change.
//! - Field of view stays within `[1, max_field_of_view]` degrees.
//! - Yaw is never clamped or wrapped. Pitch is clamped to ±89° unless the
//!   caller opts out.

mod camera;
mod settings;

pub use camera::{Camera, Movement, PITCH_LIMIT};
pub use settings::{CameraError, CameraSettings, MIN_FIELD_OF_VIEW};

pub fn crate_info() -> &'static str {
    "lightbox-camera v0.1.0"
}
