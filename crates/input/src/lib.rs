//! Input adaptation: raw per-frame input collected into camera actions.
//!
//! # Invariants
//! - The window layer only records input; the camera is only mutated by
//!   applying drained [`Action`]s.
//! - Accumulated look and zoom deltas are consumed exactly once per frame.

pub mod action;
pub mod clock;
pub mod state;

pub use action::Action;
pub use clock::FrameClock;
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "lightbox-input v0.1.0"
}
