use lightbox_camera::{Camera, Movement};

/// A high-level request produced from raw input.
///
/// The camera consumes actions, never raw window events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate along one camera axis for this frame's delta time.
    Move(Movement),
    /// Rotate by raw look deltas (sensitivity is applied by the camera).
    Look { yaw_delta: f32, pitch_delta: f32 },
    /// Scroll delta; positive narrows the field of view.
    Zoom(f32),
    /// Close the application.
    Quit,
}

impl Action {
    /// Apply this action to the camera. Returns `false` for [`Action::Quit`].
    pub fn apply(&self, camera: &mut Camera, delta_time: f32) -> bool {
        match *self {
            Action::Move(direction) => camera.move_in(direction, delta_time),
            Action::Look {
                yaw_delta,
                pitch_delta,
            } => camera.look(yaw_delta, pitch_delta),
            Action::Zoom(delta) => camera.update_fov(delta),
            Action::Quit => return false,
        }
        true
    }
}
