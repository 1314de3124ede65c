use crate::action::Action;
use lightbox_camera::Movement;
use std::collections::BTreeSet;

/// Input collected between two frames.
///
/// Held movement keys persist across frames. Look and zoom events queue up
/// one action each, in arrival order, until [`InputState::drain_actions`]
/// consumes them.
#[derive(Debug, Default)]
pub struct InputState {
    held: BTreeSet<Movement>,
    events: Vec<Action>,
    quit_requested: bool,
    captured: bool,
}

impl InputState {
    pub fn new(captured: bool) -> Self {
        Self {
            captured,
            ..Self::default()
        }
    }

    pub fn set_held(&mut self, movement: Movement, pressed: bool) {
        if pressed {
            self.held.insert(movement);
        } else {
            self.held.remove(&movement);
        }
    }

    pub fn is_held(&self, movement: Movement) -> bool {
        self.held.contains(&movement)
    }

    /// Drop all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Record raw mouse motion in window space (y grows downward).
    ///
    /// Ignored unless the cursor is captured. Vertical motion is inverted
    /// so that moving the mouse up pitches the camera up.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.captured || (dx == 0.0 && dy == 0.0) {
            return;
        }
        self.events.push(Action::Look {
            yaw_delta: dx,
            pitch_delta: -dy,
        });
    }

    /// Record a scroll step; positive zooms in.
    pub fn scroll(&mut self, delta: f32) {
        if delta != 0.0 {
            self.events.push(Action::Zoom(delta));
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn set_captured(&mut self, captured: bool) {
        if !captured {
            self.events.retain(|a| !matches!(a, Action::Look { .. }));
        }
        self.captured = captured;
    }

    /// Flip cursor capture and return the new state.
    pub fn toggle_capture(&mut self) -> bool {
        self.set_captured(!self.captured);
        self.captured
    }

    /// Turn this frame's input into actions and reset per-frame deltas.
    ///
    /// Order: one move per held direction, then each look and zoom event as
    /// it arrived, then quit. Events are not merged, so pitch and FoV clamp
    /// after every event rather than once per frame.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.held.iter().copied().map(Action::Move).collect();
        actions.append(&mut self.events);

        if self.quit_requested {
            actions.push(Action::Quit);
        }

        if !actions.is_empty() {
            tracing::trace!(count = actions.len(), "drained input actions");
        }
        actions
    }
}
