use crate::settings::{CameraSettings, MIN_FIELD_OF_VIEW};
use glam::{Mat4, Vec3};

/// Pitch bound in degrees applied by constrained look updates.
pub const PITCH_LIMIT: f32 = 89.0;

/// Direction of a single camera translation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    pub const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::Up,
        Movement::Down,
    ];
}

/// Free-fly camera driven by yaw and pitch angles in degrees.
///
/// The look basis is rebuilt from the two angles on every orientation
/// change rather than integrated incrementally, so it cannot drift and
/// cannot represent roll.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    field_of_view: f32,
    max_field_of_view: f32,
    movement_speed: f32,
    look_sensitivity: f32,
}

impl Default for Camera {
    /// Camera at the origin looking down -Z with +Y up.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0)
    }
}

impl Camera {
    /// Create a camera with the default speed, sensitivity and field of view.
    ///
    /// `world_up` must be non-zero; it is not checked.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let defaults = CameraSettings::default();
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up,
            yaw,
            pitch,
            field_of_view: defaults.field_of_view,
            max_field_of_view: defaults.max_field_of_view,
            movement_speed: defaults.movement_speed,
            look_sensitivity: defaults.look_sensitivity,
        };
        camera.update_vectors();
        camera
    }

    /// Apply tunables. The field of view is clamped into `[1, max]`.
    pub fn with_settings(mut self, settings: &CameraSettings) -> Self {
        self.movement_speed = settings.movement_speed;
        self.look_sensitivity = settings.look_sensitivity;
        self.max_field_of_view = settings.max_field_of_view.max(MIN_FIELD_OF_VIEW);
        self.field_of_view = settings
            .field_of_view
            .clamp(MIN_FIELD_OF_VIEW, self.max_field_of_view);
        if self.field_of_view != settings.field_of_view {
            tracing::debug!(
                requested = settings.field_of_view,
                applied = self.field_of_view,
                "camera field of view clamped"
            );
        }
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees. Unbounded.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees.
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn max_field_of_view(&self) -> f32 {
        self.max_field_of_view
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn look_sensitivity(&self) -> f32 {
        self.look_sensitivity
    }

    /// Right-handed look-at matrix from the position along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Translate by `movement_speed * delta_time` along one basis vector.
    ///
    /// `delta_time` is in seconds and must be non-negative.
    pub fn move_in(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Right => self.position += self.right * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Up => self.position += self.up * velocity,
            Movement::Down => self.position -= self.up * velocity,
        }
    }

    /// Rotate by raw look deltas scaled by the look sensitivity.
    ///
    /// With `constrain_pitch` the pitch is clamped to ±[`PITCH_LIMIT`], which
    /// keeps `front` off the world-up axis.
    pub fn update_look_direction(
        &mut self,
        yaw_delta: f32,
        pitch_delta: f32,
        constrain_pitch: bool,
    ) {
        self.yaw += yaw_delta * self.look_sensitivity;
        self.pitch += pitch_delta * self.look_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
    }

    /// Constrained look update.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.update_look_direction(yaw_delta, pitch_delta, true);
    }

    /// Narrow the field of view by `delta` degrees (negative widens).
    pub fn update_fov(&mut self, delta: f32) {
        self.field_of_view =
            (self.field_of_view - delta).clamp(MIN_FIELD_OF_VIEW, self.max_field_of_view);
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        // front x world_up keeps the basis right-handed for +Y up.
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        for v in [f, r, u] {
            assert!((v.length() - 1.0).abs() < EPS, "not unit: {v:?}");
        }
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        // right-handed: right x up == -front
        assert!(r.cross(u).abs_diff_eq(-f, 1e-4));
    }

    #[test]
    fn default_basis() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(cam.world_up(), Vec3::Y);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.field_of_view(), 45.0);
        assert!(cam.front().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
        assert!(cam.right().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), EPS));
        assert!(cam.up().abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn basis_orthonormal_across_angles() {
        let mut cam = Camera::default();
        let mut yaw_step = -3700.0;
        while yaw_step <= 3700.0 {
            let mut pitch_step = -1200.0;
            while pitch_step <= 1200.0 {
                cam.look(yaw_step, pitch_step);
                assert_orthonormal(&cam);
                pitch_step += 150.0;
            }
            yaw_step += 370.0;
        }
    }

    #[test]
    fn pitch_clamps_to_exact_limit() {
        let mut cam = Camera::default();
        for _ in 0..20 {
            cam.look(0.0, 1000.0);
            assert!(cam.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), 89.0);
        assert_orthonormal(&cam);

        for _ in 0..20 {
            cam.look(0.0, -1000.0);
        }
        assert_eq!(cam.pitch(), -89.0);
    }

    #[test]
    fn pitch_unbounded_when_unconstrained() {
        let mut cam = Camera::default();
        for _ in 0..5 {
            cam.update_look_direction(0.0, 1000.0, false);
        }
        assert!((cam.pitch() - 500.0).abs() < 1e-3);
    }

    #[test]
    fn yaw_is_never_clamped() {
        let mut cam = Camera::default();
        for _ in 0..10 {
            cam.look(10_000.0, 0.0);
        }
        assert!((cam.yaw() - 9_910.0).abs() < 0.1);
        assert_orthonormal(&cam);
    }

    #[test]
    fn full_turn_of_yaw_restores_front() {
        let mut cam = Camera::default();
        let start = cam.front();
        cam.look(3600.0, 0.0);
        assert!(cam.front().abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn look_applies_sensitivity() {
        let mut cam = Camera::default();
        cam.look(10.0, 5.0);
        assert!((cam.yaw() - -89.0).abs() < EPS);
        assert!((cam.pitch() - 0.5).abs() < EPS);
    }

    #[test]
    fn fov_clamps_both_ways() {
        let mut cam = Camera::default();
        cam.update_fov(-1000.0);
        assert_eq!(cam.field_of_view(), 90.0);
        cam.update_fov(1000.0);
        assert_eq!(cam.field_of_view(), 1.0);
    }

    #[test]
    fn positive_scroll_zooms_in() {
        let mut cam = Camera::default();
        cam.update_fov(5.0);
        assert_eq!(cam.field_of_view(), 40.0);
    }

    #[test]
    fn move_forward_default_speed() {
        let mut cam = Camera::default();
        cam.move_in(Movement::Forward, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -2.5), EPS));
    }

    #[test]
    fn opposite_moves_cancel() {
        let mut cam = Camera::default();
        cam.look(123.0, 45.0);
        for (a, b) in [
            (Movement::Forward, Movement::Backward),
            (Movement::Left, Movement::Right),
            (Movement::Up, Movement::Down),
        ] {
            cam.move_in(a, 0.5);
            cam.move_in(b, 0.5);
        }
        assert!(cam.position().abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn move_uses_matching_basis_vector() {
        let mut cam = Camera::default();
        cam.move_in(Movement::Right, 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPS));

        let mut cam = Camera::default();
        cam.move_in(Movement::Down, 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, -5.0, 0.0), EPS));
    }

    #[test]
    fn zero_delta_time_does_not_move() {
        let mut cam = Camera::default();
        for m in Movement::ALL {
            cam.move_in(m, 0.0);
        }
        assert_eq!(cam.position(), Vec3::ZERO);
    }

    #[test]
    fn view_matrix_is_stable() {
        let mut cam = Camera::default();
        cam.look(42.0, -17.0);
        cam.move_in(Movement::Forward, 0.3);
        assert_eq!(cam.view_matrix(), cam.view_matrix());
    }

    #[test]
    fn view_matrix_maps_front_to_negative_z() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 30.0, 20.0);
        cam.look(0.0, 0.0);
        let view = cam.view_matrix();
        let eye = view.transform_point3(cam.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4));
        let ahead = view.transform_point3(cam.position() + cam.front());
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-4));
    }

    #[test]
    fn settings_applied_at_construction() {
        let settings = CameraSettings {
            movement_speed: 4.0,
            look_sensitivity: 0.5,
            field_of_view: 70.0,
            max_field_of_view: 60.0,
        };
        let mut cam = Camera::default().with_settings(&settings);
        assert_eq!(cam.movement_speed(), 4.0);
        assert_eq!(cam.look_sensitivity(), 0.5);
        assert_eq!(cam.max_field_of_view(), 60.0);
        // clamped to the configured max
        assert_eq!(cam.field_of_view(), 60.0);

        cam.move_in(Movement::Forward, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), EPS));
    }
}
