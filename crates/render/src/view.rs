use glam::{Mat4, Vec3};
use lightbox_camera::Camera;

/// Per-frame view derived from the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit look direction.
    pub front: Vec3,
    pub view: Mat4,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&Camera::default(), 0.1, 100.0)
    }
}

impl RenderView {
    pub fn from_camera(camera: &Camera, near: f32, far: f32) -> Self {
        Self {
            eye: camera.position(),
            front: camera.front(),
            view: camera.view_matrix(),
            fov_degrees: camera.field_of_view(),
            near,
            far,
        }
    }

    /// Point one unit ahead of the eye.
    pub fn target(&self) -> Vec3 {
        self.eye + self.front
    }

    /// Right-handed perspective with a [0, 1] depth range.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn mirrors_camera() {
        let mut cam = Camera::default();
        cam.look(250.0, -80.0);
        cam.update_fov(10.0);
        let view = RenderView::from_camera(&cam, 0.1, 100.0);
        assert_eq!(view.eye, cam.position());
        assert_eq!(view.front, cam.front());
        assert_eq!(view.view, cam.view_matrix());
        assert_eq!(view.fov_degrees, 35.0);
        assert_eq!(view.target(), cam.position() + cam.front());
    }

    #[test]
    fn projection_uses_fov_in_radians() {
        let view = RenderView::default();
        let proj = view.projection(16.0 / 9.0);
        let expected = Mat4::perspective_rh(45.0_f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
        assert_eq!(proj, expected);
    }

    #[test]
    fn point_ahead_lands_inside_clip_volume() {
        let view = RenderView::default();
        let clip = view.view_projection(1.0) * Vec4::new(0.0, 0.0, -5.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
