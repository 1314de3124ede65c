use crate::scene::Scene;
use crate::view::RenderView;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and a view snapshot and produces output. It
/// never touches the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
///
/// Lists the camera state and, per cube, its distance from the eye and
/// whether it lies in front of the camera.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let (e, f) = (view.eye, view.front);
        out.push_str(&format!(
            "=== Scene (cubes={}, point_lights={}) ===\n",
            scene.cube_positions.len(),
            scene.point_lights.len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) front=({:.2}, {:.2}, {:.2}) fov={:.1}\n",
            e.x, e.y, e.z, f.x, f.y, f.z, view.fov_degrees
        ));

        for (i, p) in scene.cube_positions.iter().enumerate() {
            let to_cube = *p - view.eye;
            let facing = if to_cube.dot(view.front) > 0.0 {
                "ahead"
            } else {
                "behind"
            };
            out.push_str(&format!(
                "  cube[{i}] pos=({:.2}, {:.2}, {:.2}) dist={:.2} {facing}\n",
                p.x,
                p.y,
                p.z,
                to_cube.length()
            ));
        }

        for (i, light) in scene.point_lights.iter().enumerate() {
            let p = light.position;
            let d = (p - view.eye).length();
            out.push_str(&format!(
                "  lamp[{i}] pos=({:.2}, {:.2}, {:.2}) attenuation={:.3}\n",
                p.x,
                p.y,
                p.z,
                light.attenuation.at(d)
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lightbox_camera::{Camera, Movement};

    #[test]
    fn debug_renderer_default_view() {
        let scene = Scene::default();
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());

        assert!(output.contains("cubes=10"));
        assert!(output.contains("point_lights=4"));
        assert!(output.contains("fov=45.0"));
        assert!(output.contains("cube[9]"));
        assert!(output.contains("lamp[3]"));
    }

    #[test]
    fn debug_renderer_reports_facing() {
        let scene = Scene {
            cube_positions: vec![Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 5.0)],
            ..Scene::default()
        };
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("cube[0] pos=(0.00, 0.00, -5.00) dist=5.00 ahead"));
        assert!(output.contains("cube[1] pos=(0.00, 0.00, 5.00) dist=5.00 behind"));
    }

    #[test]
    fn debug_renderer_follows_camera() {
        let mut cam = Camera::default();
        cam.move_in(Movement::Backward, 2.0);
        let view = RenderView::from_camera(&cam, 0.1, 100.0);
        let output = DebugTextRenderer::new().render(&Scene::default(), &view);
        assert!(output.contains("eye=(0.00, 0.00, 5.00)"));
    }
}
