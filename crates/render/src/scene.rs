use glam::{Mat4, Vec2, Vec3};

/// Number of point lights the lighting shader expects.
pub const POINT_LIGHT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Indexed unit cube centered at the origin, counter-clockwise front faces.
#[derive(Debug, Clone)]
pub struct CubeMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl CubeMesh {
    pub fn unit() -> Self {
        // (normal, tangent u, tangent v) per face; corners walk CCW seen from outside.
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];
        let corners = [
            (Vec2::new(-0.5, -0.5), Vec2::new(0.0, 1.0)),
            (Vec2::new(0.5, -0.5), Vec2::new(1.0, 1.0)),
            (Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0)),
            (Vec2::new(-0.5, 0.5), Vec2::new(0.0, 0.0)),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (face, (normal, u, v)) in faces.into_iter().enumerate() {
            let base = (face * 4) as u16;
            for (offset, uv) in corners {
                vertices.push(MeshVertex {
                    position: normal * 0.5 + u * offset.x + v * offset.y,
                    normal,
                    uv,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        Self { vertices, indices }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    /// Roughly a 50 unit range.
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

impl Attenuation {
    pub fn at(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
}

/// Flashlight cone. Position and direction come from the view each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
    /// Full-intensity half angle, degrees.
    pub inner_cone: f32,
    /// Falloff-to-zero half angle, degrees.
    pub outer_cone: f32,
}

impl SpotLight {
    /// Cosines of the inner and outer half angles, as compared in the shader.
    pub fn cutoffs(&self) -> (f32, f32) {
        (
            self.inner_cone.to_radians().cos(),
            self.outer_cone.to_radians().cos(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shininess: f32,
}

/// The fixed demo scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub cube: CubeMesh,
    pub cube_positions: Vec<Vec3>,
    /// Cube `i` is rotated `i * cube_rotation_step` degrees about this axis.
    pub cube_rotation_axis: Vec3,
    pub cube_rotation_step: f32,
    pub directional: DirectionalLight,
    pub point_lights: [PointLight; POINT_LIGHT_COUNT],
    pub spot: SpotLight,
    pub material: Material,
    pub lamp_scale: f32,
    pub lamp_color: Vec3,
}

impl Default for Scene {
    fn default() -> Self {
        let point = |position: Vec3| PointLight {
            position,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            attenuation: Attenuation::default(),
        };

        Self {
            cube: CubeMesh::unit(),
            cube_positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 5.0, -15.0),
                Vec3::new(-1.5, -2.2, -2.5),
                Vec3::new(-3.8, -2.0, -12.3),
                Vec3::new(2.4, -0.4, -3.5),
                Vec3::new(-1.7, 3.0, -7.5),
                Vec3::new(1.3, -2.0, -2.5),
                Vec3::new(1.5, 2.0, -2.5),
                Vec3::new(1.5, 0.2, -1.5),
                Vec3::new(-1.3, 1.0, -1.5),
            ],
            cube_rotation_axis: Vec3::new(1.0, 0.3, 0.5),
            cube_rotation_step: 20.0,
            directional: DirectionalLight {
                direction: Vec3::new(-0.2, -1.0, -0.3),
                ambient: Vec3::splat(0.05),
                diffuse: Vec3::splat(0.4),
                specular: Vec3::splat(0.5),
            },
            point_lights: [
                point(Vec3::new(0.7, 0.2, 2.0)),
                point(Vec3::new(2.3, -3.3, -4.0)),
                point(Vec3::new(-4.0, 2.0, -12.0)),
                point(Vec3::new(0.0, 0.0, -3.0)),
            ],
            spot: SpotLight {
                ambient: Vec3::ZERO,
                diffuse: Vec3::ONE,
                specular: Vec3::ONE,
                attenuation: Attenuation::default(),
                inner_cone: 12.5,
                outer_cone: 15.0,
            },
            material: Material { shininess: 32.0 },
            lamp_scale: 0.2,
            lamp_color: Vec3::ONE,
        }
    }
}

impl Scene {
    /// Model matrices for the lit cubes.
    pub fn cube_transforms(&self) -> Vec<Mat4> {
        let axis = self.cube_rotation_axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            tracing::warn!("cube rotation axis is degenerate, cubes left unrotated");
        }
        self.cube_positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let rotation = if axis == Vec3::ZERO {
                    Mat4::IDENTITY
                } else {
                    Mat4::from_axis_angle(axis, (self.cube_rotation_step * i as f32).to_radians())
                };
                Mat4::from_translation(position) * rotation
            })
            .collect()
    }

    /// Model matrices for the lamp markers, one per point light.
    pub fn lamp_transforms(&self) -> Vec<Mat4> {
        self.point_lights
            .iter()
            .map(|light| {
                Mat4::from_translation(light.position) * Mat4::from_scale(Vec3::splat(self.lamp_scale))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_shape() {
        let mesh = CubeMesh::unit();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        for v in &mesh.vertices {
            assert!((v.normal.length() - 1.0).abs() < 1e-6);
            // every corner sits on the face its normal points at
            assert!((v.position.dot(v.normal) - 0.5).abs() < 1e-6);
            assert!(v.position.abs().max_element() <= 0.5 + 1e-6);
            assert!((0.0..=1.0).contains(&v.uv.x) && (0.0..=1.0).contains(&v.uv.y));
        }
    }

    #[test]
    fn cube_triangles_wind_outward() {
        let mesh = CubeMesh::unit();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.vertices[tri[k] as usize]);
            let n = (b.position - a.position).cross(c.position - a.position);
            assert!(n.dot(a.normal) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn default_scene_counts() {
        let scene = Scene::default();
        assert_eq!(scene.cube_positions.len(), 10);
        assert_eq!(scene.point_lights.len(), POINT_LIGHT_COUNT);
        assert_eq!(scene.material.shininess, 32.0);
        assert_eq!(scene.lamp_transforms().len(), 4);
    }

    #[test]
    fn cube_transforms_translate_then_rotate() {
        let scene = Scene::default();
        let transforms = scene.cube_transforms();
        assert_eq!(transforms.len(), 10);
        assert_eq!(transforms[0], Mat4::IDENTITY);

        // the cube center lands on its placement
        for (m, p) in transforms.iter().zip(&scene.cube_positions) {
            assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(*p, 1e-5));
        }

        let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
        let expected = Mat4::from_translation(scene.cube_positions[3])
            * Mat4::from_axis_angle(axis, 60.0_f32.to_radians());
        assert!(transforms[3].abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn degenerate_axis_leaves_cubes_unrotated() {
        let scene = Scene {
            cube_rotation_axis: Vec3::ZERO,
            ..Scene::default()
        };
        let transforms = scene.cube_transforms();
        assert_eq!(transforms[3], Mat4::from_translation(scene.cube_positions[3]));
        assert!(transforms.iter().all(|m| m.is_finite()));
    }

    #[test]
    fn lamps_are_scaled_markers() {
        let scene = Scene::default();
        let m = scene.lamp_transforms()[1];
        let corner = m.transform_point3(Vec3::splat(0.5));
        assert!(corner.abs_diff_eq(Vec3::new(2.3, -3.3, -4.0) + Vec3::splat(0.1), 1e-5));
    }

    #[test]
    fn spot_cutoffs_are_cosines() {
        let (inner, outer) = Scene::default().spot.cutoffs();
        assert!((inner - 12.5_f32.to_radians().cos()).abs() < 1e-6);
        assert!((outer - 15.0_f32.to_radians().cos()).abs() < 1e-6);
        assert!(inner > outer);
    }

    #[test]
    fn attenuation_falls_off() {
        let att = Attenuation::default();
        assert_eq!(att.at(0.0), 1.0);
        assert!(att.at(10.0) < att.at(1.0));
    }
}
