use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::options::MotionOptions;

/// Geometry shown in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Torus (ring radius 1, tube radius 0.4).
    Torus,
    /// Cone (base radius 1, height 2).
    Cone,
    /// Torus knot (radius 0.8, tube radius 0.35, p = 2, q = 3).
    TorusKnot,
}

impl MeshKind {
    /// Meshes in section order, top of the page first.
    pub const SECTIONS: [MeshKind; 3] =
        [MeshKind::Torus, MeshKind::Cone, MeshKind::TorusKnot];
}

/// Number of page sections (one mesh each).
pub const SECTION_COUNT: usize = MeshKind::SECTIONS.len();

/// One section's mesh instance.
///
/// Created once at startup; afterwards only `rotation` changes (ambient
/// spin from the frame update plus one-shot tweens).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionObject {
    /// Which geometry this object draws.
    pub kind: MeshKind,
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians, applied in XYZ order.
    pub rotation: Vec3,
}

impl SectionObject {
    /// Model matrix: translation times XYZ Euler rotation.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// Rotation as a quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// Lay out one object per section, `object_spacing` apart going down the
/// Y axis and alternating sides according to `section_offsets`.
#[must_use]
pub fn layout_sections(motion: &MotionOptions) -> Vec<SectionObject> {
    MeshKind::SECTIONS
        .iter()
        .zip(motion.section_offsets)
        .enumerate()
        .map(|(i, (&kind, x))| SectionObject {
            kind,
            position: Vec3::new(x, -motion.object_spacing * i as f32, 0.0),
            rotation: Vec3::ZERO,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_stack_downwards() {
        let motion = MotionOptions::default();
        let objects = layout_sections(&motion);
        assert_eq!(objects.len(), SECTION_COUNT);
        assert_eq!(objects[0].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(objects[1].position, Vec3::new(-2.0, -4.0, 0.0));
        assert_eq!(objects[2].position, Vec3::new(2.0, -8.0, 0.0));
        assert_eq!(objects[2].kind, MeshKind::TorusKnot);
    }

    #[test]
    fn model_matrix_applies_translation() {
        let object = SectionObject {
            kind: MeshKind::Cone,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        };
        let origin = object.model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - object.position).length() < 1e-6);
        // Quarter turn about Y maps +X onto -Z.
        let x = object.model_matrix().transform_vector3(Vec3::X);
        assert!((x - Vec3::NEG_Z).length() < 1e-6);
    }
}
