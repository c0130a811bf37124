//! Static scene content: section meshes, particle field, light.
//!
//! Built once at startup. After construction the only thing that changes
//! is each [`SectionObject`]'s rotation, which lives in the
//! [`SceneState`](crate::state::SceneState).

/// Parametric torus, cone and torus-knot generation.
pub mod mesh_gen;
/// Section objects and their vertical layout.
pub mod object;
/// Random particle field.
pub mod particles;

use glam::Vec3;

pub use mesh_gen::{MeshData, MeshVertex};
pub use object::{layout_sections, MeshKind, SectionObject, SECTION_COUNT};
pub use particles::{field_changed, generate_particles};

use crate::options::Options;

/// Single directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light comes from (towards the light), world space.
    pub position: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 1.0, 0.0),
            intensity: 1.0,
        }
    }
}

/// Geometry for everything that is drawn, built once from options.
#[derive(Debug, Clone)]
pub struct SceneContent {
    /// One mesh per section, in section order.
    pub meshes: Vec<MeshData>,
    /// Particle world positions.
    pub particles: Vec<[f32; 3]>,
    /// The scene's light.
    pub light: DirectionalLight,
}

impl SceneContent {
    /// Generate meshes and scatter particles.
    #[must_use]
    pub fn build(options: &Options) -> Self {
        let meshes = MeshKind::SECTIONS
            .iter()
            .map(|&kind| MeshData::for_kind(kind))
            .collect();
        let particles = generate_particles(
            &options.particles,
            &options.motion,
            SECTION_COUNT,
        );
        log::debug!(
            "scene content: {} meshes, {} particles",
            SECTION_COUNT,
            particles.len()
        );
        Self {
            meshes,
            particles,
            light: DirectionalLight::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_produces_one_mesh_per_section() {
        let mut options = Options::default();
        options.particles.seed = Some(3);
        let content = SceneContent::build(&options);
        assert_eq!(content.meshes.len(), SECTION_COUNT);
        assert!(content.meshes.iter().all(|m| !m.indices.is_empty()));
        assert_eq!(content.particles.len(), 500);
    }
}
