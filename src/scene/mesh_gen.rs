//! Parametric mesh generation for the three section shapes.
//!
//! Vertex and index layouts follow the usual ring-by-ring construction:
//! `(segments + 1)` vertices per ring so the seam gets duplicated
//! vertices with matching positions and independent normals.

use std::f32::consts::TAU;

use glam::Vec3;

use super::object::MeshKind;

/// Vertex format shared by all section meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        }
    }

    /// Vertex buffer layout: position at location 0, normal at location 1.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Generate the mesh for a section shape with its fixed dimensions.
    #[must_use]
    pub fn for_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Torus => torus(1.0, 0.4, 16, 60),
            MeshKind::Cone => cone(1.0, 2.0, 32),
            MeshKind::TorusKnot => torus_knot(0.8, 0.35, 100, 16, 2, 3),
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Push the two triangles of every quad in a `(rows + 1) x (cols + 1)`
/// vertex grid laid out row-major starting at `base`.
fn grid_indices(indices: &mut Vec<u32>, base: u32, rows: u32, cols: u32) {
    let stride = cols + 1;
    for row in 1..=rows {
        for col in 1..=cols {
            let a = base + stride * row + col - 1;
            let b = base + stride * (row - 1) + col - 1;
            let c = base + stride * (row - 1) + col;
            let d = base + stride * row + col;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

/// Torus in the XY plane.
#[must_use]
pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> MeshData {
    let mut mesh = MeshData::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position =
                Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices
                .push(MeshVertex::new(position, position - center));
        }
    }

    grid_indices(&mut mesh.indices, 0, radial_segments, tubular_segments);
    mesh
}

/// Cone pointing up the Y axis, centered on the origin, with a base cap.
#[must_use]
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height / 2.0;
    let slope = radius / height;

    // Side: apex ring (radius 0) then base ring.
    for row in 0..=1u32 {
        let ring_radius = row as f32 * radius;
        let y = half - row as f32 * height;
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(MeshVertex::new(
                Vec3::new(ring_radius * sin, y, ring_radius * cos),
                Vec3::new(sin, slope, cos),
            ));
        }
    }
    let stride = radial_segments + 1;
    for x in 0..radial_segments {
        // The apex row collapses, so only one triangle per segment.
        let b = stride + x;
        let c = stride + x + 1;
        let d = x + 1;
        mesh.indices.extend_from_slice(&[b, c, d]);
    }

    // Base cap.
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(MeshVertex::new(
        Vec3::new(0.0, -half, 0.0),
        Vec3::NEG_Y,
    ));
    let ring_start = mesh.vertices.len() as u32;
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(MeshVertex::new(
            Vec3::new(radius * sin, -half, radius * cos),
            Vec3::NEG_Y,
        ));
    }
    for x in 0..radial_segments {
        let i = ring_start + x;
        mesh.indices.extend_from_slice(&[i + 1, i, center]);
    }

    mesh
}

/// Point on the (p, q) torus-knot curve at parameter `u`.
fn knot_point(u: f32, p: u32, q: u32, radius: f32) -> Vec3 {
    let quo = q as f32 / p as f32 * u;
    let cs = quo.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * quo.sin() * 0.5,
    )
}

/// Tube swept along a (p, q) torus knot.
#[must_use]
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let mut mesh = MeshData::default();

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = knot_point(u, p, q, radius);
        let p2 = knot_point(u + 0.01, p, q, radius);

        // Frame along the curve: tangent, then binormal/normal from it.
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + normal * cx + binormal * cy;
            mesh.vertices.push(MeshVertex::new(position, position - p1));
        }
    }

    grid_indices(&mut mesh.indices, 0, tubular_segments, radial_segments);
    mesh
}
