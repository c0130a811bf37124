//! Toon-shaded section meshes.
//!
//! One static vertex/index buffer pair per mesh, plus one uniform buffer
//! per section object carrying its model matrix, normal matrix and the
//! material color. Shading quantizes the Lambert term through the bound
//! gradient map.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::{
    bind_group_layout, create_scene_pipeline, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::scene::{MeshData, MeshVertex, SectionObject};

/// Per-object GPU uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Object-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model` for normals.
    pub normal: [[f32; 4]; 4],
    /// Material color (alpha unused).
    pub color: [f32; 4],
}

impl ModelUniform {
    /// Uniform for `object` drawn in `color`.
    #[must_use]
    pub fn new(object: &SectionObject, color: [f32; 3]) -> Self {
        let model = object.model_matrix();
        Self {
            model: model.to_cols_array_2d(),
            normal: normal_matrix(model).to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }
}

fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every section object with the toon pipeline.
pub struct ToonRenderer {
    pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
    objects: Vec<ObjectSlot>,
    color: [f32; 3],
}

impl ToonRenderer {
    /// Upload `meshes` (one per section, in section order) and build the
    /// pipeline.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        gradient_layout: &wgpu::BindGroupLayout,
        meshes: &[MeshData],
        color: [f32; 3],
    ) -> Self {
        let device = &context.device;
        let object_layout =
            bind_group_layout(device, "Toon Object Layout", &[uniform_buffer(0)]);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Toon Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("shaders/toon.wgsl").into(),
            ),
        });
        let pipeline = create_scene_pipeline(
            device,
            "Toon",
            &shader,
            context.format(),
            &[MeshVertex::layout()],
            None,
            true,
            &[camera_layout, gradient_layout, &object_layout],
        );

        let gpu_meshes = meshes
            .iter()
            .map(|mesh| GpuMesh {
                vertex_buffer: device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Toon Vertex Buffer"),
                        contents: bytemuck::cast_slice(&mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                ),
                index_buffer: device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Toon Index Buffer"),
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    },
                ),
                index_count: mesh.indices.len() as u32,
            })
            .collect();

        let objects = (0..meshes.len())
            .map(|_| {
                let buffer =
                    device.create_buffer(&wgpu::BufferDescriptor {
                        label: Some("Toon Object Buffer"),
                        size: size_of::<ModelUniform>() as wgpu::BufferAddress,
                        usage: wgpu::BufferUsages::UNIFORM
                            | wgpu::BufferUsages::COPY_DST,
                        mapped_at_creation: false,
                    });
                let bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Toon Object Bind Group"),
                        layout: &object_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: buffer.as_entire_binding(),
                        }],
                    });
                ObjectSlot { buffer, bind_group }
            })
            .collect();

        Self {
            pipeline,
            meshes: gpu_meshes,
            objects,
            color,
        }
    }

    /// Material color used from the next [`prepare`](Self::prepare).
    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    /// Write the current transforms of `sections`.
    pub fn prepare(&self, queue: &wgpu::Queue, sections: &[SectionObject]) {
        for (slot, object) in self.objects.iter().zip(sections) {
            let uniform = ModelUniform::new(object, self.color);
            queue.write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }

    /// Record draws; camera at group 0, gradient map at group 1.
    pub fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        camera: &'a wgpu::BindGroup,
        gradient: &'a wgpu::BindGroup,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera, &[]);
        pass.set_bind_group(1, gradient, &[]);
        for (mesh, slot) in self.meshes.iter().zip(&self.objects) {
            pass.set_bind_group(2, &slot.bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(
                mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
