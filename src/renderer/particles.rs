//! Particle field drawn as instanced, size-attenuated squares.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::{
    bind_group_layout, create_scene_pipeline, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::options::Options;

/// Particle color and world size.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniform {
    /// Particle color.
    pub color: [f32; 3],
    /// World-space size (clip-space extent at unit depth).
    pub size: f32,
}

impl ParticleUniform {
    /// Color and size from the options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            color: options.colors.particles_rgb(),
            size: options.particles.size,
        }
    }
}

/// Vertices per particle quad (two triangles).
const QUAD_VERTICES: u32 = 6;

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

/// Draws the particle field.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform: ParticleUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ParticleRenderer {
    /// Upload particle positions and build the pipeline.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        positions: &[[f32; 3]],
        uniform: ParticleUniform,
    ) -> Self {
        let device = &context.device;
        let layout =
            bind_group_layout(device, "Particle Layout", &[uniform_buffer(0)]);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("shaders/particles.wgsl").into(),
            ),
        });
        let pipeline = create_scene_pipeline(
            device,
            "Particles",
            &shader,
            context.format(),
            &[instance_layout()],
            None,
            true,
            &[camera_layout, &layout],
        );

        let instance_buffer = Self::instance_buffer(device, positions);
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Particle Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            instance_buffer,
            instance_count: positions.len() as u32,
            uniform,
            uniform_buffer,
            bind_group,
        }
    }

    fn instance_buffer(
        device: &wgpu::Device,
        positions: &[[f32; 3]],
    ) -> wgpu::Buffer {
        // Keep a non-empty buffer so a zero-particle field still binds.
        let contents: &[[f32; 3]] = if positions.is_empty() {
            &[[0.0; 3]]
        } else {
            positions
        };
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Instance Buffer"),
            contents: bytemuck::cast_slice(contents),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }

    /// Number of particles drawn.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Change color and size; written to the GPU immediately.
    pub fn set_uniform(&mut self, queue: &wgpu::Queue, uniform: ParticleUniform) {
        if self.uniform != uniform {
            self.uniform = uniform;
            queue.write_buffer(
                &self.uniform_buffer,
                0,
                bytemuck::bytes_of(&self.uniform),
            );
        }
    }

    /// Replace the particle field.
    pub fn set_positions(
        &mut self,
        context: &RenderContext,
        positions: &[[f32; 3]],
    ) {
        self.instance_buffer = Self::instance_buffer(&context.device, positions);
        self.instance_count = positions.len() as u32;
    }

    /// Record the instanced draw; camera at group 0.
    pub fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        camera: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera, &[]);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..QUAD_VERTICES, 0..self.instance_count);
    }
}
