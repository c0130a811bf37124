//! Scene rendering: toon-shaded section meshes and the particle field.
//!
//! [`SceneRenderer`] owns the shared camera/light uniform, the gradient
//! map bind group, the depth buffer and both passes. Each frame the engine
//! calls [`prepare`](SceneRenderer::prepare) with the current
//! [`SceneState`] and then [`render`](SceneRenderer::render).

/// Instanced particle squares.
pub mod particles;
/// Toon-shaded section meshes.
pub mod toon;

use wgpu::util::DeviceExt;

use self::particles::{ParticleRenderer, ParticleUniform};
use self::toon::ToonRenderer;
use crate::camera::CameraUniform;
use crate::gpu::pipeline_helpers::{
    bind_group_layout, non_filtering_sampler, texture_2d, uniform_buffer,
    DEPTH_FORMAT,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{GradientImage, GradientMap};
use crate::options::Options;
use crate::scene::SceneContent;
use crate::state::SceneState;

/// Everything needed to draw one frame.
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    gradient_layout: wgpu::BindGroupLayout,
    gradient: GradientMap,
    gradient_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
    toon: ToonRenderer,
    particles: ParticleRenderer,
}

impl SceneRenderer {
    /// Build pipelines and upload static geometry. The procedural
    /// three-tone gradient is bound until [`set_gradient`](Self::set_gradient)
    /// replaces it.
    pub fn new(
        context: &RenderContext,
        content: &SceneContent,
        options: &Options,
    ) -> Self {
        let device = &context.device;

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.set_light(content.light.position, content.light.intensity);
        let camera_layout =
            bind_group_layout(device, "Camera Layout", &[uniform_buffer(0)]);
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&camera_uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let gradient_layout = bind_group_layout(
            device,
            "Gradient Layout",
            &[texture_2d(0), non_filtering_sampler(1)],
        );
        let gradient =
            GradientMap::new(device, &context.queue, &GradientImage::three_tone());
        let gradient_bind_group =
            Self::gradient_bind_group(device, &gradient_layout, &gradient);

        let toon = ToonRenderer::new(
            context,
            &camera_layout,
            &gradient_layout,
            &content.meshes,
            options.colors.material_rgb(),
        );
        let particles = ParticleRenderer::new(
            context,
            &camera_layout,
            &content.particles,
            ParticleUniform::from_options(options),
        );

        let (width, height) = context.size();
        Self {
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            gradient_layout,
            gradient,
            gradient_bind_group,
            depth_view: Self::create_depth_view(device, width, height),
            clear_color: clear_color(options.colors.background_rgb()),
            toon,
            particles,
        }
    }

    fn gradient_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        gradient: &GradientMap,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Gradient Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&gradient.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&gradient.sampler),
                },
            ],
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Replace the gradient map with a decoded image.
    pub fn set_gradient(&mut self, context: &RenderContext, image: &GradientImage) {
        self.gradient = GradientMap::new(&context.device, &context.queue, image);
        self.gradient_bind_group = Self::gradient_bind_group(
            &context.device,
            &self.gradient_layout,
            &self.gradient,
        );
    }

    /// Size of the bound gradient map in texels.
    #[must_use]
    pub fn gradient_size(&self) -> (u32, u32) {
        let size = self.gradient.texture.size();
        (size.width, size.height)
    }

    /// Pick up color and particle size changes.
    pub fn apply_options(&mut self, queue: &wgpu::Queue, options: &Options) {
        self.toon.set_color(options.colors.material_rgb());
        self.particles
            .set_uniform(queue, ParticleUniform::from_options(options));
        self.clear_color = clear_color(options.colors.background_rgb());
    }

    /// Replace the particle field positions.
    pub fn set_particles(&mut self, context: &RenderContext, positions: &[[f32; 3]]) {
        self.particles.set_positions(context, positions);
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        self.depth_view = Self::create_depth_view(&context.device, width, height);
    }

    /// Upload camera and object transforms for this frame.
    pub fn prepare(&mut self, queue: &wgpu::Queue, state: &SceneState) {
        self.camera_uniform.update_view_proj(&state.rig.camera());
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
        self.toon.prepare(queue, &state.sections);
    }

    /// Draw the scene into the next surface texture and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface texture cannot be
    /// acquired.
    pub fn render(
        &self,
        context: &RenderContext,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.toon
                .draw(&mut pass, &self.camera_bind_group, &self.gradient_bind_group);
            self.particles.draw(&mut pass, &self.camera_bind_group);
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }
}

fn clear_color(rgb: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(rgb[0]),
        g: f64::from(rgb[1]),
        b: f64::from(rgb[2]),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_uniform_layout_matches_shader() {
        assert_eq!(size_of::<CameraUniform>(), 96);
    }

    #[test]
    fn background_becomes_opaque_clear_color() {
        let color = clear_color([0.5, 0.25, 0.0]);
        assert_eq!((color.r, color.g, color.b, color.a), (0.5, 0.25, 0.0, 1.0));
    }
}
