//! The chair render pass.
//!
//! One depth-tested pipeline draws the eight cubes of the chair. Bind group
//! 0 holds the frame uniforms (ambient light color, written once at setup);
//! bind group 1 holds the per-part uniforms (mvp and normal matrix) in a
//! dynamic-offset buffer with one 256-byte slot per part, so every draw in
//! the single render pass reads its own matrices.
//!
//! Each redraw is a full repaint: clear color and depth, then draw seat,
//! legs, backrest, and armrests in order. Nothing is retained between
//! frames except the GPU resources themselves.

use glam::Mat4;

use crate::camera::Camera;
use crate::chair::{ChairState, PART_COUNT};
use crate::cube::{Cube, Vertex};
use crate::error::SetupError;
use crate::gpu::GpuContext;

/// The ambient light color actually bound at draw time.
///
/// The vertex stage's diffuse base color is black, so the visible shading is
/// effectively this flat ambient term. Preserved as observed; see DESIGN.md.
pub const AMBIENT_LIGHT: [f32; 3] = [1.0, 0.0, 0.0];

/// Background clear color.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.4,
    g: 0.4,
    b: 0.4,
    a: 1.0,
};

/// Per-frame uniforms, written once at setup.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Ambient light color added in the fragment stage.
    pub ambient: [f32; 3],
    pub _pad: f32,
}

/// Per-part uniforms, one 256-byte-aligned slot per chair part.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PartUniforms {
    /// Combined `view_proj * model` transform to clip space.
    pub mvp: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix, correct under the parts'
    /// non-uniform scales.
    pub normal_matrix: [[f32; 4]; 4],
}

/// Stride between per-part uniform slots; wgpu's default minimum dynamic
/// uniform offset alignment.
pub const PART_UNIFORM_STRIDE: u64 = 256;

/// Computes the shading-stage inputs for one part.
pub fn part_uniforms(view_proj: Mat4, model: Mat4) -> PartUniforms {
    PartUniforms {
        mvp: (view_proj * model).to_cols_array_2d(),
        normal_matrix: model.inverse().transpose().to_cols_array_2d(),
    }
}

/// Renders the articulated chair.
pub struct ChairPass {
    pipeline: wgpu::RenderPipeline,
    frame_bind_group: wgpu::BindGroup,
    part_buffer: wgpu::Buffer,
    part_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl ChairPass {
    /// Creates the pipeline, uniform buffers, and depth texture.
    ///
    /// Shader compilation and pipeline creation are the second recognized
    /// failure point after context acquisition; validation errors are
    /// captured with an error scope and returned as
    /// [`SetupError::Pipeline`].
    pub fn new(gpu: &GpuContext) -> Result<Self, SetupError> {
        let device = &gpu.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Chair Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/chair.wgsl").into()),
        });

        // Frame uniforms (group 0), written once below.
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Per-part uniforms (group 1), one slot per part behind a dynamic
        // offset.
        let part_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Part Uniforms"),
            size: PART_UNIFORM_STRIDE * PART_COUNT as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let part_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Part Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<PartUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let part_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Part Bind Group"),
            layout: &part_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &part_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<PartUniforms>() as u64),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Chair Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &part_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Chair Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(SetupError::Pipeline(error.to_string()));
        }

        // The ambient color is bound exactly once, after pipeline setup.
        gpu.queue.write_buffer(
            &frame_buffer,
            0,
            bytemuck::cast_slice(&[FrameUniforms {
                ambient: AMBIENT_LIGHT,
                _pad: 0.0,
            }]),
        );

        let depth_view = Self::create_depth_view(gpu);

        Ok(Self {
            pipeline,
            frame_bind_group,
            part_buffer,
            part_bind_group,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        })
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size has changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Draws one full frame of the chair and presents it.
    ///
    /// Clears color and depth, then issues one indexed draw of the cube per
    /// part: seat, four legs, backrest, two armrests. A lost or outdated
    /// surface skips the frame after reconfiguring.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        cube: &Cube,
        camera: &Camera,
        state: &ChairState,
    ) {
        self.ensure_depth_size(gpu);

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(error) => {
                log::warn!("skipping frame, surface unavailable: {error}");
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = camera.view_proj(gpu.aspect());
        for (i, model) in state.part_matrices().iter().enumerate() {
            gpu.queue.write_buffer(
                &self.part_buffer,
                i as u64 * PART_UNIFORM_STRIDE,
                bytemuck::cast_slice(&[part_uniforms(view_proj, *model)]),
            );
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Chair Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Chair Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_vertex_buffer(0, cube.vertex_buffer.slice(..));
            render_pass.set_index_buffer(cube.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for i in 0..PART_COUNT {
                let offset = (i as u64 * PART_UNIFORM_STRIDE) as u32;
                render_pass.set_bind_group(1, &self.part_bind_group, &[offset]);
                render_pass.draw_indexed(0..cube.index_count, 0, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn uniform_blocks_fit_their_slots() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        assert_eq!(std::mem::size_of::<PartUniforms>(), 128);
        assert!(std::mem::size_of::<PartUniforms>() as u64 <= PART_UNIFORM_STRIDE);
    }

    #[test]
    fn part_uniforms_compose_mvp_and_inverse_transpose() {
        let view_proj = Camera::new().view_proj(4.0 / 3.0);
        let model = crate::chair::seat_matrix();
        let uniforms = part_uniforms(view_proj, model);

        let expected_mvp = (view_proj * model).to_cols_array_2d();
        let expected_normal = model.inverse().transpose().to_cols_array_2d();
        for col in 0..4 {
            for row in 0..4 {
                assert_relative_eq!(uniforms.mvp[col][row], expected_mvp[col][row]);
                assert_relative_eq!(
                    uniforms.normal_matrix[col][row],
                    expected_normal[col][row]
                );
            }
        }
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let model = glam::Mat4::from_translation(Vec3::new(3.0, -7.0, 11.0));
        let uniforms = part_uniforms(glam::Mat4::IDENTITY, model);
        let normal = glam::Mat4::from_cols_array_2d(&uniforms.normal_matrix);
        let n = (normal * glam::Vec4::new(0.0, 0.0, 1.0, 0.0)).truncate();
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(n.y, 0.0, epsilon = 1e-6);
    }
}
