//! Unit cube geometry.
//!
//! Every part of the chair is the same cube spanning -1..+1 on each axis,
//! placed by a per-part model matrix whose scale components are therefore
//! half-extents. Each face has its own four vertices so normals stay flat,
//! giving 24 vertices and 36 indices (12 triangles).
//!
//! The geometry is uploaded once at setup into GPU vertex/index buffers and
//! referenced by every draw call.

use crate::gpu::GpuContext;

/// A vertex with position and normal, the only attributes this demo shades.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Face normal (unit length).
    pub normal: [f32; 3],
}

impl Vertex {
    /// The wgpu vertex buffer layout: position at location 0, normal at 1.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Vertices of the cube spanning -1..+1, four per face with the face normal.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 24] = [
    // Front face (Z+)
    Vertex::new([-1.0, -1.0,  1.0], [ 0.0,  0.0,  1.0]),
    Vertex::new([ 1.0, -1.0,  1.0], [ 0.0,  0.0,  1.0]),
    Vertex::new([ 1.0,  1.0,  1.0], [ 0.0,  0.0,  1.0]),
    Vertex::new([-1.0,  1.0,  1.0], [ 0.0,  0.0,  1.0]),
    // Back face (Z-)
    Vertex::new([ 1.0, -1.0, -1.0], [ 0.0,  0.0, -1.0]),
    Vertex::new([-1.0, -1.0, -1.0], [ 0.0,  0.0, -1.0]),
    Vertex::new([-1.0,  1.0, -1.0], [ 0.0,  0.0, -1.0]),
    Vertex::new([ 1.0,  1.0, -1.0], [ 0.0,  0.0, -1.0]),
    // Top face (Y+)
    Vertex::new([-1.0,  1.0,  1.0], [ 0.0,  1.0,  0.0]),
    Vertex::new([ 1.0,  1.0,  1.0], [ 0.0,  1.0,  0.0]),
    Vertex::new([ 1.0,  1.0, -1.0], [ 0.0,  1.0,  0.0]),
    Vertex::new([-1.0,  1.0, -1.0], [ 0.0,  1.0,  0.0]),
    // Bottom face (Y-)
    Vertex::new([-1.0, -1.0, -1.0], [ 0.0, -1.0,  0.0]),
    Vertex::new([ 1.0, -1.0, -1.0], [ 0.0, -1.0,  0.0]),
    Vertex::new([ 1.0, -1.0,  1.0], [ 0.0, -1.0,  0.0]),
    Vertex::new([-1.0, -1.0,  1.0], [ 0.0, -1.0,  0.0]),
    // Right face (X+)
    Vertex::new([ 1.0, -1.0,  1.0], [ 1.0,  0.0,  0.0]),
    Vertex::new([ 1.0, -1.0, -1.0], [ 1.0,  0.0,  0.0]),
    Vertex::new([ 1.0,  1.0, -1.0], [ 1.0,  0.0,  0.0]),
    Vertex::new([ 1.0,  1.0,  1.0], [ 1.0,  0.0,  0.0]),
    // Left face (X-)
    Vertex::new([-1.0, -1.0, -1.0], [-1.0,  0.0,  0.0]),
    Vertex::new([-1.0, -1.0,  1.0], [-1.0,  0.0,  0.0]),
    Vertex::new([-1.0,  1.0,  1.0], [-1.0,  0.0,  0.0]),
    Vertex::new([-1.0,  1.0, -1.0], [-1.0,  0.0,  0.0]),
];

/// Two counter-clockwise triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    0,  1,  2,  2,  3,  0,  // front
    4,  5,  6,  6,  7,  4,  // back
    8,  9,  10, 10, 11, 8,  // top
    12, 13, 14, 14, 15, 12, // bottom
    16, 17, 18, 18, 19, 16, // right
    20, 21, 22, 22, 23, 20, // left
];

/// GPU-resident cube geometry shared by all eight chair parts.
#[derive(Debug)]
pub struct Cube {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Cube {
    /// Uploads the cube's vertex and index data to the GPU.
    pub fn new(gpu: &GpuContext) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Index Buffer"),
                contents: bytemuck::cast_slice(&CUBE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: CUBE_INDICES.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_spans_unit_extents() {
        for v in &CUBE_VERTICES {
            for c in v.position {
                assert_eq!(c.abs(), 1.0);
            }
        }
    }

    #[test]
    fn normals_are_axis_aligned_and_unit() {
        for v in &CUBE_VERTICES {
            let n = Vec3::from_array(v.normal);
            assert_eq!(n.length(), 1.0);
            assert_eq!(n.abs().max_element(), 1.0);
        }
    }

    #[test]
    fn indices_form_twelve_triangles_within_bounds() {
        assert_eq!(CUBE_INDICES.len(), 36);
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
    }

    #[test]
    fn each_face_vertex_lies_on_its_normal_plane() {
        // A face vertex projected onto its normal sits on the +1 plane.
        for v in &CUBE_VERTICES {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert_eq!(p.dot(n), 1.0);
        }
    }
}
