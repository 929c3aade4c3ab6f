//! Unit-primitive geometry and the GPU meshes built from it.
//!
//! Every [`Primitive`](crate::shape::Primitive) has a canonical unit
//! geometry: half-extent 1, centered at the origin, cylinders and cones
//! running along Z (cone apex at +Z). Shape extents scale these at draw
//! time, so one [`MeshBank`] serves every node in the scene.
//!
//! Generation is split from upload: [`Geometry`] is plain vertex/index
//! data, [`Mesh`] is the GPU-resident form.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::gpu::GpuContext;
use crate::shape::{Detail, Primitive};

/// Vertex format for primitive rendering: position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Buffer layout for pipelines reading this vertex type: position at
    /// location 0, normal at location 1, 24 bytes per vertex.
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

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// CPU-side triangle geometry, counter-clockwise winding for front faces.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// A cube spanning -1..1 on all axes, four vertices per face for flat
    /// normals.
    pub fn cube() -> Self {
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        // (normal, tangent, bitangent) with tangent x bitangent = normal,
        // so each face comes out counter-clockwise seen from outside.
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        for (normal, tangent, bitangent) in faces {
            let base = vertices.len() as u32;
            for (s, t) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = normal + tangent * s + bitangent * t;
                vertices.push(Vertex::new(corner.to_array(), normal.to_array()));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        Self { vertices, indices }
    }

    /// A unit sphere from latitude/longitude subdivision.
    pub fn sphere(segments: u32, rings: u32) -> Self {
        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();
            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();
                vertices.push(Vertex::new([x, y, z], [x, y, z]));
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = ring * (segments + 1) + seg;
                let next = current + segments + 1;
                indices.extend_from_slice(&[current, next, current + 1]);
                indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }

        Self { vertices, indices }
    }

    /// A capped unit cylinder along Z: radius 1, z in -1..1.
    pub fn cylinder(segments: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side wall, radial normals.
        for seg in 0..=segments {
            let theta = TAU * seg as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex::new([cos, sin, -1.0], [cos, sin, 0.0]));
            vertices.push(Vertex::new([cos, sin, 1.0], [cos, sin, 0.0]));
        }
        for seg in 0..segments {
            let b0 = 2 * seg;
            let (t0, b1, t1) = (b0 + 1, b0 + 2, b0 + 3);
            indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
        }

        // End caps as triangle fans.
        for (z, flip) in [(1.0, false), (-1.0, true)] {
            let normal = [0.0, 0.0, z];
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, 0.0, z], normal));
            let rim = vertices.len() as u32;
            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                let (sin, cos) = theta.sin_cos();
                vertices.push(Vertex::new([cos, sin, z], normal));
            }
            for seg in 0..segments {
                if flip {
                    indices.extend_from_slice(&[center, rim + seg + 1, rim + seg]);
                } else {
                    indices.extend_from_slice(&[center, rim + seg, rim + seg + 1]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// A unit cone along Z: base circle of radius 1 at z = -1, apex at
    /// z = +1, one apex vertex per segment for clean slant normals.
    pub fn cone(segments: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for seg in 0..segments {
            let theta0 = TAU * seg as f32 / segments as f32;
            let theta1 = TAU * (seg + 1) as f32 / segments as f32;
            let mid = (theta0 + theta1) * 0.5;
            let base = vertices.len() as u32;
            for theta in [theta0, theta1] {
                let (sin, cos) = theta.sin_cos();
                let normal = Vec3::new(cos, sin, 0.5).normalize();
                vertices.push(Vertex::new([cos, sin, -1.0], normal.to_array()));
            }
            let apex_normal = Vec3::new(mid.cos(), mid.sin(), 0.5).normalize();
            vertices.push(Vertex::new([0.0, 0.0, 1.0], apex_normal.to_array()));
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        // Base cap, facing -Z.
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, 0.0, -1.0], [0.0, 0.0, -1.0]));
        let rim = vertices.len() as u32;
        for seg in 0..=segments {
            let theta = TAU * seg as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex::new([cos, sin, -1.0], [0.0, 0.0, -1.0]));
        }
        for seg in 0..segments {
            indices.extend_from_slice(&[center, rim + seg + 1, rim + seg]);
        }

        Self { vertices, indices }
    }

    /// Upload to the GPU.
    pub fn upload(&self, gpu: &GpuContext) -> Mesh {
        Mesh::new(gpu, &self.vertices, &self.indices)
    }
}

/// GPU-resident geometry: vertex and index buffers, immutable after
/// creation.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    pub fn new(gpu: &GpuContext, vertices: &[Vertex], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Primitive Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Primitive Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// One uploaded mesh per primitive and tessellation level. Cubes have a
/// single level; curved primitives get a coarse variant for the low-poly
/// flag.
pub struct MeshBank {
    sphere_high: Mesh,
    sphere_low: Mesh,
    cube: Mesh,
    cylinder_high: Mesh,
    cylinder_low: Mesh,
    cone_high: Mesh,
    cone_low: Mesh,
}

impl MeshBank {
    pub fn new(gpu: &GpuContext) -> Self {
        Self {
            sphere_high: Geometry::sphere(24, 16).upload(gpu),
            sphere_low: Geometry::sphere(10, 6).upload(gpu),
            cube: Geometry::cube().upload(gpu),
            cylinder_high: Geometry::cylinder(24).upload(gpu),
            cylinder_low: Geometry::cylinder(10).upload(gpu),
            cone_high: Geometry::cone(24).upload(gpu),
            cone_low: Geometry::cone(10).upload(gpu),
        }
    }

    pub fn get(&self, primitive: Primitive, detail: Detail) -> &Mesh {
        match (primitive, detail) {
            (Primitive::Cube, _) => &self.cube,
            (Primitive::Sphere, Detail::High) => &self.sphere_high,
            (Primitive::Sphere, Detail::Low) => &self.sphere_low,
            (Primitive::Cylinder, Detail::High) => &self.cylinder_high,
            (Primitive::Cylinder, Detail::Low) => &self.cylinder_low,
            (Primitive::Cone, Detail::High) => &self.cone_high,
            (Primitive::Cone, Detail::Low) => &self.cone_low,
        }
    }
}
