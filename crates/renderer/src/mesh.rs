//! Primitive mesh generation (CPU) and GPU mesh buffers.
//!
//! The cockpit scene is assembled entirely from these parametrized
//! primitives; nothing is loaded from disk.

use crate::vertex::Vertex;
use std::f32::consts::{PI, TAU};
use wgpu::util::DeviceExt;

/// CPU-side mesh data, buildable without a GPU (unit tested directly).
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned box centered at the origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        // Six faces, four unique vertices each so normals stay flat.
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [0.0, 0.0, 1.0],
                [
                    [-hx, -hy, hz],
                    [hx, -hy, hz],
                    [hx, hy, hz],
                    [-hx, hy, hz],
                ],
            ),
            (
                [0.0, 0.0, -1.0],
                [
                    [hx, -hy, -hz],
                    [-hx, -hy, -hz],
                    [-hx, hy, -hz],
                    [hx, hy, -hz],
                ],
            ),
            (
                [0.0, 1.0, 0.0],
                [
                    [-hx, hy, hz],
                    [hx, hy, hz],
                    [hx, hy, -hz],
                    [-hx, hy, -hz],
                ],
            ),
            (
                [0.0, -1.0, 0.0],
                [
                    [-hx, -hy, -hz],
                    [hx, -hy, -hz],
                    [hx, -hy, hz],
                    [-hx, -hy, hz],
                ],
            ),
            (
                [1.0, 0.0, 0.0],
                [
                    [hx, -hy, hz],
                    [hx, -hy, -hz],
                    [hx, hy, -hz],
                    [hx, hy, hz],
                ],
            ),
            (
                [-1.0, 0.0, 0.0],
                [
                    [-hx, -hy, -hz],
                    [-hx, -hy, hz],
                    [-hx, hy, hz],
                    [-hx, hy, -hz],
                ],
            ),
        ];

        let mut mesh = Self::default();
        for (normal, corners) in faces {
            let base = mesh.vertices.len() as u32;
            for corner in corners {
                mesh.vertices.push(Vertex::new(corner, normal));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// UV sphere centered at the origin.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let mut mesh = Self::default();
        for ring in 0..=rings {
            let v = ring as f32 / rings as f32;
            let polar = v * PI;
            let (sp, cp) = polar.sin_cos();
            for seg in 0..=segments {
                let u = seg as f32 / segments as f32;
                let azimuth = u * TAU;
                let (sa, ca) = azimuth.sin_cos();
                let normal = [sp * ca, cp, sp * sa];
                mesh.vertices.push(Vertex::new(
                    [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                ));
            }
        }
        let stride = segments + 1;
        for ring in 0..rings {
            for seg in 0..segments {
                let a = ring * stride + seg;
                let b = a + stride;
                mesh.indices
                    .extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        mesh
    }

    /// Open-ended cylinder or truncated cone along Y, with caps.
    pub fn cylinder(top_radius: f32, bottom_radius: f32, height: f32, segments: u32) -> Self {
        let mut mesh = Self::default();
        let hy = height * 0.5;
        let slope = (bottom_radius - top_radius) / height;

        // Side
        for seg in 0..=segments {
            let azimuth = seg as f32 / segments as f32 * TAU;
            let (sa, ca) = azimuth.sin_cos();
            let normal_len = (1.0 + slope * slope).sqrt();
            let normal = [ca / normal_len, slope / normal_len, sa / normal_len];
            mesh.vertices
                .push(Vertex::new([ca * top_radius, hy, sa * top_radius], normal));
            mesh.vertices.push(Vertex::new(
                [ca * bottom_radius, -hy, sa * bottom_radius],
                normal,
            ));
        }
        for seg in 0..segments {
            let a = seg * 2;
            mesh.indices
                .extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
        }

        // Caps
        for (y, radius, normal_y) in [(hy, top_radius, 1.0f32), (-hy, bottom_radius, -1.0)] {
            if radius <= 0.0 {
                continue;
            }
            let center = mesh.vertices.len() as u32;
            mesh.vertices
                .push(Vertex::new([0.0, y, 0.0], [0.0, normal_y, 0.0]));
            for seg in 0..=segments {
                let azimuth = seg as f32 / segments as f32 * TAU;
                let (sa, ca) = azimuth.sin_cos();
                mesh.vertices.push(Vertex::new(
                    [ca * radius, y, sa * radius],
                    [0.0, normal_y, 0.0],
                ));
            }
            for seg in 0..segments {
                let rim = center + 1 + seg;
                if normal_y > 0.0 {
                    mesh.indices.extend_from_slice(&[center, rim + 1, rim]);
                } else {
                    mesh.indices.extend_from_slice(&[center, rim, rim + 1]);
                }
            }
        }
        mesh
    }

    /// Cone along Y (apex up). Low segment counts give the faceted
    /// "hologram ship body" look.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, segments)
    }

    /// Torus in the XY plane.
    pub fn torus(radius: f32, tube_radius: f32, ring_segments: u32, tube_segments: u32) -> Self {
        let mut mesh = Self::default();
        for ring in 0..=ring_segments {
            let u = ring as f32 / ring_segments as f32 * TAU;
            let (su, cu) = u.sin_cos();
            for tube in 0..=tube_segments {
                let v = tube as f32 / tube_segments as f32 * TAU;
                let (sv, cv) = v.sin_cos();
                let position = [
                    (radius + tube_radius * cv) * cu,
                    (radius + tube_radius * cv) * su,
                    tube_radius * sv,
                ];
                let normal = [cv * cu, cv * su, sv];
                mesh.vertices.push(Vertex::new(position, normal));
            }
        }
        let stride = tube_segments + 1;
        for ring in 0..ring_segments {
            for tube in 0..tube_segments {
                let a = ring * stride + tube;
                let b = a + stride;
                mesh.indices
                    .extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        mesh
    }

    /// Flat annulus in the XY plane, both faces (planet rings are seen
    /// edge-on from below).
    pub fn annulus(inner_radius: f32, outer_radius: f32, segments: u32) -> Self {
        let mut mesh = Self::default();
        for (normal, flip) in [([0.0, 0.0, 1.0], false), ([0.0, 0.0, -1.0], true)] {
            let base = mesh.vertices.len() as u32;
            for seg in 0..=segments {
                let azimuth = seg as f32 / segments as f32 * TAU;
                let (sa, ca) = azimuth.sin_cos();
                mesh.vertices.push(Vertex::new(
                    [ca * inner_radius, sa * inner_radius, 0.0],
                    normal,
                ));
                mesh.vertices.push(Vertex::new(
                    [ca * outer_radius, sa * outer_radius, 0.0],
                    normal,
                ));
            }
            for seg in 0..segments {
                let a = base + seg * 2;
                if flip {
                    mesh.indices
                        .extend_from_slice(&[a, a + 2, a + 1, a + 1, a + 2, a + 3]);
                } else {
                    mesh.indices
                        .extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
                }
            }
        }
        mesh
    }

    /// Regular dodecahedron (star-map core). Smooth normals are fine for
    /// an emissive solid.
    pub fn dodecahedron(radius: f32) -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let r = 1.0 / t;
        #[rustfmt::skip]
        let raw: [[f32; 3]; 20] = [
            [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
            [0.0, -r, -t], [0.0, -r, t], [0.0, r, -t], [0.0, r, t],
            [-r, -t, 0.0], [-r, t, 0.0], [r, -t, 0.0], [r, t, 0.0],
            [-t, 0.0, -r], [t, 0.0, -r], [-t, 0.0, r], [t, 0.0, r],
        ];
        #[rustfmt::skip]
        let indices: [u32; 108] = [
            3, 11, 7,   3, 7, 15,   3, 15, 13,
            7, 19, 17,  7, 17, 6,   7, 6, 15,
            17, 4, 8,   17, 8, 10,  17, 10, 6,
            8, 0, 16,   8, 16, 2,   8, 2, 10,
            0, 12, 1,   0, 1, 18,   0, 18, 16,
            6, 10, 2,   6, 2, 13,   6, 13, 15,
            2, 16, 18,  2, 18, 3,   2, 3, 13,
            18, 1, 9,   18, 9, 11,  18, 11, 3,
            4, 14, 12,  4, 12, 0,   4, 0, 8,
            11, 9, 5,   11, 5, 19,  11, 19, 7,
            19, 5, 14,  19, 14, 4,  19, 4, 17,
            1, 12, 14,  1, 14, 5,   1, 5, 9,
        ];
        let vertices = raw
            .iter()
            .map(|p| {
                let v = glam::Vec3::from_array(*p).normalize();
                Vertex::new((v * radius).to_array(), v.to_array())
            })
            .collect();
        Self {
            vertices,
            indices: indices.to_vec(),
        }
    }
}

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_indices: data.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &MeshData) {
        for v in &mesh.vertices {
            let len = glam::Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal not unit: {:?}", v.normal);
        }
    }

    #[test]
    fn cuboid_has_six_faces() {
        let mesh = MeshData::cuboid(2.0, 1.0, 3.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_unit_normals(&mesh);
        for v in &mesh.vertices {
            assert!(v.position[0].abs() <= 1.0 + 1e-6);
            assert!(v.position[1].abs() <= 0.5 + 1e-6);
            assert!(v.position[2].abs() <= 1.5 + 1e-6);
        }
    }

    #[test]
    fn sphere_vertices_on_radius() {
        let mesh = MeshData::uv_sphere(14.0, 16, 12);
        assert_unit_normals(&mesh);
        for v in &mesh.vertices {
            let len = glam::Vec3::from_array(v.position).length();
            assert!((len - 14.0).abs() < 1e-3);
        }
    }

    #[test]
    fn torus_index_bounds() {
        let mesh = MeshData::torus(0.25, 0.02, 8, 24);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn dodecahedron_vertices_on_radius() {
        let mesh = MeshData::dodecahedron(0.2);
        assert_eq!(mesh.vertices.len(), 20);
        assert_eq!(mesh.indices.len(), 108);
        for v in &mesh.vertices {
            let len = glam::Vec3::from_array(v.position).length();
            assert!((len - 0.2).abs() < 1e-4);
        }
    }

    #[test]
    fn cone_is_capped_cylinder() {
        let mesh = MeshData::cone(0.2, 0.8, 4);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
    }

    #[test]
    fn annulus_is_double_sided() {
        let mesh = MeshData::annulus(18.0, 28.0, 64);
        // Two faces, same triangle count each.
        assert_eq!(mesh.indices.len(), 64 * 6 * 2);
    }
}
