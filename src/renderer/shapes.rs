//! Mesh generation for the shared 2D primitives

use std::f32::consts::TAU;

use super::vertex::MeshVertex;

/// Geometry ready for upload: vertices plus a triangle-list index buffer
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

/// Unit circle as a triangle fan of `segments + 2` vertices
///
/// Vertex 0 is the center; ring vertex `k` sits at angle `(k-1)·2π/segments`
/// measured clockwise from +Y, and the last vertex closes the ring.
pub fn unit_circle_fan(segments: u32) -> Vec<MeshVertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(MeshVertex::new(0.0, 0.0));

    for k in 1..segments + 2 {
        let angle = (k - 1) as f32 * TAU / segments as f32;
        vertices.push(MeshVertex::new(angle.sin(), angle.cos()));
    }

    vertices
}

/// Triangle-list indices equivalent to drawing `vertex_count` vertices as a fan
pub fn fan_indices(vertex_count: usize) -> Vec<u16> {
    (1..vertex_count.saturating_sub(1))
        .flat_map(|k| [0, k as u16, k as u16 + 1])
        .collect()
}

/// Unit circle mesh (radius 1, centered at origin)
pub fn circle_mesh(segments: u32) -> MeshData {
    let vertices = unit_circle_fan(segments);
    let indices = fan_indices(vertices.len());
    MeshData { vertices, indices }
}

/// Square covering [-1, 1]², used as the arena backdrop
pub fn unit_square() -> MeshData {
    MeshData {
        vertices: vec![
            MeshVertex::new(-1.0, -1.0),
            MeshVertex::new(1.0, -1.0),
            MeshVertex::new(1.0, 1.0),
            MeshVertex::new(-1.0, 1.0),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
