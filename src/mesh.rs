//! Flat vertex/triangle mesh and its append-only builder.

use alloc::vec::Vec;

use crate::geometry::Rgba;

/// One mesh vertex: position, tint, texture coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
    pub uv: [f32; 2],
}

/// Triangle mesh produced by one rebuild.
///
/// Triangles index into `vertices` of the same mesh and are wound
/// counter-clockwise (y-up).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangle indices flattened for an index buffer.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.triangles.iter().flatten().copied()
    }

    /// Twice the signed area of triangle `tri`; positive when wound
    /// counter-clockwise.
    pub fn signed_area(&self, tri: usize) -> f32 {
        let [a, b, c] = self.triangles[tri];
        let pa = self.vertices[a as usize].position;
        let pb = self.vertices[b as usize].position;
        let pc = self.vertices[c as usize].position;
        (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0])
    }
}

/// Append-only vertex/triangle accumulator.
///
/// [`add_vertex`](Self::add_vertex) returns the absolute index of the new
/// vertex. Tessellators read [`vertex_count`](Self::vertex_count) before
/// emitting a shape and pass it as the base offset for that shape's
/// triangles. Indices are not validated.
///
/// A builder can be reused across rebuilds: [`clear`](Self::clear) and
/// [`take_mesh`](Self::take_mesh) keep the allocated capacity. Output does
/// not depend on reuse.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            mesh: Mesh {
                vertices: Vec::with_capacity(vertices),
                triangles: Vec::with_capacity(triangles),
            },
        }
    }

    /// Reserve room for at least this many more vertices and triangles.
    pub fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.mesh.vertices.reserve(vertices);
        self.mesh.triangles.reserve(triangles);
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, position: [f32; 2], color: Rgba, uv: [f32; 2]) -> u32 {
        let index = self.vertex_count();
        self.mesh.vertices.push(Vertex {
            position,
            color,
            uv,
        });
        index
    }

    /// Append a triangle of absolute vertex indices.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.mesh.triangles.push([i0, i1, i2]);
    }

    /// Append a triangle whose indices are relative to `base`.
    pub fn add_triangle_at(&mut self, base: u32, a: u32, b: u32, c: u32) {
        self.add_triangle(base + a, base + b, base + c);
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangles.len()
    }

    /// Drop all vertices and triangles, keeping capacity.
    pub fn clear(&mut self) {
        self.mesh.vertices.clear();
        self.mesh.triangles.clear();
    }

    /// Accumulated mesh so far.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Copy the accumulated mesh out and clear the builder.
    ///
    /// The builder keeps its buffers, so the next rebuild does not
    /// reallocate.
    pub fn take_mesh(&mut self) -> Mesh {
        let out = Mesh {
            vertices: self.mesh.vertices.clone(),
            triangles: self.mesh.triangles.clone(),
        };
        self.clear();
        out
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle(b: &mut MeshBuilder) {
        let base = b.vertex_count();
        b.add_vertex([0.0, 0.0], Rgba::WHITE, [0.0, 0.0]);
        b.add_vertex([1.0, 0.0], Rgba::WHITE, [1.0, 0.0]);
        b.add_vertex([0.0, 1.0], Rgba::WHITE, [0.0, 1.0]);
        b.add_triangle_at(base, 0, 1, 2);
    }

    #[test]
    fn add_vertex_returns_running_index() {
        let mut b = MeshBuilder::new();
        assert_eq!(b.add_vertex([0.0, 0.0], Rgba::WHITE, [0.0, 0.0]), 0);
        assert_eq!(b.add_vertex([1.0, 0.0], Rgba::WHITE, [1.0, 0.0]), 1);
        assert_eq!(b.vertex_count(), 2);
    }

    #[test]
    fn base_offset_applies_to_second_shape() {
        let mut b = MeshBuilder::new();
        unit_triangle(&mut b);
        unit_triangle(&mut b);
        let mesh = b.into_mesh();
        assert_eq!(mesh.triangles, [[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.indices().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn signed_area_ccw_positive() {
        let mut b = MeshBuilder::new();
        unit_triangle(&mut b);
        assert_eq!(b.mesh().signed_area(0), 1.0);

        b.add_triangle(0, 2, 1);
        assert_eq!(b.mesh().signed_area(1), -1.0);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut b = MeshBuilder::with_capacity(16, 8);
        unit_triangle(&mut b);
        b.clear();
        assert_eq!(b.vertex_count(), 0);
        assert_eq!(b.triangle_count(), 0);
        assert!(b.mesh().vertices.capacity() >= 16);
    }

    #[test]
    fn take_mesh_matches_fresh_builder() {
        let mut reused = MeshBuilder::new();
        unit_triangle(&mut reused);
        unit_triangle(&mut reused);
        let _ = reused.take_mesh();
        unit_triangle(&mut reused);
        let second = reused.take_mesh();

        let mut fresh = MeshBuilder::new();
        unit_triangle(&mut fresh);
        assert_eq!(second, fresh.into_mesh());
        assert!(reused.mesh().is_empty());
    }
}
