//! Vertex and index buffers produced by the mesher.

use voxbox_voxel::GridTransform;

use crate::face_direction::FaceDirection;

/// Index pattern for one quad: two triangles over 4 vertices.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// A single mesh vertex, laid out for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in grid units, or world units after [`GridMesh::scale_to_world`].
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
    /// Face-local texture coordinate in `[0, 1]²`.
    pub uv: [f32; 2],
    /// Atlas tile id.
    pub sprite_id: u32,
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 36]);

/// A face-culled triangle mesh.
///
/// Every face owns 4 fresh vertices; vertices are never shared between faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl GridMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both buffers, keeping their allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends one unit face of the voxel at `(x, y, z)`.
    pub fn push_face(&mut self, face: FaceDirection, x: usize, y: usize, z: usize, sprite_id: u32) {
        let base = self.vertices.len() as u32;
        let normal = face.normal();
        let origin = [x as f32, y as f32, z as f32];
        for (corner, uv) in face.corners().into_iter().zip(face.uvs()) {
            self.vertices.push(MeshVertex {
                position: [
                    origin[0] + corner[0],
                    origin[1] + corner[1],
                    origin[2] + corner[2],
                ],
                normal,
                uv,
                sprite_id,
            });
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    /// Appends `other`, rebasing its indices past this mesh's vertices.
    pub fn append(&mut self, other: &GridMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    /// Number of quads.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of faces whose normal points in `face`'s direction.
    pub fn count_faces_for_direction(&self, face: FaceDirection) -> usize {
        let normal = face.normal();
        self.vertices
            .chunks_exact(4)
            .filter(|quad| quad[0].normal == normal)
            .count()
    }

    /// Converts every position from grid units to world units in place.
    pub fn scale_to_world(&mut self, transform: &GridTransform) {
        for v in &mut self.vertices {
            let p = transform.grid_to_world(v.position.into());
            v.position = p.into();
        }
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = GridMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_push_face_emits_quad() {
        let mut mesh = GridMesh::new();
        mesh.push_face(FaceDirection::Top, 2, 3, 4, 7);
        mesh.push_face(FaceDirection::Left, 2, 3, 4, 7);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
        assert_eq!(mesh.vertices[0].position, [2.0, 4.0, 4.0]);
        assert_eq!(mesh.vertices[2].position, [3.0, 4.0, 5.0]);
        assert!(mesh.vertices.iter().all(|v| v.sprite_id == 7));
        assert_eq!(mesh.count_faces_for_direction(FaceDirection::Top), 1);
        assert_eq!(mesh.count_faces_for_direction(FaceDirection::Bottom), 0);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut mesh = GridMesh::new();
        for x in 0..16 {
            mesh.push_face(FaceDirection::Front, x, 0, 0, 1);
        }
        let cap = (mesh.vertices.capacity(), mesh.indices.capacity());
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!((mesh.vertices.capacity(), mesh.indices.capacity()), cap);
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut a = GridMesh::new();
        a.push_face(FaceDirection::Back, 0, 0, 0, 1);
        let mut b = GridMesh::new();
        b.push_face(FaceDirection::Front, 0, 0, 0, 1);
        a.append(&b);
        assert_eq!(&a.indices[6..], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn test_scale_to_world() {
        let mut mesh = GridMesh::new();
        mesh.push_face(FaceDirection::Bottom, 0, 0, 0, 1);
        mesh.scale_to_world(&GridTransform::new(0.5, Vec3::ONE));
        assert_eq!(mesh.vertices[0].position, [-1.0, -1.0, -1.0]);
        assert_eq!(mesh.vertices[2].position, [-0.5, -1.0, -0.5]);
    }

    #[test]
    fn test_byte_views() {
        let mut mesh = GridMesh::new();
        mesh.push_face(FaceDirection::Right, 0, 0, 0, 1);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 36);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
