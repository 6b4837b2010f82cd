//! Face-culled mesh extraction from a [`VoxelGrid`].
//!
//! Only interior cells (`1..n-1` on every axis) are scanned. The outer shell
//! acts as a margin: its cells are never meshed, but they still hide faces of
//! interior cells that touch them.

use rayon::prelude::*;
use voxbox_voxel::{Block, VoxelGrid};

use crate::face_direction::FaceDirection;
use crate::grid_mesh::GridMesh;
use crate::sprite::SpriteTable;

/// Rebuilds `mesh` from `grid`, reusing its allocations.
///
/// Cells are visited z-major, then y, then x; faces of each cell are tested
/// in [`FaceDirection::ALL`] order.
pub fn voxelize(grid: &VoxelGrid, sprites: &SpriteTable, mesh: &mut GridMesh) {
    mesh.clear();
    let (_, _, nz) = grid.dims();
    for z in interior(nz) {
        mesh_slice(grid, sprites, z, mesh);
    }
    tracing::debug!(
        faces = mesh.face_count(),
        vertices = mesh.vertices.len(),
        "voxelized grid"
    );
}

/// Same output as [`voxelize`], with Z slices meshed in parallel.
///
/// Per-slice meshes are concatenated in Z order, so the buffers are identical
/// to the sequential result.
pub fn voxelize_parallel(grid: &VoxelGrid, sprites: &SpriteTable, mesh: &mut GridMesh) {
    mesh.clear();
    let (_, _, nz) = grid.dims();
    let slices: Vec<GridMesh> = interior(nz)
        .into_par_iter()
        .map(|z| {
            let mut slice = GridMesh::new();
            mesh_slice(grid, sprites, z, &mut slice);
            slice
        })
        .collect();

    let faces: usize = slices.iter().map(GridMesh::face_count).sum();
    mesh.vertices.reserve(faces * 4);
    mesh.indices.reserve(faces * 6);
    for slice in &slices {
        mesh.append(slice);
    }
    tracing::debug!(faces, slices = slices.len(), "voxelized grid in parallel");
}

/// Interior index range of an axis; empty when the axis has fewer than 3 cells.
fn interior(n: usize) -> std::ops::Range<usize> {
    1..n.saturating_sub(1).max(1)
}

fn mesh_slice(grid: &VoxelGrid, sprites: &SpriteTable, z: usize, mesh: &mut GridMesh) {
    let (nx, ny, _) = grid.dims();
    for y in interior(ny) {
        for x in interior(nx) {
            let block = grid.get(x, y, z);
            if block == Block::Air {
                continue;
            }
            for face in FaceDirection::ALL {
                let (ax, ay, az) = face.neighbor(x, y, z);
                if grid.get(ax, ay, az) == Block::Air {
                    mesh.push_face(face, x, y, z, sprites.get(block, face));
                }
            }
        }
    }
}
