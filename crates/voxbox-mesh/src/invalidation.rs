//! Lazy remeshing keyed on a caller-owned world version counter.

use voxbox_voxel::VoxelGrid;

use crate::grid_mesh::GridMesh;
use crate::sprite::SpriteTable;
use crate::voxelize::{voxelize, voxelize_parallel};

/// A mesh plus the world version it was built from.
#[derive(Clone, Debug, Default)]
pub struct MeshCache {
    mesh: GridMesh,
    /// `None` until the first build.
    meshed_version: Option<u64>,
    parallel: bool,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that rebuilds with [`voxelize_parallel`].
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    /// Returns `true` if the mesh does not reflect `current_version`.
    pub fn is_stale(&self, current_version: u64) -> bool {
        self.meshed_version != Some(current_version)
    }

    /// Rebuilds the mesh if it is stale. Returns whether a rebuild happened.
    pub fn rebuild_if_stale(&mut self, grid: &VoxelGrid, sprites: &SpriteTable, current_version: u64) -> bool {
        if !self.is_stale(current_version) {
            return false;
        }
        if self.parallel {
            voxelize_parallel(grid, sprites, &mut self.mesh);
        } else {
            voxelize(grid, sprites, &mut self.mesh);
        }
        self.meshed_version = Some(current_version);
        true
    }

    /// Forces the next [`rebuild_if_stale`](Self::rebuild_if_stale) to remesh.
    pub fn invalidate(&mut self) {
        self.meshed_version = None;
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn meshed_version(&self) -> Option<u64> {
        self.meshed_version
    }
}
