//! Mapping between world space and grid space.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Uniform scale plus offset from grid coordinates to world coordinates.
///
/// `world = voxel * scale - offset` and `voxel = floor((world + offset) / scale)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridTransform {
    /// World-space edge length of one voxel.
    pub scale: f32,
    /// World-space translation subtracted after scaling.
    pub offset: Vec3,
}

impl GridTransform {
    pub fn new(scale: f32, offset: Vec3) -> Self {
        Self { scale, offset }
    }

    /// Fits a grid whose largest axis has `n` cells into the `[-1, 1]` cube.
    pub fn unit_cube(n: usize) -> Self {
        Self {
            scale: 2.0 / n.max(1) as f32,
            offset: Vec3::ONE,
        }
    }

    /// Grid-space position (fractional voxels) of a world-space point.
    #[inline]
    pub fn to_grid(&self, world: Vec3) -> Vec3 {
        (world + self.offset) / self.scale
    }

    /// The voxel containing a world-space point.
    #[inline]
    pub fn world_to_voxel(&self, world: Vec3) -> IVec3 {
        self.to_grid(world).floor().as_ivec3()
    }

    /// World-space position of a grid-space point.
    #[inline]
    pub fn grid_to_world(&self, grid: Vec3) -> Vec3 {
        grid * self.scale - self.offset
    }

    /// World-space position of a voxel's minimum corner.
    #[inline]
    pub fn voxel_to_world(&self, voxel: IVec3) -> Vec3 {
        self.grid_to_world(voxel.as_vec3())
    }

    /// World-space position of a voxel's center.
    #[inline]
    pub fn voxel_center(&self, voxel: IVec3) -> Vec3 {
        self.grid_to_world(voxel.as_vec3() + Vec3::splat(0.5))
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::unit_cube(100)
    }
}
