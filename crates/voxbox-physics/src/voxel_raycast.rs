//! Block picking by grid traversal (Amanatides & Woo).
//!
//! The ray starts at the corner of an integer voxel and steps one cell at a
//! time toward whichever grid line is parametrically closest. Directions need
//! not be normalized; only the relative step distances are compared.

use glam::{IVec3, Vec3};
use voxbox_voxel::{Block, VoxelGrid};

/// Read access to a bounded voxel volume.
pub trait VoxelAccess {
    /// Grid extent along each axis.
    fn dims(&self) -> IVec3;

    /// Block at `pos`, or `None` outside the volume.
    fn block_at(&self, pos: IVec3) -> Option<Block>;

    /// Returns `true` if `pos` is inside the volume and not Air.
    fn is_solid_at(&self, pos: IVec3) -> bool {
        self.block_at(pos).is_some_and(Block::is_solid)
    }
}

impl VoxelAccess for VoxelGrid {
    fn dims(&self) -> IVec3 {
        self.dims_ivec()
    }

    fn block_at(&self, pos: IVec3) -> Option<Block> {
        self.get_at(pos)
    }
}

/// How a traversal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalEnd {
    /// Stopped on a non-Air voxel holding this block.
    Hit(Block),
    /// Left the grid before touching anything solid.
    ExitedGrid,
}

/// Result of a ray traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayTraversal {
    /// Last voxel the ray stepped into. On [`TraversalEnd::ExitedGrid`] this
    /// may lie outside the grid and must be bounds-checked before use.
    pub voxel: IVec3,
    /// The empty voxel visited just before `voxel`.
    pub previous: IVec3,
    pub end: TraversalEnd,
}

impl RayTraversal {
    /// The solid voxel that was hit, if any.
    pub fn hit_voxel(&self) -> Option<IVec3> {
        match self.end {
            TraversalEnd::Hit(_) => Some(self.voxel),
            TraversalEnd::ExitedGrid => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self.end, TraversalEnd::Hit(_))
    }
}

/// Casts a ray from voxel `origin` along `dir`.
pub fn cast_ray(world: &dyn VoxelAccess, origin: IVec3, dir: Vec3) -> RayTraversal {
    traverse(world, origin, dir, None)
}

/// Like [`cast_ray`], also appending every empty voxel visited to `path`.
///
/// `path` is cleared first. Its last entry equals the result's `previous`.
pub fn cast_ray_with_path(
    world: &dyn VoxelAccess,
    origin: IVec3,
    dir: Vec3,
    path: &mut Vec<IVec3>,
) -> RayTraversal {
    path.clear();
    traverse(world, origin, dir, Some(path))
}

fn traverse(
    world: &dyn VoxelAccess,
    origin: IVec3,
    dir: Vec3,
    mut path: Option<&mut Vec<IVec3>>,
) -> RayTraversal {
    let dims = world.dims();
    let step = IVec3::new(step_sign(dir.x), step_sign(dir.y), step_sign(dir.z));

    let mut voxel = origin;
    let mut previous = origin;

    loop {
        let block = match world.block_at(voxel) {
            Some(block) => block,
            None => {
                return RayTraversal {
                    voxel,
                    previous,
                    end: TraversalEnd::ExitedGrid,
                };
            }
        };
        if block.is_solid() {
            return RayTraversal {
                voxel,
                previous,
                end: TraversalEnd::Hit(block),
            };
        }

        previous = voxel;
        if let Some(path) = path.as_deref_mut() {
            path.push(voxel);
        }

        let next = voxel + step;
        let t = Vec3::new(
            boundary_distance(next.x, origin.x, dir.x),
            boundary_distance(next.y, origin.y, dir.y),
            boundary_distance(next.z, origin.z, dir.z),
        );
        let axis = if t.x < t.y {
            if t.x < t.z { 0 } else { 2 }
        } else if t.y < t.z {
            1
        } else {
            2
        };

        voxel[axis] = next[axis];
        if voxel[axis] < 0 || voxel[axis] >= dims[axis] {
            return RayTraversal {
                voxel,
                previous,
                end: TraversalEnd::ExitedGrid,
            };
        }
    }
}

/// Exact zero steps positive.
#[inline]
fn step_sign(component: f32) -> i32 {
    if component >= 0.0 { 1 } else { -1 }
}

/// Unnormalized parametric distance from the origin corner to grid line `next`.
#[inline]
fn boundary_distance(next: i32, origin: i32, dir: f32) -> f32 {
    if dir == 0.0 {
        f32::INFINITY
    } else {
        ((next - origin) as f32 / dir).abs()
    }
}
