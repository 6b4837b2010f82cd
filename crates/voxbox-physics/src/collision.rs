//! Rollback-on-collision against a voxel grid.
//!
//! A body is integrated freely; if the step ends inside a solid voxel the
//! step is undone and the body's physics velocity and force are cleared.
//! This is the whole collision contract. There is no contact solver.

use glam::{IVec3, Vec3};
use voxbox_voxel::GridTransform;

use crate::body::Kinematic;
use crate::voxel_raycast::VoxelAccess;

/// What happened during [`step_with_rollback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The body moved to a free cell.
    Moved,
    /// The step would have entered the given solid voxel and was undone.
    Collided(IVec3),
}

impl StepOutcome {
    pub fn collided(self) -> bool {
        matches!(self, StepOutcome::Collided(_))
    }
}

/// Integrates `entity` by `dt`, rolling back if it lands in a solid voxel.
///
/// Positions outside the grid count as free space.
pub fn step_with_rollback<K: Kinematic + ?Sized>(
    entity: &mut K,
    dt: f32,
    world: &dyn VoxelAccess,
    transform: &GridTransform,
) -> StepOutcome {
    let before = entity.position();
    entity.integrate(dt);

    let voxel = transform.world_to_voxel(entity.position());
    if world.is_solid_at(voxel) {
        entity.set_position(before);
        entity.reset_velocity();
        entity.reset_force();
        tracing::trace!(?voxel, "rolled back colliding step");
        StepOutcome::Collided(voxel)
    } else {
        StepOutcome::Moved
    }
}

/// Returns `true` if the voxel `depth` cells below `position` is solid.
pub fn is_supported(world: &dyn VoxelAccess, transform: &GridTransform, position: Vec3, depth: i32) -> bool {
    let voxel = transform.world_to_voxel(position);
    world.is_solid_at(voxel - IVec3::new(0, depth.max(1), 0))
}
