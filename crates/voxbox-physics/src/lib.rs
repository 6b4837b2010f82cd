//! Voxel-grid physics: block picking by ray traversal, point-mass integration, and rollback collision.

pub mod body;
pub mod collision;
pub mod voxel_raycast;

pub use body::{Kinematic, Pet, Player, RigidBody};
pub use collision::{StepOutcome, is_supported, step_with_rollback};
pub use voxel_raycast::{RayTraversal, TraversalEnd, VoxelAccess, cast_ray, cast_ray_with_path};
