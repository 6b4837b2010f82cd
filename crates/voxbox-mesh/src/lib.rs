//! Face-culled meshing of voxel grids: face directions, sprite lookup, mesh buffers, and lazy rebuilds.

pub mod face_direction;
pub mod grid_mesh;
pub mod invalidation;
pub mod sprite;
pub mod voxelize;

pub use face_direction::FaceDirection;
pub use grid_mesh::{GridMesh, MeshVertex, QUAD_INDICES};
pub use invalidation::MeshCache;
pub use sprite::{DEFAULT_SPRITE_DIM, SpriteTable};
pub use voxelize::{voxelize, voxelize_parallel};
