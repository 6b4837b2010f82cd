//! Dense voxel storage: block types, the 3D block grid, world/grid mapping, and bulk edits.

pub mod block;
pub mod edit;
pub mod grid;
pub mod transform;

pub use block::Block;
pub use edit::{fill_box, fill_cells, fill_region};
pub use grid::{GridError, VoxelGrid};
pub use transform::GridTransform;
