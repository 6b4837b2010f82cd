//! World simulation: double-buffered grids, liquid flow, terrain generation, and the frame driver.

pub mod double_buffer;
pub mod liquid;
pub mod terrain;
pub mod world;


pub use double_buffer::GridBuffers;
pub use liquid::flow_step;
pub use terrain::{TerrainGenerator, TerrainParams, generate_waves};
pub use world::{EditAction, FrameInput, FrameReport, VoxelWorld, WorldError, WorldSettings};
