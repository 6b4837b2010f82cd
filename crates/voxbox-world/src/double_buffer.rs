//! Read/write grid pair for hazard-free batch updates.
//!
//! The read grid is the frame's source of truth. Updates borrow it immutably
//! while writing into the write grid, then [`GridBuffers::swap`] exchanges the
//! two handles. Both buffers are never borrowed mutably at the same time.

use voxbox_voxel::{GridError, VoxelGrid};

/// Two equally sized grids exchanged once per frame.
#[derive(Clone, Debug)]
pub struct GridBuffers {
    read: VoxelGrid,
    write: VoxelGrid,
}

impl GridBuffers {
    /// Creates both buffers as copies of `initial`.
    pub fn new(initial: VoxelGrid) -> Self {
        Self {
            write: initial.clone(),
            read: initial,
        }
    }

    /// The current source of truth.
    pub fn read(&self) -> &VoxelGrid {
        &self.read
    }

    /// The buffer being built for the next frame.
    pub fn write(&self) -> &VoxelGrid {
        &self.write
    }

    pub fn write_mut(&mut self) -> &mut VoxelGrid {
        &mut self.write
    }

    /// Borrows the read grid shared and the write grid exclusively.
    pub fn split(&mut self) -> (&VoxelGrid, &mut VoxelGrid) {
        (&self.read, &mut self.write)
    }

    /// Makes the write grid the new read grid.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.read, &mut self.write);
    }

    /// Overwrites the write grid with the read grid.
    pub fn sync_write(&mut self) {
        self.write.clone_from(&self.read);
    }

    /// Replaces the contents of both buffers, e.g. after terrain generation.
    pub fn replace_both(&mut self, grid: &VoxelGrid) -> Result<(), GridError> {
        self.read.copy_from(grid)?;
        self.write.copy_from(grid)
    }
}
