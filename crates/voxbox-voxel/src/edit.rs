//! Bulk block edits: cubes, cuboids and cell lists.
//!
//! All edits clamp silently to the grid. Nothing outside the grid is touched
//! and no error is reported for boxes that stick out.

use glam::IVec3;

use crate::block::Block;
use crate::grid::VoxelGrid;

/// Fills the cube `[origin, origin + side)` with `block`.
///
/// Returns the number of cells written after clamping.
pub fn fill_box(grid: &mut VoxelGrid, origin: IVec3, side: i32, block: Block) -> usize {
    fill_region(grid, origin, origin + IVec3::splat(side), block)
}

/// Fills the cuboid `[min, max)` with `block`, clamped to the grid.
///
/// Returns the number of cells written.
pub fn fill_region(grid: &mut VoxelGrid, min: IVec3, max: IVec3, block: Block) -> usize {
    let lo = min.max(IVec3::ZERO);
    let hi = max.min(grid.dims_ivec());
    if lo.cmpge(hi).any() {
        return 0;
    }

    let (lo, hi) = (lo.as_uvec3(), hi.as_uvec3());
    for z in lo.z..hi.z {
        for y in lo.y..hi.y {
            let row = grid.index(lo.x as usize, y as usize, z as usize);
            let width = (hi.x - lo.x) as usize;
            grid.as_mut_slice()[row..row + width].fill(block);
        }
    }
    let extent = hi - lo;
    (extent.x * extent.y * extent.z) as usize
}

/// Sets each in-range cell of `cells` to `block`, skipping the rest.
///
/// Returns the number of cells written. Duplicates are counted each time.
pub fn fill_cells(grid: &mut VoxelGrid, cells: &[IVec3], block: Block) -> usize {
    let mut written = 0;
    for &cell in cells {
        if grid.contains(cell) {
            grid.set(cell.x as usize, cell.y as usize, cell.z as usize, block);
            written += 1;
        }
    }
    if written < cells.len() {
        tracing::trace!(skipped = cells.len() - written, "fill_cells skipped out-of-range cells");
    }
    written
}
