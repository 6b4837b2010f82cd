//! One synchronous step of the water/lava cellular automaton.
//!
//! Every write cell is a pure function of its neighborhood in the frozen read
//! grid, so Z slices are computed in parallel and the outcome never depends
//! on scan order.
//!
//! Rules, for a liquid source `L` (`Water` or `Lava`):
//! - a source with Air directly below falls: the cell below becomes `L` and
//!   the source cell becomes Air, unless more liquid is flowing into it;
//! - an Air cell becomes `L` when the cell above holds `L`;
//! - an Air cell becomes `L` when one of its four horizontal neighbors holds
//!   `L` and either the Air cell rests on a non-Air cell or the neighbor
//!   rests on ground (a non-Air, non-source block). The second case lets
//!   liquid spill over a ledge and fall on the next step;
//! - if both liquids reach the same cell, Lava wins.

use rayon::prelude::*;
use voxbox_voxel::{Block, GridError, VoxelGrid};

/// Computes the next liquid state of `read` into `write`.
///
/// `write` is overwritten entirely, so it need not be synced beforehand.
/// Returns the number of cells that differ from `read`.
pub fn flow_step(read: &VoxelGrid, write: &mut VoxelGrid) -> Result<usize, GridError> {
    if read.dims() != write.dims() {
        let (nx, ny, nz) = write.dims();
        return Err(GridError::InvalidDimensions { nx, ny, nz });
    }
    let (nx, ny, _) = read.dims();
    let slice_len = read.slice_len();

    let changed: usize = write
        .as_mut_slice()
        .par_chunks_mut(slice_len)
        .enumerate()
        .map(|(z, out)| {
            let mut changed = 0;
            for y in 0..ny {
                for x in 0..nx {
                    let next = next_cell(read, x, y, z);
                    if next != read.get(x, y, z) {
                        changed += 1;
                    }
                    out[x + nx * y] = next;
                }
            }
            changed
        })
        .sum();

    tracing::trace!(changed, "liquid step");
    Ok(changed)
}

fn next_cell(read: &VoxelGrid, x: usize, y: usize, z: usize) -> Block {
    let current = read.get(x, y, z);
    if current.is_liquid() {
        if y > 0 && read.get(x, y - 1, z).is_air() {
            return inflow(read, x, y, z);
        }
        return current;
    }
    if current.is_air() {
        return inflow(read, x, y, z);
    }
    current
}

fn from_above(read: &VoxelGrid, x: usize, y: usize, z: usize) -> Option<Block> {
    let (_, ny, _) = read.dims();
    if y + 1 < ny {
        Some(read.get(x, y + 1, z)).filter(|b| b.is_liquid())
    } else {
        None
    }
}

fn inflow(read: &VoxelGrid, x: usize, y: usize, z: usize) -> Block {
    let mut incoming = from_above(read, x, y, z);
    if y == 0 {
        return incoming.unwrap_or(Block::Air);
    }

    let supported = read.get(x, y - 1, z).is_solid();
    let (nx, _, nz) = read.dims();
    let lateral = [
        (x.checked_sub(1), Some(z)),
        ((x + 1 < nx).then_some(x + 1), Some(z)),
        (Some(x), z.checked_sub(1)),
        (Some(x), (z + 1 < nz).then_some(z + 1)),
    ];
    for (sx, sz) in lateral {
        if let (Some(sx), Some(sz)) = (sx, sz) {
            let source = read.get(sx, y, sz);
            if source.is_liquid() && (supported || is_ground(read.get(sx, y - 1, sz))) {
                incoming = Some(stronger(incoming, source));
            }
        }
    }

    incoming.unwrap_or(Block::Air)
}

/// Non-Air blocks that are not flowing sources.
fn is_ground(block: Block) -> bool {
    block.is_solid() && !block.is_liquid()
}

fn stronger(current: Option<Block>, candidate: Block) -> Block {
    match current {
        Some(Block::Lava) => Block::Lava,
        _ if candidate == Block::Lava => Block::Lava,
        Some(existing) => existing,
        None => candidate,
    }
}
