//! Dense, fixed-size 3D block storage.
//!
//! Cells live in one contiguous buffer indexed as `x + nx * (y + ny * z)`,
//! so X varies fastest, then Y, then Z. The grid is allocated once and never
//! resized.

use glam::IVec3;
use thiserror::Error;

use crate::block::Block;

/// Errors raised by grid construction and checked access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// One of the requested dimensions was zero.
    #[error("grid dimensions must be positive, got {nx}x{ny}x{nz}")]
    InvalidDimensions { nx: usize, ny: usize, nz: usize },
    /// A coordinate fell outside the grid.
    #[error("voxel ({x}, {y}, {z}) is outside a {nx}x{ny}x{nz} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        z: i64,
        nx: usize,
        ny: usize,
        nz: usize,
    },
}

/// A dense 3D array of [`Block`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    cells: Vec<Block>,
}

impl VoxelGrid {
    /// Allocates an Air-filled grid.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::InvalidDimensions { nx, ny, nz });
        }
        Ok(Self {
            nx,
            ny,
            nz,
            cells: vec![Block::Air; nx * ny * nz],
        })
    }

    /// Allocates a cubic Air-filled grid of side `n`.
    pub fn cube(n: usize) -> Result<Self, GridError> {
        Self::new(n, n, n)
    }

    /// Returns `(nx, ny, nz)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Returns the dimensions as a signed vector, convenient for ray and edit math.
    #[inline]
    pub fn dims_ivec(&self) -> IVec3 {
        IVec3::new(self.nx as i32, self.ny as i32, self.nz as i32)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of `(x, y, z)`.
    ///
    /// The coordinate must be inside the grid. This is checked in debug
    /// builds only; release callers are expected to pre-validate.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < self.nx && y < self.ny && z < self.nz,
            "voxel ({x}, {y}, {z}) out of range for {}x{}x{} grid",
            self.nx,
            self.ny,
            self.nz
        );
        x + self.nx * (y + self.ny * z)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        debug_assert!(index < self.cells.len());
        let x = index % self.nx;
        let yz = index / self.nx;
        (x, yz % self.ny, yz / self.ny)
    }

    /// Returns the block at `(x, y, z)`. Same precondition as [`index`](Self::index).
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        self.cells[self.index(x, y, z)]
    }

    /// Overwrites the block at `(x, y, z)`. Same precondition as [`index`](Self::index).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        let i = self.index(x, y, z);
        self.cells[i] = block;
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as usize) < self.nx
            && (pos.y as usize) < self.ny
            && (pos.z as usize) < self.nz
    }

    /// Bounds-checked read by signed coordinate.
    #[inline]
    pub fn get_at(&self, pos: IVec3) -> Option<Block> {
        if self.contains(pos) {
            Some(self.get(pos.x as usize, pos.y as usize, pos.z as usize))
        } else {
            None
        }
    }

    /// Bounds-checked read.
    pub fn try_get(&self, x: usize, y: usize, z: usize) -> Result<Block, GridError> {
        self.check(x, y, z)?;
        Ok(self.get(x, y, z))
    }

    /// Bounds-checked write.
    pub fn try_set(&mut self, x: usize, y: usize, z: usize, block: Block) -> Result<(), GridError> {
        self.check(x, y, z)?;
        self.set(x, y, z, block);
        Ok(())
    }

    fn check(&self, x: usize, y: usize, z: usize) -> Result<(), GridError> {
        if x < self.nx && y < self.ny && z < self.nz {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                z: z as i64,
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            })
        }
    }

    /// Sets every cell to `block`.
    pub fn fill(&mut self, block: Block) {
        self.cells.fill(block);
    }

    /// Copies every cell of `other` into `self` without reallocating.
    ///
    /// Both grids must have the same dimensions.
    pub fn copy_from(&mut self, other: &VoxelGrid) -> Result<(), GridError> {
        if self.dims() != other.dims() {
            let (nx, ny, nz) = other.dims();
            return Err(GridError::InvalidDimensions { nx, ny, nz });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    /// Raw cells in index order.
    #[inline]
    pub fn as_slice(&self) -> &[Block] {
        &self.cells
    }

    /// Mutable raw cells in index order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Block] {
        &mut self.cells
    }

    /// Number of cells in one Z layer (`nx * ny`).
    #[inline]
    pub fn slice_len(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of cells holding `block`.
    pub fn count(&self, block: Block) -> usize {
        self.cells.iter().filter(|&&b| b == block).count()
    }

    /// Number of non-Air cells.
    pub fn count_solid(&self) -> usize {
        self.cells.iter().filter(|b| b.is_solid()).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_new_grid_is_air() {
        let grid = VoxelGrid::new(4, 5, 6).unwrap();
        assert_eq!(grid.dims(), (4, 5, 6));
        assert_eq!(grid.len(), 120);
        assert_eq!(grid.count(Block::Air), 120);
        assert_eq!(grid.count_solid(), 0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            VoxelGrid::new(4, 0, 2),
            Err(GridError::InvalidDimensions { nx: 4, ny: 0, nz: 2 })
        );
    }

    #[test]
    fn test_index_formula_x_fastest() {
        let grid = VoxelGrid::new(3, 4, 5).unwrap();
        assert_eq!(grid.index(0, 0, 0), 0);
        assert_eq!(grid.index(1, 0, 0), 1);
        assert_eq!(grid.index(0, 1, 0), 3);
        assert_eq!(grid.index(0, 0, 1), 12);
        assert_eq!(grid.index(2, 3, 4), 2 + 3 * (3 + 4 * 4));
    }

    #[test]
    fn test_index_is_injective_and_invertible() {
        let grid = VoxelGrid::new(3, 4, 5).unwrap();
        let mut seen = HashSet::new();
        for z in 0..5 {
            for y in 0..4 {
                for x in 0..3 {
                    let i = grid.index(x, y, z);
                    assert!(seen.insert(i), "index {i} produced twice");
                    assert_eq!(grid.coords(i), (x, y, z));
                }
            }
        }
        assert_eq!(seen.len(), grid.len());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut grid = VoxelGrid::cube(8).unwrap();
        grid.set(1, 2, 3, Block::Stone);
        assert_eq!(grid.get(1, 2, 3), Block::Stone);
        assert_eq!(grid.get(3, 2, 1), Block::Air);
        assert_eq!(grid.as_slice()[grid.index(1, 2, 3)], Block::Stone);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_unchecked_access_panics_in_debug() {
        let grid = VoxelGrid::cube(4).unwrap();
        let _ = grid.get(4, 0, 0);
    }

    #[test]
    fn test_checked_access() {
        let mut grid = VoxelGrid::cube(4).unwrap();
        assert!(grid.try_set(3, 3, 3, Block::Wood).is_ok());
        assert_eq!(grid.try_get(3, 3, 3), Ok(Block::Wood));
        assert!(matches!(
            grid.try_get(0, 4, 0),
            Err(GridError::OutOfBounds { y: 4, .. })
        ));
        assert!(grid.try_set(9, 0, 0, Block::Wood).is_err());
    }

    #[test]
    fn test_get_at_signed() {
        let mut grid = VoxelGrid::cube(4).unwrap();
        grid.set(0, 0, 0, Block::Dirt);
        assert_eq!(grid.get_at(IVec3::ZERO), Some(Block::Dirt));
        assert_eq!(grid.get_at(IVec3::new(-1, 0, 0)), None);
        assert_eq!(grid.get_at(IVec3::new(0, 0, 4)), None);
    }

    #[test]
    fn test_copy_from_requires_same_dims() {
        let mut a = VoxelGrid::cube(4).unwrap();
        let mut b = VoxelGrid::cube(4).unwrap();
        b.fill(Block::Grass);
        a.copy_from(&b).unwrap();
        assert_eq!(a, b);

        let c = VoxelGrid::cube(5).unwrap();
        assert!(a.copy_from(&c).is_err());
    }
}
