//! Block types stored in every grid cell.
//!
//! `Air` is discriminant 0 so that a freshly allocated grid is empty space.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// The value held by one voxel.
///
/// Every variant other than [`Block::Air`] is solid for face culling and
/// collision. `Water` and `Lava` are liquid sources that flow during the
/// liquid update; the `*Partial` variants are settled liquid and never move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Block {
    #[default]
    Air = 0,
    Wood = 1,
    Pumpkin = 2,
    Lava = 3,
    LavaPartial = 4,
    Water = 5,
    WaterPartial = 6,
    Dirt = 7,
    Grass = 8,
    Stone = 9,
}

impl Block {
    /// All block types in discriminant order.
    pub const ALL: [Block; 10] = [
        Block::Air,
        Block::Wood,
        Block::Pumpkin,
        Block::Lava,
        Block::LavaPartial,
        Block::Water,
        Block::WaterPartial,
        Block::Dirt,
        Block::Grass,
        Block::Stone,
    ];

    /// Number of block types.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns `true` for the empty sentinel.
    #[inline]
    pub fn is_air(self) -> bool {
        self == Block::Air
    }

    /// Returns `true` for every non-Air block.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != Block::Air
    }

    /// Returns `true` for the flowing liquid sources.
    #[inline]
    pub fn is_liquid(self) -> bool {
        matches!(self, Block::Water | Block::Lava)
    }

    /// Dense index of this block, usable for per-type lookup tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a raw discriminant back into a block.
    pub fn from_u8(raw: u8) -> Option<Block> {
        Self::ALL.get(raw as usize).copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_zero_and_default() {
        assert_eq!(Block::Air as u8, 0);
        assert_eq!(Block::default(), Block::Air);
    }

    #[test]
    fn test_all_matches_discriminants() {
        for (i, block) in Block::ALL.iter().enumerate() {
            assert_eq!(block.index(), i, "{block:?} out of order in ALL");
            assert_eq!(Block::from_u8(i as u8), Some(*block));
        }
        assert_eq!(Block::from_u8(Block::COUNT as u8), None);
    }

    #[test]
    fn test_solidity() {
        assert!(Block::Air.is_air());
        assert!(!Block::Air.is_solid());
        for block in &Block::ALL[1..] {
            assert!(block.is_solid(), "{block:?} should be solid");
        }
    }

    #[test]
    fn test_only_sources_are_liquid() {
        assert!(Block::Water.is_liquid());
        assert!(Block::Lava.is_liquid());
        assert!(!Block::WaterPartial.is_liquid());
        assert!(!Block::LavaPartial.is_liquid());
        assert!(!Block::Air.is_liquid());
        assert!(!Block::Stone.is_liquid());
    }
}
