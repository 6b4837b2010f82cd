//! Block-face to atlas tile mapping.
//!
//! The atlas is a square sheet of `sprite_dim × sprite_dim` tiles addressed
//! row-major by tile id. The table is immutable; the mesher borrows it and the
//! atlas owner reads it to lay out its texture consistently.

use glam::Vec2;
use voxbox_voxel::Block;

use crate::face_direction::FaceDirection;

/// Default atlas width and height in tiles.
pub const DEFAULT_SPRITE_DIM: u32 = 32;

/// `(block, face) → tile id` lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteTable {
    tiles: [[u32; 6]; Block::COUNT],
}

const fn uniform(id: u32) -> [u32; 6] {
    [id; 6]
}

impl SpriteTable {
    /// Tile ids for the stock atlas. Faces are Left, Right, Bottom, Top, Back, Front.
    pub const DEFAULT: SpriteTable = SpriteTable {
        tiles: [
            uniform(0),                      // Air (never meshed)
            uniform(16),                     // Wood
            [17, 17, 113, 113, 17, 464],     // Pumpkin
            uniform(602),                    // Lava, the atlas's lava tile
            uniform(602),                    // LavaPartial
            uniform(205),                    // Water
            uniform(205),                    // WaterPartial
            uniform(2),                      // Dirt
            [3, 3, 2, 0, 3, 3],              // Grass
            uniform(1),                      // Stone
        ],
    };

    /// Builds a table from explicit per-block rows, indexed by [`Block::index`].
    pub const fn from_tiles(tiles: [[u32; 6]; Block::COUNT]) -> Self {
        Self { tiles }
    }

    /// Tile id for one face of a block.
    #[inline]
    pub fn get(&self, block: Block, face: FaceDirection) -> u32 {
        self.tiles[block.index()][face.index()]
    }

    /// All six face tiles of a block.
    pub fn faces(&self, block: Block) -> [u32; 6] {
        self.tiles[block.index()]
    }

    /// Largest tile id referenced, used to validate an atlas against the table.
    pub fn max_tile(&self) -> u32 {
        self.tiles.iter().flatten().copied().max().unwrap_or(0)
    }

    /// UV rectangle `(min, max)` of a tile in a `sprite_dim`-wide atlas.
    pub fn tile_uv_rect(tile: u32, sprite_dim: u32) -> (Vec2, Vec2) {
        let dim = sprite_dim.max(1);
        let col = tile % dim;
        let row = tile / dim;
        let size = 1.0 / dim as f32;
        let min = Vec2::new(col as f32 * size, row as f32 * size);
        (min, min + Vec2::splat(size))
    }

    /// Maps a face-local UV in `[0, 1]²` into atlas space.
    ///
    /// Local V runs upward while atlas rows run downward, so V is flipped.
    pub fn atlas_uv(tile: u32, sprite_dim: u32, local: [f32; 2]) -> Vec2 {
        let (min, max) = Self::tile_uv_rect(tile, sprite_dim);
        Vec2::new(
            min.x + local[0] * (max.x - min.x),
            max.y - local[1] * (max.y - min.y),
        )
    }
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
