//! Procedural initial worlds.
//!
//! Generators only write the interior of the grid; the one-cell outer shell
//! stays Air so every generated block can be meshed.

use noise::{NoiseFn, Perlin};
use rayon::prelude::*;
use voxbox_voxel::{Block, VoxelGrid};

/// Parameters for the layered heightfield generator.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    pub seed: u32,
    /// Mean surface height as a fraction of the grid height.
    pub base_height: f64,
    /// Peak deviation from `base_height`, also a fraction of the grid height.
    pub amplitude: f64,
    /// Frequency of the first octave in cycles per cell.
    pub frequency: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub persistence: f64,
    /// Number of Dirt cells between the Grass surface and Stone.
    pub dirt_depth: usize,
    /// Air cells at or below this height fraction are filled with Water.
    pub water_level: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            base_height: 0.4,
            amplitude: 0.2,
            frequency: 0.02,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            dirt_depth: 3,
            water_level: 0.3,
        }
    }
}

/// fBm Perlin heightfield with grass, dirt and stone layers and a water table.
pub struct TerrainGenerator {
    noise: Perlin,
    params: TerrainParams,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Self {
        Self {
            noise: Perlin::new(params.seed),
            params,
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Normalized fBm sample in roughly `[-1, 1]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut norm = 0.0;
        let mut frequency = self.params.frequency;
        let mut amplitude = 1.0;
        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            norm += amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        if norm > 0.0 { total / norm } else { 0.0 }
    }

    /// Surface height (topmost solid cell) of column `(x, z)` in a grid `ny` tall.
    ///
    /// Always within the interior, `1..=ny-2`.
    pub fn surface_height(&self, x: usize, z: usize, ny: usize) -> usize {
        let h = (self.params.base_height + self.params.amplitude * self.sample(x as f64, z as f64)) * ny as f64;
        let top = ny.saturating_sub(2).max(1);
        (h.round().max(1.0) as usize).min(top)
    }

    /// Fills `grid` with terrain. Existing contents are replaced.
    pub fn generate(&self, grid: &mut VoxelGrid) {
        let (nx, ny, nz) = grid.dims();
        grid.fill(Block::Air);
        if nx < 3 || ny < 3 || nz < 3 {
            return;
        }
        let water = ((self.params.water_level * ny as f64) as usize).min(ny - 2);
        let slice_len = grid.slice_len();
        let dirt_depth = self.params.dirt_depth;

        grid.as_mut_slice()
            .par_chunks_mut(slice_len)
            .enumerate()
            .filter(|(z, _)| *z >= 1 && *z < nz - 1)
            .for_each(|(z, slice)| {
                for x in 1..nx - 1 {
                    let surface = self.surface_height(x, z, ny);
                    for y in 1..ny - 1 {
                        let block = if y == surface {
                            if surface < water { Block::Dirt } else { Block::Grass }
                        } else if y < surface {
                            if y + dirt_depth >= surface { Block::Dirt } else { Block::Stone }
                        } else if y <= water {
                            Block::Water
                        } else {
                            Block::Air
                        };
                        slice[x + nx * y] = block;
                    }
                }
            });

        tracing::debug!(
            solid = grid.count_solid(),
            water = grid.count(Block::Water),
            "generated terrain"
        );
    }
}

/// Rolling cosine landscape of Wood: a cell is solid when
/// `cos(8πx/n) · sin(8πz/n) > 2y/n − 1`, with `n` the grid height.
pub fn generate_waves(grid: &mut VoxelGrid) {
    let (nx, ny, nz) = grid.dims();
    grid.fill(Block::Air);
    let n = ny as f32;
    let freq = std::f32::consts::PI * 8.0;
    for z in 1..nz.saturating_sub(1) {
        for y in 1..ny.saturating_sub(1) {
            for x in 1..nx.saturating_sub(1) {
                let wave = (x as f32 / n * freq).cos() * (z as f32 / n * freq).sin();
                if wave > y as f32 / n * 2.0 - 1.0 {
                    grid.set(x, y, z, Block::Wood);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_is_air(grid: &VoxelGrid) -> bool {
        let (nx, ny, nz) = grid.dims();
        (0..grid.len()).all(|i| {
            let (x, y, z) = grid.coords(i);
            let on_shell = x == 0 || y == 0 || z == 0 || x == nx - 1 || y == ny - 1 || z == nz - 1;
            !on_shell || grid.as_slice()[i] == Block::Air
        })
    }

    #[test]
    fn test_terrain_is_deterministic() {
        let generator = TerrainGenerator::new(TerrainParams { seed: 7, ..Default::default() });
        let mut a = VoxelGrid::cube(24).unwrap();
        let mut b = VoxelGrid::cube(24).unwrap();
        generator.generate(&mut a);
        generator.generate(&mut b);
        assert_eq!(a, b);
        assert!(a.count_solid() > 0);
    }

    #[test]
    fn test_terrain_leaves_shell_empty() {
        let generator = TerrainGenerator::new(TerrainParams::default());
        let mut grid = VoxelGrid::new(20, 16, 12).unwrap();
        generator.generate(&mut grid);
        assert!(shell_is_air(&grid));
    }

    #[test]
    fn test_terrain_layering() {
        let params = TerrainParams {
            amplitude: 0.0,
            base_height: 0.5,
            water_level: 0.0,
            dirt_depth: 2,
            ..Default::default()
        };
        let generator = TerrainGenerator::new(params);
        let mut grid = VoxelGrid::cube(20).unwrap();
        generator.generate(&mut grid);
        assert_eq!(grid.get(5, 10, 5), Block::Grass);
        assert_eq!(grid.get(5, 9, 5), Block::Dirt);
        assert_eq!(grid.get(5, 8, 5), Block::Dirt);
        assert_eq!(grid.get(5, 7, 5), Block::Stone);
        assert_eq!(grid.get(5, 11, 5), Block::Air);
    }

    #[test]
    fn test_water_fills_low_ground() {
        let params = TerrainParams {
            amplitude: 0.0,
            base_height: 0.2,
            water_level: 0.5,
            ..Default::default()
        };
        let generator = TerrainGenerator::new(params);
        let mut grid = VoxelGrid::cube(20).unwrap();
        generator.generate(&mut grid);
        assert_eq!(grid.get(5, 4, 5), Block::Dirt, "submerged surface is dirt");
        assert_eq!(grid.get(5, 5, 5), Block::Water);
        assert_eq!(grid.get(5, 10, 5), Block::Water);
        assert_eq!(grid.get(5, 11, 5), Block::Air);
    }

    #[test]
    fn test_surface_height_stays_interior() {
        let params = TerrainParams { amplitude: 5.0, ..Default::default() };
        let generator = TerrainGenerator::new(params);
        for x in 0..40 {
            let h = generator.surface_height(x, x * 3, 10);
            assert!((1..=8).contains(&h), "height {h} outside interior");
        }
    }

    #[test]
    fn test_waves_pattern() {
        let mut grid = VoxelGrid::cube(32).unwrap();
        generate_waves(&mut grid);
        assert!(grid.count(Block::Wood) > 0);
        assert_eq!(grid.count_solid(), grid.count(Block::Wood));
        assert!(shell_is_air(&grid));
        // Low cells are mostly solid, high cells mostly empty.
        assert_eq!(grid.get(4, 1, 4), Block::Wood);
        assert_eq!(grid.get(4, 30, 4), Block::Air);
    }
}
