//! The per-frame world driver.
//!
//! [`VoxelWorld::frame`] runs one frame in a fixed order: liquid step
//! (read → write), lazy remesh of the read grid, entity integration with
//! rollback against the read grid, block picking against the read grid,
//! edits into the write grid, then the buffer swap.

use glam::{IVec3, Vec3};
use thiserror::Error;
use voxbox_mesh::{GridMesh, MeshCache, SpriteTable};
use voxbox_physics::{
    Kinematic, Pet, Player, RayTraversal, StepOutcome, cast_ray, cast_ray_with_path, is_supported,
    step_with_rollback,
};
use voxbox_voxel::{Block, GridError, GridTransform, VoxelGrid, fill_box, fill_cells};

use crate::double_buffer::GridBuffers;
use crate::liquid::flow_step;
use crate::terrain::{TerrainGenerator, generate_waves};

/// Errors raised by the world driver.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Tunables fixed for the lifetime of a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSettings {
    pub transform: GridTransform,
    /// Downward acceleration in cells per second squared.
    pub gravity: f32,
    /// Player spawn point in grid coordinates (fractional cells).
    pub spawn: Vec3,
    /// Pet spawn point in grid coordinates.
    pub pet_spawn: Vec3,
    pub pet_scale: f32,
    /// Side of the cube cleared by [`EditAction::Remove`].
    pub remove_brush: i32,
    pub place_block: Block,
    pub paint_block: Block,
    /// How many cells below an entity are probed for ground.
    pub support_probe_depth: i32,
    /// Entities whose voxel Y drops below this are respawned.
    pub respawn_below: i32,
    pub parallel_meshing: bool,
}

impl WorldSettings {
    /// Defaults for a grid of the given size: unit-cube transform and spawn
    /// near the top center.
    pub fn for_dims(nx: usize, ny: usize, nz: usize) -> Self {
        let top = ny.saturating_sub(2) as f32;
        Self {
            transform: GridTransform::unit_cube(nx.max(ny).max(nz)),
            gravity: 9.81,
            spawn: Vec3::new(nx as f32 * 0.5, top, nz as f32 * 0.5),
            pet_spawn: Vec3::new(nx as f32 * 0.5 + 2.0, top, nz as f32 * 0.5),
            pet_scale: 0.5,
            remove_brush: 4,
            place_block: Block::Pumpkin,
            paint_block: Block::Wood,
            support_probe_depth: 1,
            respawn_below: 0,
            parallel_meshing: true,
        }
    }
}

/// Block edit requested for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditAction {
    #[default]
    None,
    /// Clear a cube of side `remove_brush` with its corner at the hit voxel.
    Remove,
    /// Place `place_block` in the empty voxel in front of the hit.
    Place,
    /// Fill every empty voxel the ray crossed with `paint_block`.
    PaintPath,
}

/// Per-frame input from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    /// Input-driven velocity in world units per second.
    pub move_velocity: Vec3,
    /// Direction to pick along; need not be normalized.
    pub look_direction: Vec3,
    pub action: EditAction,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            move_velocity: Vec3::ZERO,
            look_direction: Vec3::NEG_Z,
            action: EditAction::None,
        }
    }
}

/// What a frame did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub liquid_changes: usize,
    pub edited_cells: usize,
    pub remeshed: bool,
    pub faces: usize,
    pub player: StepOutcome,
    pub pet: StepOutcome,
    pub respawned: bool,
    pub ray: RayTraversal,
}

/// A double-buffered voxel world with a player and a pet.
pub struct VoxelWorld {
    buffers: GridBuffers,
    settings: WorldSettings,
    sprites: SpriteTable,
    mesh: MeshCache,
    player: Player,
    pet: Pet,
    /// Bumped every time the read grid changes.
    version: u64,
    frame: u64,
    path: Vec<IVec3>,
}

impl VoxelWorld {
    /// Creates an empty world of the given size.
    pub fn new(nx: usize, ny: usize, nz: usize, settings: WorldSettings) -> Result<Self, WorldError> {
        let grid = VoxelGrid::new(nx, ny, nz)?;
        let player = Player::at(settings.transform.grid_to_world(settings.spawn));
        let pet = Pet::at(settings.transform.grid_to_world(settings.pet_spawn), settings.pet_scale);
        let mesh = if settings.parallel_meshing {
            MeshCache::parallel()
        } else {
            MeshCache::new()
        };
        tracing::info!(nx, ny, nz, "created voxel world");
        Ok(Self {
            buffers: GridBuffers::new(grid),
            settings,
            sprites: SpriteTable::DEFAULT,
            mesh,
            player,
            pet,
            version: 0,
            frame: 0,
            path: Vec::new(),
        })
    }

    /// Replaces both grid buffers with `grid`.
    pub fn load(&mut self, grid: &VoxelGrid) -> Result<(), WorldError> {
        self.buffers.replace_both(grid)?;
        self.version += 1;
        Ok(())
    }

    /// Regenerates the world from a terrain generator.
    pub fn generate_terrain(&mut self, generator: &TerrainGenerator) -> Result<(), WorldError> {
        let mut grid = self.buffers.read().clone();
        generator.generate(&mut grid);
        self.load(&grid)
    }

    /// Regenerates the world as the cosine wave landscape.
    pub fn generate_waves(&mut self) -> Result<(), WorldError> {
        let mut grid = self.buffers.read().clone();
        generate_waves(&mut grid);
        self.load(&grid)
    }

    pub fn grid(&self) -> &VoxelGrid {
        self.buffers.read()
    }

    pub fn mesh(&self) -> &GridMesh {
        self.mesh.mesh()
    }

    pub fn sprites(&self) -> &SpriteTable {
        &self.sprites
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn pet_mut(&mut self) -> &mut Pet {
        &mut self.pet
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Voxel containing the player.
    pub fn player_voxel(&self) -> IVec3 {
        self.settings.transform.world_to_voxel(self.player.position())
    }

    /// Cells of the most recent painted ray path.
    pub fn last_path(&self) -> &[IVec3] {
        &self.path
    }

    /// Runs one frame.
    pub fn frame(&mut self, input: &FrameInput) -> Result<FrameReport, WorldError> {
        let (read, write) = self.buffers.split();
        let liquid_changes = flow_step(read, write)?;

        let remeshed = self
            .mesh
            .rebuild_if_stale(self.buffers.read(), &self.sprites, self.version);

        let (player, pet, respawned) = self.step_entities(input);

        let origin = self.player_voxel();
        let ray = match input.action {
            EditAction::PaintPath => {
                cast_ray_with_path(self.buffers.read(), origin, input.look_direction, &mut self.path)
            }
            _ => cast_ray(self.buffers.read(), origin, input.look_direction),
        };

        let edited_cells = self.apply_edit(input.action, &ray, origin);

        self.buffers.swap();
        if liquid_changes > 0 || edited_cells > 0 {
            self.version += 1;
        }
        self.frame += 1;

        let report = FrameReport {
            frame: self.frame,
            liquid_changes,
            edited_cells,
            remeshed,
            faces: self.mesh.mesh().face_count(),
            player,
            pet,
            respawned,
            ray,
        };
        tracing::trace!(?report, "frame complete");
        Ok(report)
    }

    fn step_entities(&mut self, input: &FrameInput) -> (StepOutcome, StepOutcome, bool) {
        let grid = self.buffers.read();
        let transform = &self.settings.transform;
        let gravity = Vec3::new(0.0, -self.settings.gravity * transform.scale, 0.0);
        let depth = self.settings.support_probe_depth;

        self.player.set_move_velocity(input.move_velocity);
        for entity in [&mut self.player as &mut dyn Kinematic, &mut self.pet] {
            if is_supported(grid, transform, entity.position(), depth) {
                entity.reset_force();
            } else {
                entity.set_force(gravity);
            }
        }
        let player = step_with_rollback(&mut self.player, input.dt, grid, transform);
        let pet = step_with_rollback(&mut self.pet, input.dt, grid, transform);

        let mut respawned = false;
        if transform.world_to_voxel(self.player.position()).y < self.settings.respawn_below {
            self.player.set_position(transform.grid_to_world(self.settings.spawn));
            self.player.reset_velocity();
            self.player.reset_force();
            respawned = true;
            tracing::debug!("player fell out of the world, respawned");
        }
        if transform.world_to_voxel(self.pet.position()).y < self.settings.respawn_below {
            self.pet.set_position(transform.grid_to_world(self.settings.pet_spawn));
            self.pet.reset_velocity();
            self.pet.reset_force();
        }
        (player, pet, respawned)
    }

    fn apply_edit(&mut self, action: EditAction, ray: &RayTraversal, origin: IVec3) -> usize {
        let write = self.buffers.write_mut();
        match action {
            EditAction::None => 0,
            EditAction::Remove => match ray.hit_voxel() {
                Some(hit) => fill_box(write, hit, self.settings.remove_brush, Block::Air),
                None => {
                    tracing::debug!(voxel = ?ray.voxel, "remove ignored, ray left the grid");
                    0
                }
            },
            EditAction::Place => {
                if !ray.is_hit() {
                    tracing::debug!("place ignored, nothing under the cursor");
                    0
                } else if ray.previous == origin {
                    tracing::debug!(voxel = ?origin, "place ignored, target is the player's cell");
                    0
                } else {
                    fill_box(write, ray.previous, 1, self.settings.place_block)
                }
            }
            EditAction::PaintPath => {
                let cells = self.path.get(1..).unwrap_or(&[]);
                fill_cells(write, cells, self.settings.paint_block)
            }
        }
    }
}
