//! Headless voxbox run: generates a world and drives a scripted player through it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p voxbox-demo -- --size 64 --frames 300`.

use std::f32::consts::TAU;

use clap::Parser;
use glam::Vec3;
use tracing::{info, warn};
use voxbox_config::{CliArgs, Config, GeneratorKind};
use voxbox_physics::Kinematic;
use voxbox_world::{
    EditAction, FrameInput, TerrainGenerator, TerrainParams, VoxelWorld, WorldError, WorldSettings,
};

/// Frames per lap of the scripted circle walk.
const LAP_FRAMES: u64 = 240;
const PLACE_EVERY: u64 = 30;
const REMOVE_EVERY: u64 = 90;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(Config::default_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    voxbox_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config, args.frames) {
        tracing::error!("voxbox run failed: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, frames: u64) -> Result<(), WorldError> {
    let [nx, ny, nz] = config.world.size.map(|n| n as usize);
    let settings = world_settings(config);
    let transform = settings.transform;
    let mut world = VoxelWorld::new(nx, ny, nz, settings)?;

    match config.world.generator {
        GeneratorKind::Terrain => world.generate_terrain(&TerrainGenerator::new(terrain_params(config)))?,
        GeneratorKind::Waves => world.generate_waves()?,
        GeneratorKind::Empty => {}
    }
    info!(
        generator = ?config.world.generator,
        solid = world.grid().count_solid(),
        "world generated"
    );

    let sprites = world.sprites();
    let atlas_tiles = config.render.sprite_dim * config.render.sprite_dim;
    if sprites.max_tile() >= atlas_tiles {
        warn!(
            max_tile = sprites.max_tile(),
            sprite_dim = config.render.sprite_dim,
            "sprite table addresses tiles outside the atlas"
        );
    }

    let move_speed = config.physics.move_speed * transform.scale;
    let interval = u64::from(config.debug.report_interval.max(1));
    let mut edited = 0;
    let mut liquid = 0;

    for frame in 1..=frames {
        let report = world.frame(&scripted_input(frame, move_speed))?;
        edited += report.edited_cells;
        liquid += report.liquid_changes;

        if frame % interval == 0 {
            info!(
                frame,
                faces = report.faces,
                edited,
                liquid,
                player = ?world.player_voxel(),
                pet = ?transform.world_to_voxel(world.pet().position()),
                "progress"
            );
        }
    }

    let mesh = world.mesh();
    info!(
        frames,
        version = world.version(),
        faces = mesh.face_count(),
        triangles = mesh.triangle_count(),
        vertex_bytes = mesh.vertex_bytes().len(),
        index_bytes = mesh.index_bytes().len(),
        "simulation finished"
    );
    Ok(())
}

fn world_settings(config: &Config) -> WorldSettings {
    let [nx, ny, nz] = config.world.size.map(|n| n as usize);
    let defaults = WorldSettings::for_dims(nx, ny, nz);
    let physics = &config.physics;
    WorldSettings {
        transform: defaults.transform,
        gravity: physics.gravity,
        spawn: physics.spawn.map(Vec3::from_array).unwrap_or(defaults.spawn),
        pet_spawn: physics.pet_spawn.map(Vec3::from_array).unwrap_or(defaults.pet_spawn),
        pet_scale: physics.pet_scale,
        remove_brush: config.edit.remove_brush,
        place_block: config.edit.place_block,
        paint_block: config.edit.paint_block,
        support_probe_depth: physics.support_probe_depth,
        respawn_below: physics.respawn_below,
        parallel_meshing: config.render.parallel_meshing,
    }
}

fn terrain_params(config: &Config) -> TerrainParams {
    let terrain = &config.world.terrain;
    TerrainParams {
        seed: config.world.seed,
        base_height: terrain.base_height,
        amplitude: terrain.amplitude,
        frequency: terrain.frequency,
        octaves: terrain.octaves,
        dirt_depth: terrain.dirt_depth as usize,
        water_level: terrain.water_level,
        ..TerrainParams::default()
    }
}

/// Walks a circle while looking ahead and slightly down, placing and removing blocks.
fn scripted_input(frame: u64, move_speed: f32) -> FrameInput {
    let angle = (frame % LAP_FRAMES) as f32 / LAP_FRAMES as f32 * TAU;
    let heading = Vec3::new(angle.cos(), 0.0, angle.sin());
    let action = if frame % REMOVE_EVERY == 0 {
        EditAction::Remove
    } else if frame % PLACE_EVERY == 0 {
        EditAction::Place
    } else {
        EditAction::None
    };
    FrameInput {
        move_velocity: heading * move_speed,
        look_direction: heading + Vec3::new(0.0, -0.5, 0.0),
        action,
        ..FrameInput::default()
    }
}
