//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxbox_voxel::Block;

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub edit: EditConfig,
    pub render: RenderConfig,
    pub debug: DebugConfig,
}

/// Which generator populates a new world.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Layered noise heightfield with water.
    #[default]
    Terrain,
    /// Cosine wave landscape of wood.
    Waves,
    /// Leave the world empty.
    Empty,
}

/// World size and generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid dimensions `[nx, ny, nz]`.
    pub size: [u32; 3],
    pub seed: u32,
    pub generator: GeneratorKind,
    pub terrain: TerrainConfig,
}

/// Noise heightfield parameters. Heights are fractions of the grid height.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    pub base_height: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub octaves: u32,
    pub dirt_depth: u32,
    pub water_level: f64,
}

/// Entity motion. Speeds and accelerations are in cells per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Walking speed.
    pub move_speed: f32,
    /// Player spawn in grid coordinates; `None` spawns near the top center.
    pub spawn: Option<[f32; 3]>,
    pub pet_spawn: Option<[f32; 3]>,
    pub pet_scale: f32,
    /// Cells below an entity probed for ground.
    pub support_probe_depth: i32,
    /// Entities below this voxel height respawn.
    pub respawn_below: i32,
}

/// Block editing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditConfig {
    /// Side of the cube cleared by a remove.
    pub remove_brush: i32,
    pub place_block: Block,
    pub paint_block: Block,
}

/// Meshing and atlas layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Atlas width and height in tiles.
    pub sprite_dim: u32,
    pub parallel_meshing: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Frames between progress reports in the demo.
    pub report_interval: u32,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: [100, 100, 100],
            seed: 0,
            generator: GeneratorKind::Terrain,
            terrain: TerrainConfig::default(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_height: 0.4,
            amplitude: 0.2,
            frequency: 0.02,
            octaves: 4,
            dirt_depth: 3,
            water_level: 0.3,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            move_speed: 12.0,
            spawn: None,
            pet_spawn: None,
            pet_scale: 0.5,
            support_probe_depth: 1,
            respawn_below: 0,
        }
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            remove_brush: 4,
            place_block: Block::Pumpkin,
            paint_block: Block::Wood,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sprite_dim: 32,
            parallel_meshing: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 60,
        }
    }
}

// --- Load / Save / Reload ---

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.sanitized())
}

impl Config {
    /// Platform config directory for voxbox, or the working directory if unknown.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("voxbox"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Returns `Some(new_config)` if the file on disk differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read_config(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Clamps values the engine cannot run with, warning about each one.
    pub fn sanitized(mut self) -> Self {
        for (axis, n) in self.world.size.iter_mut().enumerate() {
            if *n < 3 {
                log::warn!("world.size[{axis}] = {n} leaves no interior, using 3");
                *n = 3;
            }
        }
        if self.edit.remove_brush < 1 {
            log::warn!("edit.remove_brush = {} is not positive, using 1", self.edit.remove_brush);
            self.edit.remove_brush = 1;
        }
        if self.render.sprite_dim == 0 {
            log::warn!("render.sprite_dim = 0, using 32");
            self.render.sprite_dim = 32;
        }
        if self.debug.report_interval == 0 {
            self.debug.report_interval = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("remove_brush: 4"));
        assert!(ron_str.contains("place_block: Pumpkin"));
        assert!(ron_str.contains("sprite_dim: 32"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.physics.spawn = Some([1.0, 2.0, 3.0]);
        config.world.generator = GeneratorKind::Waves;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(world: (seed: 9), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.seed, 9);
        assert_eq!(config.world.size, [100, 100, 100]);
        assert_eq!(config.edit, EditConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_block_names_parse() {
        let config: Config = ron::from_str("(edit: (place_block: Stone, paint_block: Water))").unwrap();
        assert_eq!(config.edit.place_block, Block::Stone);
        assert_eq!(config.edit.paint_block, Block::Water);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.size = [64, 32, 64];
        config.edit.remove_brush = 2;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.seed = 42;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.world.seed), Some(42));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_reload_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains(CONFIG_FILE), "{err}");
    }

    #[test]
    fn test_sanitized_clamps_bad_values() {
        let mut config = Config::default();
        config.world.size = [0, 2, 50];
        config.edit.remove_brush = -3;
        config.render.sprite_dim = 0;
        let config = config.sanitized();
        assert_eq!(config.world.size, [3, 3, 50]);
        assert_eq!(config.edit.remove_brush, 1);
        assert_eq!(config.render.sprite_dim, 32);
    }
}
