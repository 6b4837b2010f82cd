//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::GeneratorKind;

/// voxbox command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "voxbox", about = "Headless voxel sandbox simulation")]
pub struct CliArgs {
    /// Cubic world size in cells (sets all three dimensions).
    #[arg(long)]
    pub size: Option<u32>,

    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Generate the cosine wave landscape instead of noise terrain.
    #[arg(long)]
    pub waves: bool,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config, then clamp the result again.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(n) = args.size {
            self.world.size = [n, n, n];
        }
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if args.waves {
            self.world.generator = GeneratorKind::Waves;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        *self = std::mem::take(self).sanitized();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            size: Some(48),
            seed: Some(3),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.size, [48, 48, 48]);
        assert_eq!(config.world.seed, 3);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.world.generator, GeneratorKind::Terrain);
        assert_eq!(config.edit.remove_brush, 4);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_tiny_size_override_is_clamped() {
        for size in [0, 1, 2] {
            let mut config = Config::default();
            let args = CliArgs::parse_from(["voxbox", "--size", size.to_string().as_str()]);
            config.apply_cli_overrides(&args);
            assert_eq!(config.world.size, [3, 3, 3], "--size {size}");
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["voxbox", "--size", "32", "--waves", "--frames", "10"]);
        assert_eq!(args.size, Some(32));
        assert!(args.waves);
        assert_eq!(args.frames, 10);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_frames_default() {
        let args = CliArgs::parse_from(["voxbox"]);
        assert_eq!(args.frames, 600);
    }
}
