//! Configuration for voxbox.
//!
//! Settings persist to disk as `config.ron`, every section falls back to
//! defaults for missing fields, and command-line flags override loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, Config, DebugConfig, EditConfig, GeneratorKind, PhysicsConfig, RenderConfig,
    TerrainConfig, WorldConfig,
};
pub use error::ConfigError;
