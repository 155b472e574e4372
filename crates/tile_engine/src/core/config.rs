//! # Unified Configuration System
//!
//! Concrete configuration structures for the engine loop and the physics
//! core, grouped under [`ApplicationConfig`].
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging, fixed timestep, frame step limits
//! - **Physics Config**: tile size, solid tile set, resolver epsilon, damping

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::time::FIXED_TIMESTEP;
use crate::tilemap::{DEFAULT_SOLID_TILES, SPRITE_COUNT_X, SPRITE_COUNT_Y, TILE_SIZE};

/// Distance an entity is pushed beyond a tile boundary after a collision
pub const COLLISION_EPSILON: f32 = 0.001;

/// Horizontal damping rate; the per-step blend factor is `rate * dt`
pub const HORIZONTAL_DAMPING: f32 = 2.0;

/// # Engine Configuration
///
/// Core loop behavior: logging and simulation pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Simulation quantum in seconds
    pub fixed_timestep: f32,
    /// Upper bound on simulation steps run for one rendered frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps_per_frame: Option<usize>,
    /// Stop the loop after this many rendered frames (headless runs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: FIXED_TIMESTEP,
            max_steps_per_frame: Some(8),
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the simulation quantum
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = step;
        self
    }

    /// Set or clear the per-frame step limit
    pub fn with_max_steps_per_frame(mut self, steps: Option<usize>) -> Self {
        self.max_steps_per_frame = steps;
        self
    }

    /// Stop after a fixed number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.max_steps_per_frame == Some(0) {
            return Err(ConfigError::Invalid("max_steps_per_frame must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Physics Configuration
///
/// Tile grid geometry and resolver tuning shared by every level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Edge length of one tile in world units
    pub tile_size: f32,
    /// Level-file tile values that block movement
    pub solid_tiles: Vec<u32>,
    /// Push-out distance past a tile boundary
    pub collision_epsilon: f32,
    /// Horizontal damping rate
    pub horizontal_damping: f32,
}

impl PhysicsConfig {
    /// Create a physics configuration with the stock values
    pub fn new() -> Self {
        Self {
            tile_size: TILE_SIZE,
            solid_tiles: DEFAULT_SOLID_TILES.to_vec(),
            collision_epsilon: COLLISION_EPSILON,
            horizontal_damping: HORIZONTAL_DAMPING,
        }
    }

    /// Replace the solid tile set
    pub fn with_solid_tiles(mut self, tiles: impl Into<Vec<u32>>) -> Self {
        self.solid_tiles = tiles.into();
        self
    }

    /// Set the tile size
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size > 0.0 && self.tile_size.is_finite()) {
            return Err(ConfigError::Invalid(format!("tile_size must be positive, got {}", self.tile_size)));
        }
        if self.collision_epsilon < 0.0 {
            return Err(ConfigError::Invalid("collision_epsilon cannot be negative".to_string()));
        }
        let cells = SPRITE_COUNT_X * SPRITE_COUNT_Y;
        if let Some(tile) = self.solid_tiles.iter().find(|tile| **tile == 0 || **tile > cells) {
            return Err(ConfigError::Invalid(format!("solid tile {} is not a tile of the {} cell spritesheet", tile, cells)));
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Physics configuration
    pub physics: PhysicsConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.physics.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}
