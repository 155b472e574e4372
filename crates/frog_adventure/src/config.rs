//! Game configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tile_engine::config::{Config, ConfigError};
use tile_engine::core::config::PhysicsConfig;
use tile_engine::EngineConfig;

use crate::game::Stage;

/// Level file for each stage, relative to `directory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelPaths {
    /// Folder holding the level files
    pub directory: PathBuf,
    /// First stage
    pub outdoors: String,
    /// Second stage
    pub store: String,
    /// Final stage
    pub exit: String,
}

impl LevelPaths {
    /// Full path of a stage's level file
    pub fn path_for(&self, stage: Stage) -> PathBuf {
        let file = match stage {
            Stage::Outdoors => &self.outdoors,
            Stage::Store => &self.store,
            Stage::Exit => &self.exit,
        };
        self.directory.join(file)
    }
}

impl Default for LevelPaths {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/levels")),
            outdoors: "outdoors.ron".to_string(),
            store: "store.ron".to_string(),
            exit: "exit.ron".to_string(),
        }
    }
}

/// Player and actor tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Horizontal acceleration while a direction is held
    pub walk_acceleration: f32,
    /// Upward speed given by a jump
    pub jump_speed: f32,
    /// Player gravity while airborne
    pub player_gravity: f32,
    /// Key gravity while airborne
    pub key_gravity: f32,
    /// Horizontal distance from its home at which the enemy gives chase
    pub enemy_aggro_range: f32,
    /// Enemy speed while chasing
    pub enemy_chase_speed: f32,
    /// Enemy speed while returning home
    pub enemy_return_speed: f32,
    /// Distance from home the enemy may drift before returning
    pub enemy_home_slack: f32,
    /// Largest per-step random displacement of the enemy
    pub enemy_jitter: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            walk_acceleration: 1.5,
            jump_speed: 2.0,
            player_gravity: 2.0,
            key_gravity: 0.7,
            enemy_aggro_range: 1.0,
            enemy_chase_speed: 0.25,
            enemy_return_speed: 1.0,
            enemy_home_slack: 0.2,
            enemy_jitter: 0.01,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine loop settings
    pub engine: EngineConfig,
    /// Tile and resolver settings
    pub physics: PhysicsConfig,
    /// Actor tuning
    pub gameplay: GameplayConfig,
    /// Level files
    pub levels: LevelPaths,
    /// Advance particle emitters every step, even while they are not drawn
    pub always_update_particles: bool,
    /// Seed for enemy and particle randomness; entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    /// Scripted input for headless runs; a built-in demo when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_script: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            physics: PhysicsConfig::default(),
            gameplay: GameplayConfig::default(),
            levels: LevelPaths::default(),
            always_update_particles: true,
            rng_seed: None,
            input_script: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from file or return default if file doesn't exist
    pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.physics.validate()?;
        if self.gameplay.enemy_jitter < 0.0 {
            return Err(ConfigError::Invalid("enemy_jitter cannot be negative".to_string()));
        }
        Ok(())
    }
}

impl Config for GameConfig {}
