//! # Tile Engine
//!
//! Fixed-timestep physics and tilemap collision for 2D tile platformers.
//!
//! ## Features
//!
//! - **Fixed-Step Loop**: simulation decoupled from frame rate
//! - **Tilemap Collision**: per-axis probe and push-out against solid tiles
//! - **Sprite Animation**: sprite-sheet frame cursors
//! - **Particles**: recycled point-particle pools
//! - **Levels**: tile layers, spawns and camera bounds loaded from RON/TOML
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tile_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn fixed_update(&mut self, engine: &mut Engine, dt: f32) -> Result<(), AppError> {
//!         // Advance game state by one fixed step
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {
//!         // Cleanup resources
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(600);
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app, &mut SystemClock::new())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod config;
pub mod core;
pub mod foundation;

// Simulation
pub mod animation;
pub mod entity;
pub mod events;
pub mod level;
pub mod particles;
pub mod physics;
pub mod tilemap;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use crate::core::config::EngineConfig;
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        animation::{SheetSprite, SpriteSheetAnimator},
        config::{Config, ConfigError},
        core::config::{ApplicationConfig, PhysicsConfig},
        entity::{CollisionFlags, Entity, EntityKind},
        events::{EventHandler, EventQueue, EventType, GameEvent},
        foundation::{
            math::{Vec2, Vec4},
            time::{Clock, FixedTimestep, ManualClock, SystemClock, Timer, FIXED_TIMESTEP},
        },
        level::{EntityId, LevelContext, LevelData, LevelError},
        particles::{Particle, ParticleEmitter},
        physics::{Aabb, PhysicsSystem, TilemapResolver},
        tilemap::{LayerKind, TileGrid, TileMap, TileVertex, TILE_SIZE},
    };
}
