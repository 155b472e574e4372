//! # Core Engine Module
//!
//! Shared configuration for the loop and the physics core.

pub mod config;

pub use config::{
    ApplicationConfig,
    EngineConfig,
    PhysicsConfig,
    Config,
    ConfigError,
    COLLISION_EPSILON,
    HORIZONTAL_DAMPING,
};
