//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::level::LevelError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a game with the engine's fixed-step loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame.
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Sample input
    ///
    /// Called once per rendered frame, before any simulation step of that
    /// frame.
    fn handle_input(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Advance the simulation by one fixed step
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `dt` - The fixed timestep in seconds
    fn fixed_update(&mut self, engine: &mut Engine, dt: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called once per frame after the simulation steps. `alpha` is the
    /// fraction of a step left unsimulated.
    fn render(&mut self, _engine: &mut Engine, _alpha: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called when the loop exits, including after an error.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Level loading error
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
