//! Core engine implementation

use crate::{
    application::Application,
    config::ConfigError,
    core::config::EngineConfig,
    foundation::{
        logging,
        time::{Clock, FixedTimestep, Timer},
    },
};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns frame timing and the fixed-step accumulator and runs the
/// main loop: sample input, simulate whole steps, render.
pub struct Engine {
    /// Frame timing
    timer: Timer,

    /// Simulation accumulator
    stepper: FixedTimestep,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        logging::init_with_level(&config.log_level);
        log::info!("Initializing engine (fixed step {:.5}s)", config.fixed_timestep);

        let mut stepper = FixedTimestep::new(config.fixed_timestep);
        if let Some(max_steps) = config.max_steps_per_frame {
            stepper = stepper.with_max_steps(max_steps);
        }

        Ok(Self {
            timer: Timer::new(),
            stepper,
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// The loop ends when the application calls [`Engine::quit`] or when the
    /// configured frame limit is reached. The quit flag is checked once per
    /// frame, so a quit requested mid-frame still lets that frame finish.
    pub fn run<A: Application, C: Clock>(config: EngineConfig, app: &mut A, clock: &mut C) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        // Initialize application
        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        let result = engine.main_loop(app, clock);

        // Cleanup
        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames, {} steps",
            engine.frame_count(),
            engine.total_steps()
        );
        result
    }

    fn main_loop<A: Application, C: Clock>(&mut self, app: &mut A, clock: &mut C) -> Result<(), EngineError> {
        while self.running {
            self.frame(app, clock.now())?;

            if self.config.max_frames.is_some_and(|max| self.frame_count() >= max) {
                log::debug!("Frame limit reached");
                self.running = false;
            }
        }
        Ok(())
    }

    /// Run one frame at clock time `now`; returns the steps simulated
    pub fn frame<A: Application>(&mut self, app: &mut A, now: f64) -> Result<usize, EngineError> {
        let elapsed = self.timer.tick(now);

        app.handle_input(self)
            .map_err(|e| EngineError::ApplicationError(format!("App input: {}", e)))?;

        let steps = self.stepper.advance(elapsed);
        let dt = self.stepper.step();
        for _ in 0..steps {
            app.fixed_update(self, dt)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
        }

        let alpha = self.stepper.alpha();
        app.render(self, alpha)
            .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;

        log::trace!("Frame {}: {:.4}s elapsed, {} steps", self.timer.frame_count(), elapsed, steps);
        Ok(steps)
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop will run another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Fixed steps simulated so far
    pub fn total_steps(&self) -> u64 {
        self.stepper.total_steps()
    }

    /// The simulation quantum
    pub fn fixed_timestep(&self) -> f32 {
        self.stepper.step()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
