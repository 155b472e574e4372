//! Engine integration
//!
//! [`FrogAdventure`] plugs a [`Game`] into the engine loop: input is sampled
//! once per frame, the game advances once per fixed step and queued audio
//! cues are dispatched when the frame is presented.

use tile_engine::prelude::*;

use crate::game::{Game, GameMode};
use crate::input::{InputSource, InputState};

/// Logs the sound a cue would play
pub struct AudioCueLog {
    sound: &'static str,
}

impl AudioCueLog {
    /// Handler that plays `sound`
    pub fn new(sound: &'static str) -> Self {
        Self { sound }
    }

    /// Sound played for an event type
    pub fn sound_for(event_type: EventType) -> &'static str {
        match event_type {
            EventType::Jump => "jump",
            EventType::Pickup => "pickup",
            EventType::AmbientCue => "ribbit",
            EventType::LevelStarted => "bgm",
            EventType::LevelEnded => "bgm_stop",
        }
    }
}

impl EventHandler for AudioCueLog {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        log::info!("Audio: {} ({:?})", self.sound, event);
        true
    }
}

/// The game driven by an input source
pub struct FrogAdventure<I: InputSource> {
    game: Game,
    input_source: I,
    input: InputState,
    last_mode: Option<GameMode>,
}

impl<I: InputSource> FrogAdventure<I> {
    /// Wrap a game and register the audio cue handlers
    pub fn new(mut game: Game, input_source: I) -> Self {
        for event_type in [
            EventType::Jump,
            EventType::Pickup,
            EventType::AmbientCue,
            EventType::LevelStarted,
            EventType::LevelEnded,
        ] {
            game.events_mut()
                .register_handler(event_type, Box::new(AudioCueLog::new(AudioCueLog::sound_for(event_type))));
        }
        Self {
            game,
            input_source,
            input: InputState::empty(),
            last_mode: None,
        }
    }

    /// The game
    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl<I: InputSource> Application for FrogAdventure<I> {
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        log::info!("tBBF6: The Final Adventure");
        Ok(())
    }

    fn handle_input(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.input = self.input_source.poll();
        if self.input.escape() {
            engine.quit();
        }
        Ok(())
    }

    fn fixed_update(&mut self, _engine: &mut Engine, dt: f32) -> Result<(), AppError> {
        self.game.update(&self.input, dt)
    }

    fn render(&mut self, engine: &mut Engine, _alpha: f32) -> Result<(), AppError> {
        self.game.events_mut().dispatch();

        let mode = self.game.mode();
        if self.last_mode != Some(mode) {
            match self.game.banner() {
                Some([title, prompt]) => log::info!("[{:?}] {} / {}", mode, title, prompt),
                None => log::info!("[{:?}] frame {}", mode, engine.frame_count()),
            }
            self.last_mode = Some(mode);
        }
        if let Some(camera) = self.game.camera_position() {
            log::trace!("Camera at ({:.3}, {:.3})", camera.x, camera.y);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        self.game.exit_level();
        self.game.events_mut().dispatch();
        log::info!(
            "Finished in {:?} after {} frames ({} steps)",
            self.game.mode(),
            engine.frame_count(),
            engine.total_steps()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::StageLevels;
    use crate::input::{Button, InputScript, ScriptStep};

    fn level() -> LevelData {
        let mut rows = vec![vec![0; 24]; 12];
        rows[11] = vec![114; 24];
        LevelData::new(24, 12)
            .with_layer(LayerKind::Base, rows)
            .with_spawn(EntityKind::Player, 2, 10)
    }

    #[test]
    fn test_scripted_run_starts_and_quits() {
        let game = Game::new(
            GameConfig::default().with_rng_seed(5),
            StageLevels::new(level(), level(), level()),
        );
        let script = InputScript::new(vec![
            ScriptStep::new(3, &[]),
            ScriptStep::new(2, &[Button::Space]),
            ScriptStep::new(10, &[Button::Right]),
            ScriptStep::new(1, &[Button::Escape]),
        ]);
        let mut app = FrogAdventure::new(game, script);

        let config = EngineConfig::new().with_max_frames(1000);
        Engine::run(config, &mut app, &mut ManualClock::constant(1.0 / 30.0)).unwrap();

        // Escape on frame 16 ends the run; cleanup tears the level down
        assert_eq!(app.game().mode(), GameMode::Outdoors);
        assert!(app.game().level().is_none());
    }
}
