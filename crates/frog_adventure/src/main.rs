//! Headless runner: loads the configuration and stages, then replays an input script.

use std::error::Error;
use std::path::PathBuf;

use frog_adventure::{FrogAdventure, Game, GameConfig, InputScript, StageLevels};
use tile_engine::config::Config;
use tile_engine::foundation::logging;
use tile_engine::foundation::time::ManualClock;
use tile_engine::Engine;

const DEFAULT_CONFIG: &str = "frog_adventure.toml";

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let mut config = GameConfig::load_or_default_from(&config_path)?;
    logging::init_with_level(&config.engine.log_level);
    log::info!("Configuration from {}", config_path.display());

    let script = match &config.input_script {
        Some(path) => InputScript::load_from_file(path)?,
        None => InputScript::demo(),
    };
    if config.engine.max_frames.is_none() {
        config.engine.max_frames = Some(script.len_frames() + 1);
    }

    let levels = StageLevels::load(&config)?;
    let engine_config = config.engine.clone();
    let step = engine_config.fixed_timestep;
    let mut app = FrogAdventure::new(Game::new(config, levels), script);

    // Headless frames advance by exactly one step
    Engine::run(engine_config, &mut app, &mut ManualClock::constant(step))?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("Game error: {}", e);
        eprintln!("Game error: {}", e);
        std::process::exit(1);
    }
}
