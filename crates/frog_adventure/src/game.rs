//! Game controller
//!
//! A [`Game`] is a small state machine over [`GameMode`]. Each mode has one
//! handler in [`MODE_HANDLERS`], run once per fixed step with the current
//! input. Play modes own a [`LevelContext`]; title screens own none.
//!
//! Stage flow:
//!
//! ```text
//! Start --space--> Outdoors --door--> Store --door--> Exit --door--> Victory
//!                     ^                                 |  ^            |
//!                     |                           enemy |  | space      |
//!                     |                                 v  |            |
//!                     |                               GameOver          |
//!                     +-------------------space-------------------------+
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tile_engine::prelude::*;

use crate::config::{GameConfig, GameplayConfig};
use crate::input::InputState;

/// A playable level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Find the key, open the door
    Outdoors,
    /// Light the torch
    Store,
    /// Sneak past the bee
    Exit,
}

impl Stage {
    /// Stages in play order
    pub const ALL: [Stage; 3] = [Stage::Outdoors, Stage::Store, Stage::Exit];

    /// Position in play order
    pub fn index(self) -> usize {
        match self {
            Stage::Outdoors => 0,
            Stage::Store => 1,
            Stage::Exit => 2,
        }
    }

    /// Mode that plays this stage
    pub fn mode(self) -> GameMode {
        match self {
            Stage::Outdoors => GameMode::Outdoors,
            Stage::Store => GameMode::Store,
            Stage::Exit => GameMode::Exit,
        }
    }

    /// Background color behind the tiles
    pub fn clear_color(self) -> Vec4 {
        match self {
            Stage::Outdoors => Vec4::new(0.05, 0.46, 0.8, 1.0),
            Stage::Store => Vec4::new(0.6, 0.419_61, 0.29, 1.0),
            Stage::Exit => Vec4::new(0.05, 0.46, 0.8, 1.0),
        }
    }
}

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Title screen
    Start,
    /// First stage
    Outdoors,
    /// Second stage
    Store,
    /// Final stage
    Exit,
    /// Caught by the enemy
    GameOver,
    /// Left through the final door
    Victory,
}

impl GameMode {
    /// The stage this mode plays, if any
    pub fn stage(self) -> Option<Stage> {
        match self {
            GameMode::Outdoors => Some(Stage::Outdoors),
            GameMode::Store => Some(Stage::Store),
            GameMode::Exit => Some(Stage::Exit),
            GameMode::Start | GameMode::GameOver | GameMode::Victory => None,
        }
    }

    fn handler(self) -> ModeHandler {
        let index = match self {
            GameMode::Start => 0,
            GameMode::Outdoors | GameMode::Store | GameMode::Exit => 1,
            GameMode::GameOver => 2,
            GameMode::Victory => 3,
        };
        MODE_HANDLERS[index]
    }
}

/// Per-step behavior of a mode
pub type ModeHandler = fn(&mut Game, &InputState, f32) -> Result<(), AppError>;

/// Handlers for title, play, game over and victory
pub const MODE_HANDLERS: [ModeHandler; 4] = [update_start, update_play, update_game_over, update_victory];

/// Parsed level data for every stage
#[derive(Debug, Clone)]
pub struct StageLevels {
    levels: [LevelData; 3],
}

impl StageLevels {
    /// Group already parsed levels
    pub fn new(outdoors: LevelData, store: LevelData, exit: LevelData) -> Self {
        Self { levels: [outdoors, store, exit] }
    }

    /// Read and validate every stage's level file
    pub fn load(config: &GameConfig) -> Result<Self, LevelError> {
        let load = |stage: Stage| -> Result<LevelData, LevelError> {
            let path = config.levels.path_for(stage);
            log::info!("Loading {:?} from {}", stage, path.display());
            let data = LevelData::load_from_file(&path)?;
            data.validate()?;
            Ok(data)
        };
        Ok(Self::new(load(Stage::Outdoors)?, load(Stage::Store)?, load(Stage::Exit)?))
    }

    /// Level data of a stage
    pub fn get(&self, stage: Stage) -> &LevelData {
        &self.levels[stage.index()]
    }
}

/// The game: current mode, the live level and HUD state
pub struct Game {
    config: GameConfig,
    levels: StageLevels,
    mode: GameMode,
    level: Option<LevelContext>,
    flavor_text: Option<String>,
    ribbited: bool,
    show_pyrotechnics: bool,
    events: EventQueue,
    rng: StdRng,
}

impl Game {
    /// Create a game at the title screen
    pub fn new(config: GameConfig, levels: StageLevels) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            levels,
            mode: GameMode::Start,
            level: None,
            flavor_text: None,
            ribbited: false,
            show_pyrotechnics: false,
            events: EventQueue::new(),
            rng,
        }
    }

    /// Run the current mode's handler for one fixed step
    pub fn update(&mut self, input: &InputState, dt: f32) -> Result<(), AppError> {
        let handler = self.mode.handler();
        handler(self, input, dt)
    }

    /// Current mode
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The level in play, if any
    pub fn level(&self) -> Option<&LevelContext> {
        self.level.as_ref()
    }

    /// Mutable access to the level in play
    pub fn level_mut(&mut self) -> Option<&mut LevelContext> {
        self.level.as_mut()
    }

    /// Text shown over the level, if any
    pub fn flavor_text(&self) -> Option<&str> {
        self.flavor_text.as_deref()
    }

    /// Whether particle emitters are drawn
    pub fn show_pyrotechnics(&self) -> bool {
        self.show_pyrotechnics
    }

    /// Pending audio cues
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Title-screen lines for modes without a level
    pub fn banner(&self) -> Option<[&'static str; 2]> {
        match self.mode {
            GameMode::Start => Some(["The Big Beautiful Frog in their FINAL Adventure", "Press Space to Begin"]),
            GameMode::GameOver => Some(["GAME OVER", "Press Space to Retry or ESC to Exit"]),
            GameMode::Victory => Some(["Congratulations!", "Press Space to Play Again or ESC to Exit"]),
            GameMode::Outdoors | GameMode::Store | GameMode::Exit => None,
        }
    }

    /// Background color for the current mode
    pub fn clear_color(&self) -> Vec4 {
        self.mode.stage().map_or(Vec4::new(0.0, 0.0, 0.0, 1.0), Stage::clear_color)
    }

    /// Camera center for the current frame
    pub fn camera_position(&self) -> Option<Vec2> {
        let level = self.level.as_ref()?;
        let player = level.get(EntityKind::Player)?;
        Some(level.camera_position(player.position))
    }

    /// Tear down any level and start `stage`
    pub fn enter_stage(&mut self, stage: Stage) -> Result<(), AppError> {
        self.exit_level();

        let mut level = LevelContext::from_data(self.levels.get(stage), &self.config.physics)?;
        if stage == Stage::Store {
            for i in 0..4 {
                let origin = Vec2::new(i as f32, -1.0);
                level.add_emitter(self.new_emitter(origin));
            }
        }

        log::info!("Entering {:?}", stage);
        self.level = Some(level);
        self.mode = stage.mode();
        self.events.send(GameEvent::LevelStarted { stage: stage.index() });
        Ok(())
    }

    fn new_emitter(&mut self, origin: Vec2) -> ParticleEmitter {
        let gravity = Vec2::new(0.0, -1.0);
        match self.config.rng_seed {
            Some(_) => ParticleEmitter::seeded(15, 3.0, origin, gravity, self.rng.gen()),
            None => ParticleEmitter::new(15, 3.0, origin, gravity),
        }
    }

    /// Drop the level in play, if any
    pub fn exit_level(&mut self) {
        if self.level.take().is_some() {
            self.flavor_text = None;
            self.ribbited = false;
            self.events.send(GameEvent::LevelEnded);
        }
    }

    fn finish(&mut self, mode: GameMode) {
        self.exit_level();
        log::info!("{:?}", mode);
        self.mode = mode;
    }

    fn show_flavor(&mut self, text: &str) {
        if self.flavor_text.as_deref() != Some(text) {
            log::debug!("Flavor text: {}", text);
        }
        self.flavor_text = Some(text.to_string());
        if !self.ribbited {
            self.events.send(GameEvent::AmbientCue);
            self.ribbited = true;
        }
    }
}

fn missing_level() -> AppError {
    AppError::GameLogic("play mode without a level".to_string())
}

fn update_start(game: &mut Game, input: &InputState, _dt: f32) -> Result<(), AppError> {
    if input.space() {
        game.enter_stage(Stage::Outdoors)?;
    }
    Ok(())
}

fn update_game_over(game: &mut Game, input: &InputState, _dt: f32) -> Result<(), AppError> {
    if input.space() {
        game.enter_stage(Stage::Exit)?;
        if let Some(door) = game.level_mut().and_then(|level| level.get_mut(EntityKind::Door)) {
            door.locked = false;
        }
    }
    Ok(())
}

fn update_victory(game: &mut Game, input: &InputState, _dt: f32) -> Result<(), AppError> {
    if input.space() {
        game.enter_stage(Stage::Outdoors)?;
    }
    Ok(())
}

fn update_play(game: &mut Game, input: &InputState, dt: f32) -> Result<(), AppError> {
    let stage = game.mode.stage().ok_or_else(missing_level)?;
    let tuning = game.config.gameplay.clone();

    update_player(game, input, dt, &tuning)?;
    if stage == Stage::Outdoors {
        update_key(game, dt, &tuning)?;
    }
    update_coins(game)?;

    let near_poi = update_point_of_interest(game, input, stage)?;
    let near_door = game.level.as_ref().ok_or_else(missing_level)?.overlapping(EntityKind::Door, EntityKind::Player);
    if near_door && update_door(game, input, stage)? {
        // The level was replaced or torn down
        return Ok(());
    }
    if !near_door && !near_poi {
        game.flavor_text = None;
        game.ribbited = false;
    }

    if stage == Stage::Exit && update_enemy(game, dt, &tuning)? {
        game.finish(GameMode::GameOver);
        return Ok(());
    }

    if game.config.always_update_particles || game.show_pyrotechnics {
        game.level.as_mut().ok_or_else(missing_level)?.update_particles(dt);
    }
    Ok(())
}

fn update_player(game: &mut Game, input: &InputState, dt: f32, tuning: &GameplayConfig) -> Result<(), AppError> {
    let level = game.level.as_mut().ok_or_else(missing_level)?;
    let player = level
        .get_mut(EntityKind::Player)
        .ok_or_else(|| AppError::GameLogic("level has no player".to_string()))?;

    player.acceleration = Vec2::zeros();
    player.animate(dt);

    if !player.collided_left() && input.left() {
        player.acceleration.x = -tuning.walk_acceleration;
        player.facing_right = false;
    } else if !player.collided_right() && input.right() {
        player.acceleration.x = tuning.walk_acceleration;
        player.facing_right = true;
    }

    if player.collided_bottom() && input.space() {
        player.velocity.y = tuning.jump_speed;
        game.events.send(GameEvent::Jump);
    }

    if !player.collided_bottom() {
        player.acceleration.y -= tuning.player_gravity;
    }

    level.step_kind(EntityKind::Player, dt);
    Ok(())
}

fn update_key(game: &mut Game, dt: f32, tuning: &GameplayConfig) -> Result<(), AppError> {
    let level = game.level.as_mut().ok_or_else(missing_level)?;

    if level.overlapping(EntityKind::Key, EntityKind::Player) {
        if let Some(key) = level.get_mut(EntityKind::Key) {
            key.park_offscreen();
        }
        if let Some(door) = level.get_mut(EntityKind::Door) {
            door.locked = false;
        }
        level.map_mut().set_layer_visible(LayerKind::Temporary, false);
        game.events.send(GameEvent::Pickup);
        log::info!("Key collected");
    }

    let Some(key) = level.get_mut(EntityKind::Key) else {
        return Ok(());
    };
    if !key.is_static {
        key.acceleration = Vec2::zeros();
        if !key.collided_bottom() {
            key.acceleration.y = -tuning.key_gravity;
        }
        level.step_kind(EntityKind::Key, dt);
    }
    Ok(())
}

fn update_coins(game: &mut Game) -> Result<(), AppError> {
    let level = game.level.as_mut().ok_or_else(missing_level)?;
    let collected = level.get(EntityKind::Coin).is_some_and(|coin| !coin.is_parked())
        && level.overlapping(EntityKind::Coin, EntityKind::Player);
    if collected {
        if let Some(coin) = level.get_mut(EntityKind::Coin) {
            coin.park_offscreen();
        }
        game.events.send(GameEvent::Pickup);
    }
    Ok(())
}

/// Returns whether the player is at the point of interest
fn update_point_of_interest(game: &mut Game, input: &InputState, stage: Stage) -> Result<bool, AppError> {
    let level = game.level.as_mut().ok_or_else(missing_level)?;
    if !level.overlapping(EntityKind::PointOfInterest, EntityKind::Player) {
        return Ok(false);
    }

    let text = match stage {
        Stage::Outdoors => "What a terrible sign!",
        Stage::Store => {
            let dark = level.map().is_layer_visible(LayerKind::Overlay);
            if input.up() {
                let map = level.map_mut();
                map.set_layer_visible(LayerKind::Overlay, false);
                map.set_layer_visible(LayerKind::Temporary, false);
                if let Some(door) = level.get_mut(EntityKind::Door) {
                    door.locked = false;
                }
                if !game.show_pyrotechnics {
                    log::info!("Torch lit");
                }
                game.show_pyrotechnics = true;
            }
            if dark {
                "I can't see a thing! (Press UP to light torch)"
            } else {
                "Woah, it's lit in here!"
            }
        }
        Stage::Exit => "If I get to close to that bee's turf, he'll come after me.",
    };
    game.show_flavor(text);
    Ok(true)
}

/// Returns whether the door moved the game to another mode
fn update_door(game: &mut Game, input: &InputState, stage: Stage) -> Result<bool, AppError> {
    let locked = game
        .level
        .as_ref()
        .and_then(|level| level.get(EntityKind::Door))
        .map_or(true, |door| door.locked);

    game.show_flavor(if locked { "It's locked." } else { "Press UP to proceed." });
    if locked || !input.up() {
        return Ok(false);
    }

    match stage {
        Stage::Outdoors => game.enter_stage(Stage::Store)?,
        Stage::Store => {
            game.enter_stage(Stage::Exit)?;
            if let Some(door) = game.level_mut().and_then(|level| level.get_mut(EntityKind::Door)) {
                door.locked = false;
            }
        }
        Stage::Exit => game.finish(GameMode::Victory),
    }
    Ok(true)
}

/// Moves the enemy; returns whether it caught the player
fn update_enemy(game: &mut Game, dt: f32, tuning: &GameplayConfig) -> Result<bool, AppError> {
    let jitter_x = game.rng.gen_range(-100i32..=100) as f32 / 100.0;
    let jitter_y = game.rng.gen_range(-100i32..=100) as f32 / 100.0;

    let level = game.level.as_mut().ok_or_else(missing_level)?;
    let Some(player_position) = level.get(EntityKind::Player).map(|player| player.position) else {
        return Ok(false);
    };
    let Some(enemy) = level.get_mut(EntityKind::Enemy) else {
        return Ok(false);
    };

    let toward = |from: f32, to: f32, speed: f32| if from - to < 0.0 { speed } else { -speed };

    let was_angry = enemy.angry;
    enemy.angry = (enemy.home.x - player_position.x).abs() < tuning.enemy_aggro_range;
    if enemy.angry {
        enemy.velocity.x = toward(enemy.position.x, player_position.x, tuning.enemy_chase_speed);
        enemy.velocity.y = toward(enemy.position.y, player_position.y, tuning.enemy_chase_speed);
    } else if (enemy.home.x - enemy.position.x).abs() > tuning.enemy_home_slack
        || (enemy.home.y - enemy.position.y).abs() > tuning.enemy_home_slack
    {
        enemy.velocity.x = toward(enemy.position.x, enemy.home.x, tuning.enemy_return_speed);
        enemy.velocity.y = toward(enemy.position.y, enemy.home.y, tuning.enemy_return_speed);
    } else {
        enemy.velocity = Vec2::zeros();
    }
    if enemy.angry != was_angry {
        log::debug!("Enemy angry: {}", enemy.angry);
    }

    // Flies freely; no tile collision
    enemy.position += enemy.velocity * dt;
    enemy.position += Vec2::new(jitter_x, jitter_y) * tuning.enemy_jitter;
    enemy.facing_right = enemy.velocity.x >= 0.0;

    Ok(level.overlapping(EntityKind::Enemy, EntityKind::Player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GROUND: u32 = 114;
    const DT: f32 = 1.0 / 60.0;

    fn stage_data(spawns: &[(EntityKind, i32, i32)]) -> LevelData {
        let mut rows = vec![vec![0; 24]; 12];
        rows[11] = vec![GROUND; 24];
        let mut data = LevelData::new(24, 12)
            .with_layer(LayerKind::Base, rows)
            .with_layer(LayerKind::Overlay, vec![vec![1; 24]; 12])
            .with_layer(LayerKind::Temporary, vec![vec![2; 24]; 12]);
        for (kind, x, y) in spawns {
            data = data.with_spawn(*kind, *x, *y);
        }
        data
    }

    fn game_with(outdoors: LevelData, store: LevelData, exit: LevelData) -> Game {
        let config = GameConfig::default().with_rng_seed(11);
        Game::new(config, StageLevels::new(outdoors, store, exit))
    }

    fn default_game() -> Game {
        game_with(
            stage_data(&[(EntityKind::Player, 2, 10), (EntityKind::Key, 10, 10), (EntityKind::Door, 20, 10)]),
            stage_data(&[(EntityKind::Player, 2, 10), (EntityKind::PointOfInterest, 8, 10), (EntityKind::Door, 20, 10)]),
            stage_data(&[(EntityKind::Player, 2, 10), (EntityKind::Enemy, 15, 5), (EntityKind::Door, 20, 10)]),
        )
    }

    fn step(game: &mut Game, input: InputState) {
        game.update(&input, DT).unwrap();
    }

    fn move_player_to(game: &mut Game, kind: EntityKind) {
        let level = game.level_mut().unwrap();
        let target = level.get(kind).unwrap().position;
        let player = level.get_mut(EntityKind::Player).unwrap();
        player.position = target;
        player.velocity = Vec2::zeros();
    }

    #[test]
    fn test_start_waits_for_space() {
        let mut game = default_game();
        step(&mut game, InputState::empty());
        assert_eq!(game.mode(), GameMode::Start);
        assert!(game.level().is_none());
        assert!(game.banner().is_some());

        step(&mut game, InputState::SPACE);
        assert_eq!(game.mode(), GameMode::Outdoors);
        assert!(game.level().is_some());
        assert_eq!(game.events_mut().drain(), vec![GameEvent::LevelStarted { stage: 0 }]);
    }

    #[test]
    fn test_locked_door_blocks_progress() {
        let mut game = default_game();
        game.enter_stage(Stage::Outdoors).unwrap();
        move_player_to(&mut game, EntityKind::Door);

        step(&mut game, InputState::UP);
        assert_eq!(game.mode(), GameMode::Outdoors);
        assert_eq!(game.flavor_text(), Some("It's locked."));
    }

    #[test]
    fn test_key_unlocks_door_and_hides_decoration() {
        let mut game = default_game();
        game.enter_stage(Stage::Outdoors).unwrap();
        game.events_mut().clear();
        move_player_to(&mut game, EntityKind::Key);

        step(&mut game, InputState::empty());

        let level = game.level().unwrap();
        assert!(level.get(EntityKind::Key).unwrap().is_parked());
        assert!(!level.get(EntityKind::Door).unwrap().locked);
        assert!(!level.map().is_layer_visible(LayerKind::Temporary));
        assert!(game.events_mut().drain().contains(&GameEvent::Pickup));

        // Parked keys are not collected twice
        step(&mut game, InputState::empty());
        assert!(!game.events_mut().drain().contains(&GameEvent::Pickup));
    }

    #[test]
    fn test_unlocked_door_leads_to_store() {
        let mut game = default_game();
        game.enter_stage(Stage::Outdoors).unwrap();
        game.level_mut().unwrap().get_mut(EntityKind::Door).unwrap().locked = false;
        move_player_to(&mut game, EntityKind::Door);

        step(&mut game, InputState::empty());
        assert_eq!(game.flavor_text(), Some("Press UP to proceed."));

        step(&mut game, InputState::UP);
        assert_eq!(game.mode(), GameMode::Store);
        assert_eq!(game.level().unwrap().emitters().len(), 4);
        assert!(game.level().unwrap().get(EntityKind::Door).unwrap().locked);
    }

    #[test]
    fn test_torch_lights_the_store() {
        let mut game = default_game();
        game.enter_stage(Stage::Store).unwrap();
        move_player_to(&mut game, EntityKind::PointOfInterest);

        step(&mut game, InputState::empty());
        assert_eq!(game.flavor_text(), Some("I can't see a thing! (Press UP to light torch)"));
        assert!(!game.show_pyrotechnics());

        step(&mut game, InputState::UP);
        let level = game.level().unwrap();
        assert!(!level.map().is_layer_visible(LayerKind::Overlay));
        assert!(!level.get(EntityKind::Door).unwrap().locked);
        assert!(game.show_pyrotechnics());

        step(&mut game, InputState::empty());
        assert_eq!(game.flavor_text(), Some("Woah, it's lit in here!"));
    }

    #[test]
    fn test_ambient_cue_plays_once_per_contact() {
        let mut game = default_game();
        game.enter_stage(Stage::Store).unwrap();
        game.events_mut().clear();
        move_player_to(&mut game, EntityKind::PointOfInterest);

        for _ in 0..3 {
            step(&mut game, InputState::empty());
        }
        let cues = game.events_mut().drain().into_iter().filter(|e| *e == GameEvent::AmbientCue).count();
        assert_eq!(cues, 1);

        // Walking away resets the cue
        game.level_mut().unwrap().get_mut(EntityKind::Player).unwrap().position.x = 0.4;
        step(&mut game, InputState::empty());
        assert_eq!(game.flavor_text(), None);
    }

    #[test]
    fn test_store_door_opens_unlocked_exit() {
        let mut game = default_game();
        game.enter_stage(Stage::Store).unwrap();
        game.level_mut().unwrap().get_mut(EntityKind::Door).unwrap().locked = false;
        move_player_to(&mut game, EntityKind::Door);

        step(&mut game, InputState::UP);
        assert_eq!(game.mode(), GameMode::Exit);
        assert!(!game.level().unwrap().get(EntityKind::Door).unwrap().locked);
    }

    #[test]
    fn test_exit_door_wins() {
        let mut game = default_game();
        game.enter_stage(Stage::Exit).unwrap();
        game.level_mut().unwrap().get_mut(EntityKind::Door).unwrap().locked = false;
        move_player_to(&mut game, EntityKind::Door);

        step(&mut game, InputState::UP);
        assert_eq!(game.mode(), GameMode::Victory);
        assert!(game.level().is_none());
        assert!(game.events_mut().drain().contains(&GameEvent::LevelEnded));

        step(&mut game, InputState::SPACE);
        assert_eq!(game.mode(), GameMode::Outdoors);
    }

    #[test]
    fn test_enemy_catches_player() {
        let mut game = default_game();
        game.enter_stage(Stage::Exit).unwrap();
        move_player_to(&mut game, EntityKind::Enemy);

        step(&mut game, InputState::empty());
        assert_eq!(game.mode(), GameMode::GameOver);
        assert!(game.level().is_none());

        step(&mut game, InputState::SPACE);
        assert_eq!(game.mode(), GameMode::Exit);
        assert!(!game.level().unwrap().get(EntityKind::Door).unwrap().locked);
    }

    #[test]
    fn test_enemy_stays_home_when_player_is_far() {
        let mut game = default_game();
        game.enter_stage(Stage::Exit).unwrap();

        step(&mut game, InputState::empty());
        let enemy = game.level().unwrap().get(EntityKind::Enemy).unwrap();
        assert!(!enemy.angry);
        assert_eq!(enemy.velocity, Vec2::zeros());
        assert!((enemy.position - enemy.home).norm() <= 0.015);
    }

    #[test]
    fn test_enemy_chases_nearby_player() {
        let mut game = default_game();
        game.enter_stage(Stage::Exit).unwrap();
        // Enemy home x is 3.1; put the player within range but not touching
        game.level_mut().unwrap().get_mut(EntityKind::Player).unwrap().position = Vec2::new(2.5, -2.0);

        step(&mut game, InputState::empty());
        let enemy = game.level().unwrap().get(EntityKind::Enemy).unwrap();
        assert!(enemy.angry);
        assert_relative_eq!(enemy.velocity.x, -0.25);
        assert_relative_eq!(enemy.velocity.y, -0.25);
        assert!(!enemy.facing_right);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut game = default_game();
        game.enter_stage(Stage::Outdoors).unwrap();
        game.events_mut().clear();
        game.level_mut().unwrap().get_mut(EntityKind::Player).unwrap().collisions = CollisionFlags::BOTTOM;

        step(&mut game, InputState::SPACE);
        let player = game.level().unwrap().get(EntityKind::Player).unwrap();
        assert_relative_eq!(player.velocity.y, 2.0);
        assert_eq!(game.events_mut().drain(), vec![GameEvent::Jump]);
    }

    #[test]
    fn test_walking_sets_facing() {
        let mut game = default_game();
        game.enter_stage(Stage::Outdoors).unwrap();

        step(&mut game, InputState::LEFT);
        let player = game.level().unwrap().get(EntityKind::Player).unwrap();
        assert!(!player.facing_right);
        assert!(player.velocity.x < 0.0);

        step(&mut game, InputState::RIGHT);
        assert!(game.level().unwrap().get(EntityKind::Player).unwrap().facing_right);
    }

    #[test]
    fn test_particles_follow_update_switch() {
        let outdoors = stage_data(&[(EntityKind::Player, 2, 10)]);
        let store = stage_data(&[(EntityKind::Player, 2, 10)]);
        let exit = stage_data(&[(EntityKind::Player, 2, 10)]);
        let mut config = GameConfig::default().with_rng_seed(3);
        config.always_update_particles = false;
        let mut game = Game::new(config, StageLevels::new(outdoors, store, exit));
        game.enter_stage(Stage::Store).unwrap();

        let before = game.level().unwrap().emitters()[0].particles().to_vec();
        step(&mut game, InputState::empty());
        assert_eq!(game.level().unwrap().emitters()[0].particles(), &before[..]);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut game = default_game();
        assert!(game.camera_position().is_none());
        game.enter_stage(Stage::Outdoors).unwrap();
        let camera = game.camera_position().unwrap();
        // Player spawns near the left edge, so the camera is pinned to its bounds
        assert_relative_eq!(camera.x, 1.977, epsilon = 1e-5);
    }
}
