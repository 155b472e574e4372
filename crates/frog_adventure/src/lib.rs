//! The Big Beautiful Frog in their FINAL Adventure
//!
//! A three-stage platformer built on [`tile_engine`]. The frog finds a key
//! outdoors, lights a torch in the store and slips past the guard at the exit.
//!
//! The crate runs headless: input comes from an [`input::InputSource`] and
//! frames are reported through `log`.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod config;
pub mod game;
pub mod input;

pub use app::{AudioCueLog, FrogAdventure};
pub use config::{GameConfig, GameplayConfig, LevelPaths};
pub use game::{Game, GameMode, Stage, StageLevels};
pub use input::{Button, InputScript, InputSource, InputState, ScriptStep};
