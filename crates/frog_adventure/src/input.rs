//! Player input
//!
//! The game reads a snapshot of held buttons once per frame. Headless runs
//! replay an [`InputScript`] instead of polling a keyboard.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tile_engine::config::Config;

bitflags! {
    /// Buttons held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputState: u8 {
        /// Walk left
        const LEFT = 1 << 0;
        /// Walk right
        const RIGHT = 1 << 1;
        /// Interact (doors, torch)
        const UP = 1 << 2;
        /// Jump, start, retry
        const SPACE = 1 << 3;
        /// Quit
        const ESCAPE = 1 << 4;
    }
}

impl InputState {
    /// Walk left held
    pub fn left(self) -> bool {
        self.contains(Self::LEFT)
    }

    /// Walk right held
    pub fn right(self) -> bool {
        self.contains(Self::RIGHT)
    }

    /// Interact held
    pub fn up(self) -> bool {
        self.contains(Self::UP)
    }

    /// Space held
    pub fn space(self) -> bool {
        self.contains(Self::SPACE)
    }

    /// Quit requested
    pub fn escape(self) -> bool {
        self.contains(Self::ESCAPE)
    }
}

/// Serializable button name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// [`InputState::LEFT`]
    Left,
    /// [`InputState::RIGHT`]
    Right,
    /// [`InputState::UP`]
    Up,
    /// [`InputState::SPACE`]
    Space,
    /// [`InputState::ESCAPE`]
    Escape,
}

impl From<Button> for InputState {
    fn from(button: Button) -> Self {
        match button {
            Button::Left => InputState::LEFT,
            Button::Right => InputState::RIGHT,
            Button::Up => InputState::UP,
            Button::Space => InputState::SPACE,
            Button::Escape => InputState::ESCAPE,
        }
    }
}

/// Source of one input snapshot per frame
pub trait InputSource {
    /// Buttons held this frame
    fn poll(&mut self) -> InputState;
}

/// Buttons held for a run of frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Number of frames the buttons stay held
    pub frames: u64,
    /// Buttons held, empty for none
    #[serde(default)]
    pub held: Vec<Button>,
}

impl ScriptStep {
    /// Hold `held` for `frames` frames
    pub fn new(frames: u64, held: &[Button]) -> Self {
        Self { frames, held: held.to_vec() }
    }

    fn state(&self) -> InputState {
        self.held.iter().fold(InputState::empty(), |state, button| state | InputState::from(*button))
    }
}

/// Recorded input replayed frame by frame
///
/// Once the script runs out every later frame has nothing held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputScript {
    /// Steps in playback order
    pub steps: Vec<ScriptStep>,
    #[serde(skip)]
    frame: u64,
}

impl InputScript {
    /// Create a script from its steps
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps, frame: 0 }
    }

    /// Short walk through the first stage
    pub fn demo() -> Self {
        Self::new(vec![
            ScriptStep::new(30, &[]),
            ScriptStep::new(5, &[Button::Space]),
            ScriptStep::new(60, &[]),
            ScriptStep::new(120, &[Button::Right]),
            ScriptStep::new(20, &[Button::Right, Button::Space]),
            ScriptStep::new(120, &[Button::Right]),
            ScriptStep::new(30, &[Button::Up]),
            ScriptStep::new(60, &[Button::Left]),
            ScriptStep::new(1, &[Button::Escape]),
        ])
    }

    /// Total frames covered by the script
    pub fn len_frames(&self) -> u64 {
        self.steps.iter().map(|step| step.frames).sum()
    }

    /// Buttons held at a given frame
    pub fn state_at(&self, frame: u64) -> InputState {
        let mut start = 0;
        for step in &self.steps {
            if frame < start + step.frames {
                return step.state();
            }
            start += step.frames;
        }
        InputState::empty()
    }
}

impl InputSource for InputScript {
    fn poll(&mut self) -> InputState {
        let state = self.state_at(self.frame);
        self.frame += 1;
        state
    }
}

impl Config for InputScript {}
