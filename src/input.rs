//! Player intents for a single tick, independent of any windowing library.

use std::collections::VecDeque;

/// What the human is doing this tick. Held keys stay set for as long as they are down;
/// `jump`, `attack_pressed`, `click` and `quit` fire once per press.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub walk_left: bool,
    pub walk_right: bool,
    pub jump: bool,
    pub attack_pressed: bool,
    pub attack_held: bool,
    pub aim_up: bool,
    pub aim_down: bool,
    pub click: Option<(f32, f32)>, // Left click in screen coordinates
    pub mouse: Option<(f32, f32)>, // Cursor position in screen coordinates
    pub quit: bool,
}

impl InputFrame {
    /// The same held state with one-shot presses removed, for extra ticks run in one frame.
    pub fn held_only(&self) -> InputFrame {
        InputFrame {
            jump: false,
            attack_pressed: false,
            click: None,
            quit: false,
            ..*self
        }
    }

    /// Folds a later poll into this one, keeping any presses neither tick has consumed yet.
    pub fn merge(&self, later: InputFrame) -> InputFrame {
        InputFrame {
            jump: self.jump || later.jump,
            attack_pressed: self.attack_pressed || later.attack_pressed,
            click: later.click.or(self.click),
            quit: self.quit || later.quit,
            ..later
        }
    }
}

/// Anything that can report the player's intents once per frame.
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Replays a fixed list of frames, then reports no input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }

    /// Appends `count` copies of `frame`.
    pub fn hold(mut self, frame: InputFrame, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(frame, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}
