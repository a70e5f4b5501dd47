use log::info;
use macroquad::prelude::{get_frame_time, next_frame};

use crate::config::{MAX_FRAME_TIME, TICKS_PER_SECOND};
use crate::error::SimError;
use crate::input::{InputFrame, InputSource};
use crate::playing_field::PlayingField;
use crate::render::MacroquadRenderer;
use crate::terrain::Terrain;
use crate::view::Renderer;

/// Who plays and how many characters each team fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSetup {
    pub teams: usize,
    pub characters_per_team: usize,
    pub humans: usize, // Teams counted from the first that a human plays
    pub seed: Option<u64>,
}

impl MatchSetup {
    /// Creates the teams, spreads their characters over `terrain` and hands out the first turn.
    pub fn build(&self, terrain: Terrain) -> PlayingField {
        let mut field = PlayingField::new(terrain, self.seed);
        for i in 0..self.teams {
            field.add_team(i >= self.humans);
        }
        field.populate(self.characters_per_team);
        field.start();
        info!(
            "Match set up: {} teams of {}, {} human",
            self.teams, self.characters_per_team, self.humans
        );
        field
    }
}

/// The Game struct steps the playing field at a fixed rate regardless of the frame rate
pub struct Game {
    pub field: PlayingField,
    time_accumulator: f32,
    tick_duration: f32,
    pending_input: Option<InputFrame>, // Presses seen in frames too short to run a tick
}

impl Game {
    pub fn new(field: PlayingField) -> Self {
        Game {
            field,
            time_accumulator: 0.0,
            tick_duration: 1.0 / TICKS_PER_SECOND as f32,
            pending_input: None,
        }
    }

    /// Runs as many ticks as `frame_time` seconds cover. One-shot presses reach only the first
    /// of them; held keys reach all. Returns the number of ticks run.
    pub fn advance(&mut self, frame_time: f32, input: InputFrame) -> Result<u32, SimError> {
        let mut frame = match self.pending_input.take() {
            Some(pending) => pending.merge(input),
            None => input,
        };
        self.time_accumulator += frame_time.min(MAX_FRAME_TIME);

        let mut ticks = 0;
        while self.time_accumulator >= self.tick_duration {
            self.time_accumulator -= self.tick_duration;
            self.field.update(&frame)?;
            frame = frame.held_only();
            ticks += 1;
        }

        if ticks == 0 {
            self.pending_input = Some(frame);
        }
        Ok(ticks)
    }

    /// Run the main game loop using the provided renderer and input
    pub async fn run(
        &mut self,
        renderer: &mut impl Renderer,
        input: &mut impl InputSource,
    ) -> Result<(), SimError> {
        info!("Starting main loop...");
        let mut announced = false;

        while !MacroquadRenderer::window_should_close() {
            let frame = input.poll();
            if frame.quit {
                break;
            }
            let mouse = frame.mouse;
            self.advance(get_frame_time(), frame)?;

            if self.field.game_state.is_over() && !announced {
                info!("Match over after {} ticks", self.field.clock.now());
                announced = true;
            }

            renderer.draw(&self.field.frame(mouse), self.field.terrain());
            next_frame().await;
        }

        info!("Exiting crater.");
        Ok(())
    }
}
