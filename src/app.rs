//! Fixed-timestep driver
//!
//! Turns variable frame times into whole simulation ticks and owns the
//! input that the platform layer fills in between frames.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Canvas, draw_frame};
use crate::sim::{GamePhase, GameState, TickInput, tick};

pub struct App {
    pub state: GameState,
    /// Input for the next tick; the platform layer writes into this
    pub input: TickInput,
    accumulator: f32,
    last_phase: GamePhase,
}

impl App {
    pub fn new(state: GameState) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            last_phase,
        }
    }

    /// Advance by `frame_dt` seconds of wall time. Returns ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;

            if self.state.phase.is_finished() {
                self.accumulator = 0.0;
                break;
            }
        }

        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!(
                "Phase {:?} -> {:?} at tick {}",
                self.last_phase,
                phase,
                self.state.time_ticks
            );
            self.last_phase = phase;
        }

        substeps
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        draw_frame(&self.state, canvas);
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase.is_finished()
    }
}
