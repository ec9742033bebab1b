//! Frame-time to fixed-timestep bridge
//!
//! Render frames arrive at whatever rate the host manages; the sim
//! only ever advances in `SIM_DT` steps. The clock accumulates frame
//! time and drains it in substeps, capped per frame so a stall cannot
//! spiral, with leftover time carried into the next frame.

use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Fixed-timestep driver owned by the host loop. Banked frame time is
/// host-side bookkeeping, not simulation state, so it is not part of
/// snapshots; reset it when swapping states in.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    accumulator: f32,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed time and run the ticks it pays for.
    ///
    /// The frame delta is clamped before accumulating, and at most
    /// `MAX_SUBSTEPS` ticks run per call; any remainder stays in the
    /// accumulator. One-shot inputs are cleared after the first tick
    /// so a single press never fires twice. Returns how many ticks ran.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, frame_dt: f32) -> u32 {
        let dt = frame_dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.drop_bomb = false;
        }
        substeps
    }

    /// Drop any banked frame time (round restart, resume from pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
