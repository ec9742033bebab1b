//! Gridblast - a grid-arena bomb survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, actors, bombs, game state)
//! - `config`: Data-driven round setup and balance
//!
//! The simulation is a pure fixed-timestep core: renderers and input
//! layers live outside this crate and talk to it through [`sim::TickInput`]
//! and the public fields of [`sim::GameState`].

pub mod config;
pub mod sim;

pub use config::GameConfig;
pub use sim::{GameState, Phase, SimulationClock, TickInput};

use glam::{IVec2, Vec2};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame delta clamp so a long hitch cannot flood the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Pixel-space center of a grid tile
#[inline]
pub fn tile_center(tile: IVec2, tile_size: f32) -> Vec2 {
    Vec2::new(
        (tile.x as f32 + 0.5) * tile_size,
        (tile.y as f32 + 0.5) * tile_size,
    )
}
