//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod ai;
pub mod bomb;
pub mod clock;
pub mod events;
pub mod grid;
pub mod state;
pub mod tick;

pub use actor::{Actor, AiState, Controller, MoveState};
pub use ai::{AiAction, danger_tiles};
pub use bomb::{Bomb, Explosion, ExplosionVariant, PowerUp, PowerUpKind};
pub use clock::SimulationClock;
pub use events::{EventQueue, ScheduledEvent};
pub use grid::{Direction, Tile, TileGrid};
pub use state::{GameState, Phase};
pub use tick::{TickInput, tick};
