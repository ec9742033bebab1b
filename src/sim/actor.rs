//! Actors: the player and AI enemies
//!
//! Movement is grid-locked. An actor's `tile` is the authoritative grid
//! coordinate and commits the moment a step is accepted; `pos` is the
//! continuous pixel position that glides toward the new tile center for
//! rendering. Collision, blast damage, and pickups all read `tile`, so
//! an actor mid-transit already counts as standing on its destination.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::grid::Direction;
use crate::tile_center;

/// Per-enemy decision timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    /// Seconds until the next decision fires
    pub decide_in: f32,
}

impl AiState {
    pub fn new(decision_interval: f32) -> Self {
        Self {
            decide_in: decision_interval,
        }
    }
}

/// Who drives this actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// Driven by per-tick input from outside the sim
    Human,
    /// Driven by the built-in reactive policy
    Ai(AiState),
}

/// Where an actor is relative to its committed tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveState {
    /// Pixel position sits on the tile center; new steps may be accepted
    Centered,
    /// Gliding toward `target`, the committed tile's pixel center
    Transiting { target: Vec2 },
}

/// A player or enemy on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    pub controller: Controller,
    /// Authoritative grid coordinate
    pub tile: IVec2,
    /// Continuous pixel position, for rendering
    pub pos: Vec2,
    pub move_state: MoveState,
    /// Direction of the last accepted step, for sprite orientation
    pub facing: Direction,
    /// Movement speed in pixels per second
    pub speed: f32,
    /// How many of this actor's bombs may be live at once
    pub max_bombs: u32,
    /// Bombs currently live, credited back on detonation
    pub bombs_placed: u32,
    /// Blast ray length in tiles for bombs this actor places
    pub blast_range: i32,
    pub alive: bool,
    /// Sim time of the last registered hit
    pub last_hit: Option<f32>,
}

impl Actor {
    pub fn new(
        id: u32,
        controller: Controller,
        tile: IVec2,
        tuning: &crate::config::ActorTuning,
        tile_size: f32,
    ) -> Self {
        Self {
            id,
            controller,
            tile,
            pos: tile_center(tile, tile_size),
            move_state: MoveState::Centered,
            facing: Direction::Down,
            speed: tuning.speed,
            max_bombs: tuning.max_bombs,
            bombs_placed: 0,
            blast_range: tuning.blast_range,
            alive: true,
            last_hit: None,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.controller, Controller::Ai(_))
    }

    pub fn in_motion(&self) -> bool {
        matches!(self.move_state, MoveState::Transiting { .. })
    }

    /// Request a one-tile step. `dx`/`dy` are each in {-1, 0, 1}.
    ///
    /// A `(0, 0)` request cancels any transit and snaps to the committed
    /// tile center. Otherwise the step is only accepted while centered;
    /// vertical movement is tried before horizontal, and the first
    /// walkable candidate commits the grid coordinate immediately. If
    /// every requested direction is blocked the actor stays centered.
    pub fn attempt_move(
        &mut self,
        dx: i32,
        dy: i32,
        tile_size: f32,
        is_walkable: impl Fn(IVec2) -> bool,
    ) {
        if !self.alive {
            return;
        }
        if dx == 0 && dy == 0 {
            self.move_state = MoveState::Centered;
            self.pos = tile_center(self.tile, tile_size);
            return;
        }
        if self.in_motion() {
            return;
        }
        for step in [IVec2::new(0, dy), IVec2::new(dx, 0)] {
            if step == IVec2::ZERO {
                continue;
            }
            let next = self.tile + step;
            if is_walkable(next) {
                if let Some(dir) = Direction::from_delta(step) {
                    self.facing = dir;
                }
                self.tile = next;
                self.move_state = MoveState::Transiting {
                    target: tile_center(next, tile_size),
                };
                return;
            }
        }
        self.move_state = MoveState::Centered;
        self.pos = tile_center(self.tile, tile_size);
    }

    /// Advance the continuous position one timestep.
    ///
    /// A transiting actor moves `speed * dt` pixels toward its target
    /// and snaps exactly onto it when the remaining distance is within
    /// reach, so it can never overshoot. A centered actor re-snaps to
    /// its tile center.
    pub fn tick_motion(&mut self, dt: f32, tile_size: f32) {
        match self.move_state {
            MoveState::Centered => {
                self.pos = tile_center(self.tile, tile_size);
            }
            MoveState::Transiting { target } => {
                let to_target = target - self.pos;
                let step = self.speed * dt;
                if to_target.length() <= step {
                    self.pos = target;
                    self.move_state = MoveState::Centered;
                } else {
                    self.pos += to_target.normalize() * step;
                }
            }
        }
    }

    /// Register a blast hit. Returns false (and changes nothing) when
    /// the hit lands within `invulnerability` seconds of the previous
    /// one; otherwise records the hit time and marks the actor dead.
    pub fn take_hit(&mut self, now: f32, invulnerability: f32) -> bool {
        if let Some(last) = self.last_hit {
            if now - last < invulnerability {
                return false;
            }
        }
        self.last_hit = Some(now);
        self.alive = false;
        true
    }
}
