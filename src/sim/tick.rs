//! Fixed timestep simulation tick
//!
//! One entry point, `tick`, advances a round by exactly one timestep.
//! The order of passes inside a tick is part of the sim's contract:
//! input, scheduled events, motion, fuses, detonations, lingering
//! blast damage, pickups, enemy decisions, the end-of-round check, and
//! pruning. Entities that die mid-tick are flagged where they fall and
//! compacted in one retain pass at the end, so every earlier pass sees
//! a stable list.

use serde::{Deserialize, Serialize};

use super::actor::Controller;
use super::ai::{self, AiAction};
use super::bomb::{PowerUpKind, resolve_blast};
use super::state::{GameState, Phase, walkable};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// One-shot: drop a bomb this tick
    pub drop_bomb: bool,
}

impl TickInput {
    /// Requested step, one component per axis. Opposing keys cancel.
    pub fn dir(&self) -> (i32, i32) {
        let dx = self.right as i32 - self.left as i32;
        let dy = self.down as i32 - self.up as i32;
        (dx, dy)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Finished rounds stay frozen
    if state.phase != Phase::Playing {
        return;
    }

    state.ticks += 1;
    state.time += dt;
    let now = state.time;
    let tile_size = state.config.tile_size;

    // Player input, one sample per tick. The bomb drops on the tile
    // the player occupies before any new step commits: drop and run.
    let (dx, dy) = input.dir();
    for idx in 0..state.actors.len() {
        if !state.actors[idx].alive || !state.actors[idx].is_human() {
            continue;
        }
        if input.drop_bomb {
            state.place_bomb(idx);
        }
        if dx != 0 || dy != 0 {
            state.actors[idx].attempt_move(dx, dy, tile_size, |t| {
                walkable(&state.grid, &state.bombs, t)
            });
        }
    }

    // Scheduled events come due. Everything due this tick fires, in
    // order, so a hitch delays a wave but never drops it.
    while let Some(event) = state.events.pop_due(now) {
        log::info!(
            "wave due at {:.1}s: {} spawns",
            event.due,
            event.spawns.len()
        );
        for spawn in &event.spawns {
            state.spawn_enemy(&spawn.archetype, spawn.tile);
        }
    }

    // Continuous positions glide toward committed tiles
    for actor in state.actors.iter_mut() {
        if actor.alive {
            actor.tick_motion(dt, tile_size);
        }
    }

    // Fuses burn down
    for bomb in state.bombs.iter_mut() {
        if !bomb.resolved {
            bomb.fuse -= dt;
        }
    }

    // Detonations. Due indices are collected first; resolution drags
    // other fuses down but never adds or removes bombs mid-pass.
    let due: Vec<usize> = state
        .bombs
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.resolved && b.fuse <= 0.0)
        .map(|(idx, _)| idx)
        .collect();
    let invulnerability = state.config.invulnerability;
    for idx in due {
        let affected = resolve_blast(
            idx,
            &mut state.bombs,
            &mut state.grid,
            &mut state.explosions,
            &mut state.powerups,
            &state.config,
            &mut state.rng,
        );

        let owner = state.bombs[idx].owner;
        let center = state.bombs[idx].tile;
        let mut hits = 0;
        for actor in state.actors.iter_mut() {
            if actor.alive
                && affected.contains(&actor.tile)
                && actor.take_hit(now, invulnerability)
            {
                hits += 1;
            }
        }
        // The slot comes back even if the owner is mid-chain elsewhere
        if let Some(owner_actor) = state.actors.iter_mut().find(|a| a.id == owner) {
            owner_actor.bombs_placed = owner_actor.bombs_placed.saturating_sub(1);
        }
        log::debug!(
            "bomb at {center} detonated: {} tiles, {hits} hits",
            affected.len()
        );
    }

    // Lingering explosion tiles stay lethal while they burn out
    for actor in state.actors.iter_mut() {
        if !actor.alive {
            continue;
        }
        if state.explosions.iter().any(|e| e.tile == actor.tile) {
            actor.take_hit(now, invulnerability);
        }
    }
    for explosion in state.explosions.iter_mut() {
        explosion.remaining -= dt;
    }

    // Pickups: whoever stands on a drop takes it, list order on ties
    for idx in 0..state.actors.len() {
        if !state.actors[idx].alive {
            continue;
        }
        let tile = state.actors[idx].tile;
        for powerup in state.powerups.iter_mut() {
            if powerup.consumed || powerup.tile != tile {
                continue;
            }
            powerup.consumed = true;
            let actor = &mut state.actors[idx];
            match powerup.kind {
                PowerUpKind::BlastRange => actor.blast_range += 1,
                PowerUpKind::ExtraBomb => actor.max_bombs += 1,
            }
            log::debug!("actor {} picked up {:?} at {tile}", actor.id, powerup.kind);
        }
    }

    // Enemy decisions, each on its own interval clock
    for idx in 0..state.actors.len() {
        if !state.actors[idx].alive {
            continue;
        }
        let interval = state.config.ai.decision_interval;
        let due = match &mut state.actors[idx].controller {
            Controller::Ai(ai_state) => {
                ai_state.decide_in -= dt;
                if ai_state.decide_in <= 0.0 {
                    ai_state.decide_in = interval;
                    true
                } else {
                    false
                }
            }
            Controller::Human => false,
        };
        if !due {
            continue;
        }

        let tile = state.actors[idx].tile;
        let action = {
            let danger = ai::danger_tiles(&state.grid, &state.bombs, state.config.ai.danger_fuse);
            ai::decide(
                tile,
                &danger,
                |t| walkable(&state.grid, &state.bombs, t),
                state.config.ai.bomb_chance,
                &mut state.rng,
            )
        };
        match action {
            AiAction::Move(dir) => {
                let step = dir.delta();
                state.actors[idx].attempt_move(step.x, step.y, tile_size, |t| {
                    walkable(&state.grid, &state.bombs, t)
                });
            }
            AiAction::PlaceBomb => {
                state.place_bomb(idx);
            }
            AiAction::Idle => {}
        }
    }

    // End of round? Losing outranks winning when both land on one tick.
    let outcome = if state.has_human() {
        if state.live_humans() == 0 {
            Some(Phase::Lost)
        } else if state.live_enemies() == 0 && state.events.is_empty() {
            Some(Phase::Won)
        } else {
            None
        }
    } else {
        // AI-only rounds run to the last actor standing
        let alive = state.actors.iter().filter(|a| a.alive).count();
        if alive > 1 || !state.events.is_empty() {
            None
        } else if alive == 1 {
            Some(Phase::Won)
        } else {
            Some(Phase::Draw)
        }
    };
    if let Some(phase) = outcome {
        state.phase = phase;
        state.events.clear();
        log::info!(
            "round over at {:.1}s after {} ticks: {phase:?}",
            state.time,
            state.ticks
        );
    }

    // Compact: one retain pass per list drops everything flagged above
    state.actors.retain(|a| a.alive);
    state.bombs.retain(|b| !b.resolved);
    state.explosions.retain(|e| e.remaining > 0.0);
    state.powerups.retain(|p| !p.consumed);
}
