//! Reactive enemy policy
//!
//! Enemies re-evaluate on a fixed interval instead of every tick. The
//! policy is a two-level priority: survival first (flee any predicted
//! blast footprint), then light aggression (occasionally drop a bomb,
//! otherwise wander one random step).

use glam::IVec2;
use rand::Rng;

use super::bomb::{Bomb, prospective_blast};
use super::grid::{Direction, TileGrid};

/// What an enemy decided to do this interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Move(Direction),
    PlaceBomb,
    Idle,
}

/// Tiles covered by the predicted footprint of every live bomb whose
/// fuse has burned below `danger_fuse`. Footprints come from the same
/// ray walk real detonations use, so the prediction is exact as long
/// as the terrain does not change before the bomb fires.
pub fn danger_tiles(grid: &TileGrid, bombs: &[Bomb], danger_fuse: f32) -> Vec<IVec2> {
    let mut tiles: Vec<IVec2> = Vec::new();
    for bomb in bombs {
        if bomb.resolved || bomb.fuse >= danger_fuse {
            continue;
        }
        for tile in prospective_blast(grid, bomb.tile, bomb.range) {
            if !tiles.contains(&tile) {
                tiles.push(tile);
            }
        }
    }
    tiles
}

/// One decision for an enemy standing on `tile`.
///
/// In danger, the enemy picks uniformly among adjacent tiles that are
/// walkable and outside the danger set, and holds still when boxed in.
/// Out of danger it places a bomb with probability `bomb_chance`, else
/// takes a uniform pick over the four directions and standing still.
/// A wander step into a wall is fine; the move request just fails.
pub fn decide(
    tile: IVec2,
    danger: &[IVec2],
    is_walkable: impl Fn(IVec2) -> bool,
    bomb_chance: f32,
    rng: &mut impl Rng,
) -> AiAction {
    if danger.contains(&tile) {
        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| {
                let next = tile + dir.delta();
                is_walkable(next) && !danger.contains(&next)
            })
            .collect();
        return match safe.len() {
            0 => AiAction::Idle,
            n => AiAction::Move(safe[rng.random_range(0..n)]),
        };
    }

    if rng.random::<f32>() < bomb_chance {
        return AiAction::PlaceBomb;
    }

    match rng.random_range(0..5u32) {
        0 => AiAction::Move(Direction::Up),
        1 => AiAction::Move(Direction::Down),
        2 => AiAction::Move(Direction::Left),
        3 => AiAction::Move(Direction::Right),
        _ => AiAction::Idle,
    }
}
