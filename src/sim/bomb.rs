//! Bombs, blast resolution, and the power-ups blasts uncover
//!
//! A detonation walks four cardinal rays outward from the bomb tile.
//! Each ray stops at the arena edge or a solid wall (excluded), or at
//! the first breakable wall (included, then stopped). Walls on the
//! blast edge are consumed by a single detonation; tiles behind them
//! are untouched. Bombs never block a ray, but a ray passing over one
//! drags its fuse down so it follows quickly.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Tile, TileGrid};
use crate::config::GameConfig;

/// A placed bomb counting down to detonation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub tile: IVec2,
    /// Seconds until detonation
    pub fuse: f32,
    /// Blast ray length in tiles
    pub range: i32,
    /// Actor credited a bomb slot back when this resolves
    pub owner: u32,
    /// Set during resolution; resolved bombs are pruned at end of tick
    pub resolved: bool,
}

/// Shape of one explosion tile, for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionVariant {
    /// The bomb tile itself
    Center,
    /// Mid-ray tile
    Arm(Direction),
    /// Last tile of a ray: range exhausted or a wall consumed
    Cap(Direction),
}

/// One lethal tile of a blast, lingering for its visual duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub tile: IVec2,
    pub variant: ExplosionVariant,
    /// Seconds of lethality left
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Permanently lengthens the collector's blast rays by one tile
    BlastRange,
    /// Permanently raises the collector's live-bomb cap by one
    ExtraBomb,
}

/// A collectible left behind by a destroyed wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub tile: IVec2,
    pub kind: PowerUpKind,
    /// Set on pickup; consumed power-ups are pruned at end of tick
    pub consumed: bool,
}

/// Detonate `bombs[idx]`: emit explosion tiles, destroy walls on the
/// blast edge, roll power-up drops, and drag the fuse of any bomb a ray
/// passes over down to the explosion duration so chains follow quickly.
///
/// Returns every tile the blast covers, for the caller's damage pass.
/// The walk must agree with [`prospective_blast`], which the enemy
/// policy uses to predict these footprints.
pub fn resolve_blast(
    idx: usize,
    bombs: &mut [Bomb],
    grid: &mut TileGrid,
    explosions: &mut Vec<Explosion>,
    powerups: &mut Vec<PowerUp>,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<IVec2> {
    let center = bombs[idx].tile;
    let range = bombs[idx].range;
    let duration = config.explosion_duration;
    bombs[idx].resolved = true;

    let mut affected = vec![center];
    explosions.push(Explosion {
        tile: center,
        variant: ExplosionVariant::Center,
        remaining: duration,
    });

    for dir in Direction::ALL {
        for step in 1..=range {
            let tile = center + dir.delta() * step;
            match grid.at(tile) {
                // Out-of-bounds reads as solid, so both stop the ray here
                Tile::SolidWall => break,
                Tile::BreakableWall => {
                    affected.push(tile);
                    explosions.push(Explosion {
                        tile,
                        variant: ExplosionVariant::Cap(dir),
                        remaining: duration,
                    });
                    grid.destroy(tile);
                    if rng.random::<f32>() < config.powerup_drop_chance {
                        let kind = if rng.random_bool(0.5) {
                            PowerUpKind::BlastRange
                        } else {
                            PowerUpKind::ExtraBomb
                        };
                        powerups.push(PowerUp {
                            tile,
                            kind,
                            consumed: false,
                        });
                    }
                    break;
                }
                Tile::Empty => {
                    affected.push(tile);
                    let variant = if step == range {
                        ExplosionVariant::Cap(dir)
                    } else {
                        ExplosionVariant::Arm(dir)
                    };
                    explosions.push(Explosion {
                        tile,
                        variant,
                        remaining: duration,
                    });
                    for other in bombs.iter_mut() {
                        if !other.resolved && other.tile == tile && other.fuse > duration {
                            other.fuse = duration;
                        }
                    }
                }
            }
        }
    }

    affected
}

/// The footprint a bomb at `center` would cover if it detonated now,
/// without touching anything. Same ray walk as [`resolve_blast`].
pub fn prospective_blast(grid: &TileGrid, center: IVec2, range: i32) -> Vec<IVec2> {
    let mut tiles = vec![center];
    for dir in Direction::ALL {
        for step in 1..=range {
            let tile = center + dir.delta() * step;
            match grid.at(tile) {
                Tile::SolidWall => break,
                Tile::BreakableWall => {
                    tiles.push(tile);
                    break;
                }
                Tile::Empty => tiles.push(tile),
            }
        }
    }
    tiles
}
