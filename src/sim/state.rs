//! Game state and round lifecycle
//!
//! Everything needed to replay or snapshot a round lives here,
//! including the RNG. Serializing a `GameState` and deserializing it
//! elsewhere resumes the round bit-for-bit.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, AiState, Controller};
use super::bomb::{Bomb, Explosion, PowerUp};
use super::events::{EventQueue, ScheduledEvent};
use super::grid::TileGrid;
use crate::config::{ActorTuning, GameConfig};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active gameplay
    Playing,
    /// Player survived every enemy (or the last AI standing, in
    /// AI-only rounds)
    Won,
    /// Player died
    Lost,
    /// AI-only round where nobody survived
    Draw,
}

/// Whether an actor can stand on this tile: open terrain and no live
/// bomb. Bombs are entities rather than grid tiles, so walkability is
/// a view over both.
pub fn walkable(grid: &TileGrid, bombs: &[Bomb], tile: IVec2) -> bool {
    grid.is_open(tile) && !bombs.iter().any(|b| !b.resolved && b.tile == tile)
}

/// Complete simulation state for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; every draw is part of the simulation
    pub rng: Pcg32,
    /// Rules this round was started with
    pub config: GameConfig,
    /// Simulation tick counter
    pub ticks: u64,
    /// Sim time in seconds
    pub time: f32,
    /// Current phase
    pub phase: Phase,
    /// Arena terrain
    pub grid: TileGrid,
    /// Player and enemies, in spawn order
    pub actors: Vec<Actor>,
    /// Live bombs, in placement order
    pub bombs: Vec<Bomb>,
    /// Lethal explosion tiles still lingering
    pub explosions: Vec<Explosion>,
    /// Uncollected drops
    pub powerups: Vec<PowerUp>,
    /// Pending mid-round events (enemy waves)
    pub events: EventQueue,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a round: generate the arena, queue the waves, and spawn
    /// the player plus the initial enemy roster.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        // Clear a pocket for everyone who will ever enter the round,
        // so late waves do not land inside a wall.
        let mut keep_clear = vec![config.player_spawn];
        keep_clear.extend(config.enemy_spawns.iter().map(|s| s.tile));
        keep_clear.extend(
            config
                .waves
                .iter()
                .flat_map(|w| w.spawns.iter().map(|s| s.tile)),
        );
        let grid = TileGrid::generate(
            config.grid_cols,
            config.grid_rows,
            config.breakable_density,
            &keep_clear,
            &mut rng,
        );

        let mut events = EventQueue::new();
        for wave in &config.waves {
            events.schedule(ScheduledEvent {
                due: wave.at,
                spawns: wave.spawns.clone(),
            });
        }

        let mut state = Self {
            seed,
            rng,
            config,
            ticks: 0,
            time: 0.0,
            phase: Phase::Playing,
            grid,
            actors: Vec::new(),
            bombs: Vec::new(),
            explosions: Vec::new(),
            powerups: Vec::new(),
            events,
            next_id: 1,
        };

        let spawn = state.config.player_spawn;
        let tuning = state.config.player.clone();
        state.spawn_actor(Controller::Human, spawn, &tuning);

        let roster = state.config.enemy_spawns.clone();
        for enemy in &roster {
            state.spawn_enemy(&enemy.archetype, enemy.tile);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_actor(&mut self, controller: Controller, tile: IVec2, tuning: &ActorTuning) -> u32 {
        let id = self.next_entity_id();
        self.actors
            .push(Actor::new(id, controller, tile, tuning, self.config.tile_size));
        id
    }

    /// Spawn one enemy by archetype name. Unknown names and blocked
    /// tiles are logged and skipped rather than failing the round.
    pub fn spawn_enemy(&mut self, archetype: &str, tile: IVec2) -> bool {
        let Some(tuning) = self.config.archetypes.get(archetype).cloned() else {
            log::warn!("unknown enemy archetype {archetype:?} at {tile}, skipping spawn");
            return false;
        };
        if !self.is_walkable(tile) {
            log::warn!("enemy spawn tile {tile} is blocked, skipping spawn");
            return false;
        }
        let interval = self.config.ai.decision_interval;
        let id = self.spawn_actor(Controller::Ai(AiState::new(interval)), tile, &tuning);
        log::debug!("spawned {archetype:?} as actor {id} at {tile}");
        true
    }

    pub fn is_walkable(&self, tile: IVec2) -> bool {
        walkable(&self.grid, &self.bombs, tile)
    }

    /// Place a bomb on the actor's tile. Refused quietly (false) when
    /// the actor is dead, at its live-bomb cap, or the tile already
    /// holds a live bomb.
    pub fn place_bomb(&mut self, actor_idx: usize) -> bool {
        let Some(actor) = self.actors.get(actor_idx) else {
            return false;
        };
        if !actor.alive || actor.bombs_placed >= actor.max_bombs {
            return false;
        }
        let tile = actor.tile;
        if self.bombs.iter().any(|b| !b.resolved && b.tile == tile) {
            return false;
        }

        let (owner, range) = (actor.id, actor.blast_range);
        let fuse = self.config.bomb_fuse;
        let id = self.next_entity_id();
        self.bombs.push(Bomb {
            id,
            tile,
            fuse,
            range,
            owner,
            resolved: false,
        });
        self.actors[actor_idx].bombs_placed += 1;
        log::debug!("actor {owner} placed bomb {id} at {tile}");
        true
    }

    pub fn live_humans(&self) -> usize {
        self.actors.iter().filter(|a| a.alive && a.is_human()).count()
    }

    pub fn live_enemies(&self) -> usize {
        self.actors.iter().filter(|a| a.alive && a.is_ai()).count()
    }

    /// Whether this round has a human slot at all (dead or alive).
    /// Rounds without one use last-standing rules instead of win/lose.
    pub fn has_human(&self) -> bool {
        self.actors.iter().any(|a| a.is_human())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemySpawn, Wave};

    #[test]
    fn test_new_round_spawns_full_roster() {
        let state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.actors.len(), 4);
        assert_eq!(state.live_humans(), 1);
        assert_eq!(state.live_enemies(), 3);
        assert!(state.bombs.is_empty());
        assert!(state.explosions.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.events.is_empty());
        // IDs are dense and start at 1
        let ids: Vec<u32> = state.actors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_waves_are_queued_not_spawned() {
        let mut config = GameConfig::default();
        config.waves.push(Wave {
            at: 30.0,
            spawns: vec![EnemySpawn {
                archetype: "scout".to_string(),
                tile: IVec2::new(7, 1),
            }],
        });
        let state = GameState::new(config, 1);
        assert_eq!(state.actors.len(), 4);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_unknown_archetype_is_skipped() {
        let mut config = GameConfig::default();
        config.enemy_spawns.push(EnemySpawn {
            archetype: "dragon".to_string(),
            tile: IVec2::new(7, 5),
        });
        let state = GameState::new(config, 1);
        // The three known enemies spawned, the dragon did not
        assert_eq!(state.actors.len(), 4);
    }

    #[test]
    fn test_spawn_tiles_are_kept_clear() {
        // Even at full density every spawn tile must be open
        let config = GameConfig {
            breakable_density: 1.0,
            ..Default::default()
        };
        let state = GameState::new(config, 99);
        for actor in &state.actors {
            assert!(state.grid.is_open(actor.tile));
        }
    }

    #[test]
    fn test_place_bomb_respects_cap() {
        let mut state = GameState::new(GameConfig::default(), 1);
        // Default player cap is one live bomb
        assert!(state.place_bomb(0));
        assert_eq!(state.actors[0].bombs_placed, 1);
        assert!(!state.place_bomb(0));
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_place_bomb_refuses_occupied_tile() {
        let mut state = GameState::new(GameConfig::default(), 1);
        // Park a second actor on the player's tile
        let player_tile = state.actors[0].tile;
        assert!(state.spawn_enemy("sapper", player_tile));
        let enemy_idx = state.actors.len() - 1;

        assert!(state.place_bomb(0));
        assert!(!state.place_bomb(enemy_idx));
        assert_eq!(state.bombs.len(), 1);
        assert_eq!(state.actors[enemy_idx].bombs_placed, 0);
    }

    #[test]
    fn test_dead_actor_cannot_place() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.actors[0].take_hit(0.0, 1.0);
        assert!(!state.place_bomb(0));
    }

    #[test]
    fn test_live_bomb_blocks_walkability() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let tile = state.actors[0].tile;
        assert!(state.is_walkable(tile));
        state.place_bomb(0);
        assert!(!state.is_walkable(tile));
        // A resolved bomb no longer blocks
        state.bombs[0].resolved = true;
        assert!(state.is_walkable(tile));
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = GameState::new(GameConfig::default(), 7777);
        let b = GameState::new(GameConfig::default(), 7777);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
