//! Round setup and balance data
//!
//! A [`GameConfig`] describes everything a round needs before the first
//! tick: arena dimensions, timing rules, the player, and the enemy
//! roster. Configs are plain serde data so rounds can be authored in
//! JSON; the simulation core reads a config once at round start and
//! never writes it back.

use std::collections::BTreeMap;
use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::grid::is_structural;

/// Movement/bomb tuning shared by the player and enemy archetypes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorTuning {
    /// Movement speed in pixels per second
    pub speed: f32,
    /// How many of this actor's bombs may be live at once
    pub max_bombs: u32,
    /// Blast ray length in tiles
    pub blast_range: i32,
}

/// Enemy decision-policy tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTuning {
    /// Seconds between decisions
    pub decision_interval: f32,
    /// Bombs with less fuse left than this are treated as lethal
    pub danger_fuse: f32,
    /// Chance per decision to drop a bomb when not fleeing
    pub bomb_chance: f32,
}

/// One enemy to spawn: which archetype, and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub archetype: String,
    pub tile: IVec2,
}

/// A batch of enemies that enters the round at a scheduled time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Sim-time seconds at which the wave arrives
    pub at: f32,
    pub spawns: Vec<EnemySpawn>,
}

/// Complete round setup
///
/// Every field has a playable default, and deserialization falls back to
/// the default for missing fields, so a JSON config only needs to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub grid_cols: i32,
    pub grid_rows: i32,
    /// Tile edge length in pixels
    pub tile_size: f32,
    /// Chance that an eligible interior tile gets a breakable wall
    pub breakable_density: f32,

    // === Timing ===
    /// Seconds from bomb placement to detonation
    pub bomb_fuse: f32,
    /// Seconds an explosion tile stays lethal
    pub explosion_duration: f32,
    /// Seconds after a registered hit during which further hits are ignored
    pub invulnerability: f32,

    // === Drops ===
    /// Chance that a destroyed wall leaves a power-up behind
    pub powerup_drop_chance: f32,

    // === Roster ===
    pub player_spawn: IVec2,
    pub player: ActorTuning,
    pub ai: AiTuning,
    /// Enemy archetype catalog, keyed by name
    pub archetypes: BTreeMap<String, ActorTuning>,
    /// Enemies present from the first tick
    pub enemy_spawns: Vec<EnemySpawn>,
    /// Enemies that arrive mid-round
    pub waves: Vec<Wave>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut archetypes = BTreeMap::new();
        archetypes.insert(
            "scout".to_string(),
            ActorTuning {
                speed: 96.0,
                max_bombs: 1,
                blast_range: 1,
            },
        );
        archetypes.insert(
            "sapper".to_string(),
            ActorTuning {
                speed: 72.0,
                max_bombs: 2,
                blast_range: 2,
            },
        );

        Self {
            // Arena - classic odd-sized lattice
            grid_cols: 15,
            grid_rows: 13,
            tile_size: 32.0,
            breakable_density: 0.6,

            // Timing
            bomb_fuse: 3.0,
            explosion_duration: 0.4,
            invulnerability: 1.0,

            // Drops
            powerup_drop_chance: 0.25,

            // Roster - player in one corner, enemies in the other three
            player_spawn: IVec2::new(1, 1),
            player: ActorTuning {
                speed: 120.0,
                max_bombs: 1,
                blast_range: 1,
            },
            ai: AiTuning {
                decision_interval: 0.35,
                danger_fuse: 1.2,
                bomb_chance: 0.08,
            },
            archetypes,
            enemy_spawns: vec![
                EnemySpawn {
                    archetype: "scout".to_string(),
                    tile: IVec2::new(13, 1),
                },
                EnemySpawn {
                    archetype: "scout".to_string(),
                    tile: IVec2::new(1, 11),
                },
                EnemySpawn {
                    archetype: "sapper".to_string(),
                    tile: IVec2::new(13, 11),
                },
            ],
            waves: Vec::new(),
        }
    }
}

/// Reason a config was rejected before round start
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Arena has no interior to play in
    GridTooSmall { cols: i32, rows: i32 },
    /// A spawn tile lies outside the arena
    SpawnOutOfBounds { tile: IVec2 },
    /// A spawn tile coincides with a border or pillar wall
    SpawnInsideWall { tile: IVec2 },
    /// A probability field is outside [0, 1]
    BadChance { field: String, value: f32 },
    /// A duration/size/speed field is non-positive or non-finite
    BadValue { field: String, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { cols, rows } => {
                write!(f, "grid {cols}x{rows} is too small, need at least 5x5")
            }
            ConfigError::SpawnOutOfBounds { tile } => {
                write!(f, "spawn tile {tile} is outside the arena")
            }
            ConfigError::SpawnInsideWall { tile } => {
                write!(f, "spawn tile {tile} sits on a border or pillar wall")
            }
            ConfigError::BadChance { field, value } => {
                write!(f, "{field} = {value} is not a probability in [0, 1]")
            }
            ConfigError::BadValue { field, value } => {
                write!(f, "{field} = {value} must be positive and finite")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse a config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject setups the simulation cannot play
    ///
    /// Soft problems (an enemy spawn naming an unknown archetype) are
    /// logged as warnings here and skipped again at spawn time; only
    /// structurally unusable setups return an error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_cols < 5 || self.grid_rows < 5 {
            return Err(ConfigError::GridTooSmall {
                cols: self.grid_cols,
                rows: self.grid_rows,
            });
        }

        check_positive("tile_size", self.tile_size)?;
        check_positive("bomb_fuse", self.bomb_fuse)?;
        check_positive("explosion_duration", self.explosion_duration)?;
        check_non_negative("invulnerability", self.invulnerability)?;
        check_positive("ai.decision_interval", self.ai.decision_interval)?;
        check_positive("ai.danger_fuse", self.ai.danger_fuse)?;
        check_positive("player.speed", self.player.speed)?;

        check_chance("breakable_density", self.breakable_density)?;
        check_chance("powerup_drop_chance", self.powerup_drop_chance)?;
        check_chance("ai.bomb_chance", self.ai.bomb_chance)?;

        for (name, tuning) in &self.archetypes {
            check_positive(&format!("archetypes.{name}.speed"), tuning.speed)?;
        }

        self.check_spawn_tile(self.player_spawn)?;
        for spawn in &self.enemy_spawns {
            self.check_spawn_tile(spawn.tile)?;
        }
        for wave in &self.waves {
            check_non_negative("waves.at", wave.at)?;
            for spawn in &wave.spawns {
                self.check_spawn_tile(spawn.tile)?;
            }
        }

        for spawn in self
            .enemy_spawns
            .iter()
            .chain(self.waves.iter().flat_map(|w| w.spawns.iter()))
        {
            if !self.archetypes.contains_key(&spawn.archetype) {
                log::warn!(
                    "config references unknown archetype {:?}, its spawns will be skipped",
                    spawn.archetype
                );
            }
        }

        Ok(())
    }

    fn check_spawn_tile(&self, tile: IVec2) -> Result<(), ConfigError> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.grid_cols || tile.y >= self.grid_rows {
            return Err(ConfigError::SpawnOutOfBounds { tile });
        }
        if is_structural(self.grid_cols, self.grid_rows, tile) {
            return Err(ConfigError::SpawnInsideWall { tile });
        }
        Ok(())
    }
}

fn check_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::BadValue {
            field: field.to_string(),
            value,
        })
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::BadValue {
            field: field.to_string(),
            value,
        })
    }
}

fn check_chance(field: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::BadChance {
            field: field.to_string(),
            value,
        })
    }
}
