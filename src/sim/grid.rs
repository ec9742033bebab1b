//! Arena tile grid
//!
//! The arena is a rectangle of tiles: a solid border, solid pillars on
//! even/even interior coordinates, and a random scatter of breakable
//! walls over the rest. Breakable walls are the only part of the grid
//! that changes after generation.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cardinal directions in grid space. Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a fixed order, for deterministic iteration
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One-tile step in this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Direction matching a one-tile step, if any
    pub fn from_delta(step: IVec2) -> Option<Direction> {
        match (step.x, step.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Tile {
    #[default]
    Empty,
    /// Indestructible border/pillar wall
    SolidWall,
    /// Destructible wall, may hide a power-up
    BreakableWall,
}

/// True for tiles the generator always fills with solid wall:
/// the outer border and the even/even interior pillars.
pub fn is_structural(cols: i32, rows: i32, tile: IVec2) -> bool {
    if tile.x == 0 || tile.y == 0 || tile.x == cols - 1 || tile.y == rows - 1 {
        return true;
    }
    tile.x % 2 == 0 && tile.y % 2 == 0
}

/// Rectangular arena of tiles, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    cols: i32,
    rows: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Generate an arena layout.
    ///
    /// Eligible interior tiles become breakable walls with probability
    /// `breakable_density`, except tiles within one orthogonal step of a
    /// `keep_clear` position, which stay empty so freshly spawned actors
    /// have somewhere to go.
    pub fn generate(
        cols: i32,
        rows: i32,
        breakable_density: f32,
        keep_clear: &[IVec2],
        rng: &mut impl Rng,
    ) -> Self {
        let mut grid = Self {
            cols,
            rows,
            tiles: vec![Tile::Empty; (cols * rows) as usize],
        };
        for y in 0..rows {
            for x in 0..cols {
                let tile = IVec2::new(x, y);
                if is_structural(cols, rows, tile) {
                    grid.set(tile, Tile::SolidWall);
                } else if near_spawn(keep_clear, tile) {
                    // spawn pocket stays open
                } else if rng.random::<f32>() < breakable_density {
                    grid.set(tile, Tile::BreakableWall);
                }
            }
        }
        grid
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Tile at a grid coordinate. Out-of-bounds coordinates read as
    /// solid wall, so callers can probe neighbors without bounds checks.
    pub fn at(&self, tile: IVec2) -> Tile {
        if !self.contains(tile) {
            return Tile::SolidWall;
        }
        self.tiles[self.idx(tile)]
    }

    /// Whether an actor could stand here: in bounds and empty
    pub fn is_open(&self, tile: IVec2) -> bool {
        self.at(tile) == Tile::Empty
    }

    /// Remove a breakable wall. Returns true if a wall was destroyed;
    /// solid walls, empty tiles, and out-of-bounds coordinates are no-ops.
    pub fn destroy(&mut self, tile: IVec2) -> bool {
        if self.at(tile) == Tile::BreakableWall {
            self.set(tile, Tile::Empty);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.cols && tile.y < self.rows
    }

    /// Iterate all tiles with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &tile)| {
            let coord = IVec2::new(i as i32 % self.cols, i as i32 / self.cols);
            (coord, tile)
        })
    }

    fn set(&mut self, tile: IVec2, value: Tile) {
        let idx = self.idx(tile);
        self.tiles[idx] = value;
    }

    fn idx(&self, tile: IVec2) -> usize {
        (tile.y * self.cols + tile.x) as usize
    }
}

/// Within one orthogonal step of any spawn position
fn near_spawn(keep_clear: &[IVec2], tile: IVec2) -> bool {
    keep_clear.iter().any(|&spawn| {
        let d = (tile - spawn).abs();
        d.x + d.y <= 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn full_grid(seed: u64) -> TileGrid {
        let mut rng = Pcg32::seed_from_u64(seed);
        TileGrid::generate(15, 13, 1.0, &[IVec2::new(1, 1)], &mut rng)
    }

    #[test]
    fn test_border_and_pillars_are_solid() {
        let grid = full_grid(7);
        for x in 0..15 {
            assert_eq!(grid.at(IVec2::new(x, 0)), Tile::SolidWall);
            assert_eq!(grid.at(IVec2::new(x, 12)), Tile::SolidWall);
        }
        for y in 0..13 {
            assert_eq!(grid.at(IVec2::new(0, y)), Tile::SolidWall);
            assert_eq!(grid.at(IVec2::new(14, y)), Tile::SolidWall);
        }
        assert_eq!(grid.at(IVec2::new(2, 2)), Tile::SolidWall);
        assert_eq!(grid.at(IVec2::new(6, 4)), Tile::SolidWall);
    }

    #[test]
    fn test_spawn_pocket_stays_open() {
        // Density 1.0 fills every eligible tile, so the only empty
        // interior tiles are the cleared cross around the spawn.
        let grid = full_grid(11);
        assert_eq!(grid.at(IVec2::new(1, 1)), Tile::Empty);
        assert_eq!(grid.at(IVec2::new(2, 1)), Tile::Empty);
        assert_eq!(grid.at(IVec2::new(1, 2)), Tile::Empty);
        // Diagonal neighbor is outside the cross
        assert_eq!(grid.at(IVec2::new(3, 3)), Tile::BreakableWall);
    }

    #[test]
    fn test_zero_density_generates_no_breakables() {
        let mut rng = Pcg32::seed_from_u64(3);
        let grid = TileGrid::generate(15, 13, 0.0, &[], &mut rng);
        assert!(grid.iter().all(|(_, t)| t != Tile::BreakableWall));
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(full_grid(42), full_grid(42));
    }

    #[test]
    fn test_out_of_bounds_reads_as_solid() {
        let grid = full_grid(1);
        assert_eq!(grid.at(IVec2::new(-1, 5)), Tile::SolidWall);
        assert_eq!(grid.at(IVec2::new(5, 13)), Tile::SolidWall);
        assert!(!grid.is_open(IVec2::new(15, 6)));
    }

    #[test]
    fn test_destroy_only_affects_breakables() {
        let mut grid = full_grid(5);
        assert!(grid.destroy(IVec2::new(3, 3)));
        assert_eq!(grid.at(IVec2::new(3, 3)), Tile::Empty);
        // Second destroy on the now-empty tile is a no-op
        assert!(!grid.destroy(IVec2::new(3, 3)));
        // Solid wall and out-of-bounds are no-ops
        assert!(!grid.destroy(IVec2::new(0, 0)));
        assert!(!grid.destroy(IVec2::new(-4, 2)));
        assert_eq!(grid.at(IVec2::new(0, 0)), Tile::SolidWall);
    }

    #[test]
    fn test_iter_covers_every_tile() {
        let grid = full_grid(9);
        let mut count = 0;
        for (coord, tile) in grid.iter() {
            assert_eq!(grid.at(coord), tile);
            count += 1;
        }
        assert_eq!(count, 15 * 13);
    }
}
