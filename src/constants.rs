//! Shared constants and the grid cell alphabet.

use glam::Vec2;

/// Logical rendering surface width, in pixels.
pub const WORLD_WIDTH: f32 = 1920.0;
/// Logical rendering surface height, in pixels.
pub const WORLD_HEIGHT: f32 = 1080.0;
/// Logical rendering surface size, in pixels.
pub const WORLD_SIZE: Vec2 = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);

/// Side length of one grid cell, in pixels.
pub const TILE_SIZE: f32 = 100.0;

/// Built-in stage file, used when no path is given on the command line.
pub const DEFAULT_STAGES: &str = "\
STAGE_START
STAGE_ID:1
COLUMN:8
ROW:6
ACTION_PER_TURN:2
PATTERN_START
DISPENSER:L4
GUARD_MONSTER:U2D2
PATTERN_END
MAP_START
P---X--G
----X---
--m-X---
--------
------D-
M-------
MAP_END
STAGE_END
";

/// Everything a grid cell can hold, keyed by its map character.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tile {
    /// Open floor, `-`.
    Open,
    /// Impassable wall, `X`.
    Wall,
    /// Goal cell, `G`.
    Goal,
    /// The player, `P`.
    Player,
    /// A pursuit monster, `M`.
    Tracer,
    /// A patrol monster, `m`.
    Guard,
    /// An arrow dispenser, `D`.
    Dispenser,
    /// An arrow in flight, `A`.
    Arrow,
}

impl Tile {
    /// Maps a stage-file character to its tile, or `None` for unknown input.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '-' => Some(Tile::Open),
            'X' => Some(Tile::Wall),
            'G' => Some(Tile::Goal),
            'P' => Some(Tile::Player),
            'M' => Some(Tile::Tracer),
            'm' => Some(Tile::Guard),
            'D' => Some(Tile::Dispenser),
            'A' => Some(Tile::Arrow),
            _ => None,
        }
    }

    /// Returns the character this tile renders as.
    pub fn as_char(&self) -> char {
        match self {
            Tile::Open => '-',
            Tile::Wall => 'X',
            Tile::Goal => 'G',
            Tile::Player => 'P',
            Tile::Tracer => 'M',
            Tile::Guard => 'm',
            Tile::Dispenser => 'D',
            Tile::Arrow => 'A',
        }
    }
}
