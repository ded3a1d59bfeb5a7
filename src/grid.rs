//! This module defines the shared tile grid and its grid/pixel coordinate mapping.

use std::fmt;

use glam::{IVec2, Vec2};

use crate::constants::{Tile, WORLD_SIZE};

/// The shared tile grid, the single source of truth for occupancy.
///
/// Dimensions are fixed for the lifetime of a stage. The grid is mutated only
/// by the turn engine during resolution; everything else reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: i32,
    rows: i32,
    tiles: Vec<Tile>,
    /// Pixel position of cell (0, 0), chosen so the grid is centered in the world.
    origin: Vec2,
    tile_size: f32,
}

impl Grid {
    /// Creates a grid of the given dimensions filled with open space, centered
    /// in the world at the given tile size.
    pub fn new(columns: i32, rows: i32, tile_size: f32) -> Grid {
        debug_assert!(columns > 0 && rows > 0);
        let origin = (WORLD_SIZE - Vec2::new(columns as f32, rows as f32) * tile_size) / 2.0;
        Grid {
            columns,
            rows,
            tiles: vec![Tile::Open; (columns * rows) as usize],
            origin,
            tile_size,
        }
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Returns whether the cell lies inside `[0, columns) × [0, rows)`.
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.columns && cell.y >= 0 && cell.y < self.rows
    }

    /// Returns the symbol at the given cell, or `None` out of bounds.
    pub fn get(&self, cell: IVec2) -> Option<Tile> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.tiles[(cell.y * self.columns + cell.x) as usize])
    }

    /// Sets the symbol at the given cell. Returns false out of bounds.
    pub fn set(&mut self, cell: IVec2, tile: Tile) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        self.tiles[(cell.y * self.columns + cell.x) as usize] = tile;
        true
    }

    /// Returns whether the cell can be stepped into or searched through.
    ///
    /// Only out-of-bounds, wall, and dispenser cells are impassable.
    /// Entity-occupied cells count as walkable: the path search is allowed to
    /// route through monsters even though the actual step onto an occupied
    /// cell is refused at resolution time.
    pub fn is_walkable(&self, cell: IVec2) -> bool {
        !matches!(self.get(cell), None | Some(Tile::Wall) | Some(Tile::Dispenser))
    }

    /// Converts cell coordinates to the pixel position of the cell's top-left corner.
    pub fn cell_to_pixel(&self, cell: IVec2) -> Vec2 {
        self.origin + cell.as_vec2() * self.tile_size
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.columns {
                write!(f, "{}", self.tiles[(y * self.columns + x) as usize].as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
