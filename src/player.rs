//! The player singleton and the queued action vocabulary.

use glam::{IVec2, Vec2};
use tracing::debug;

use crate::constants::Tile;
use crate::direction::Direction;
use crate::grid::Grid;

/// One queued player action.
///
/// Anything without movement semantics resolves as `None`, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    None,
}

impl Action {
    /// Returns the movement direction, or `None` for non-movement actions.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Action::MoveUp => Some(Direction::Up),
            Action::MoveDown => Some(Direction::Down),
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            Action::None => None,
        }
    }
}

/// The user-driven singleton entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Grid position, in cells.
    pub cell: IVec2,
    /// Pixel position, derived from the grid position.
    pub pixel: Vec2,
}

impl Player {
    pub fn new(grid: &Grid, cell: IVec2) -> Player {
        Player {
            cell,
            pixel: grid.cell_to_pixel(cell),
        }
    }

    /// Resolves one action against the grid.
    ///
    /// Moves validate with the bounds/wall/dispenser check; an illegal move
    /// changes nothing. A successful move clears the old cell and writes the
    /// player symbol at the destination.
    pub(crate) fn update(&mut self, grid: &mut Grid, action: Action) {
        let Some(direction) = action.direction() else {
            return;
        };

        let destination = self.cell + direction.offset();
        if !grid.is_walkable(destination) {
            debug!(cell = ?self.cell, ?destination, "Player move blocked");
            return;
        }

        grid.set(self.cell, Tile::Open);
        grid.set(destination, Tile::Player);
        self.cell = destination;
        self.pixel = grid.cell_to_pixel(destination);
        debug!(cell = ?self.cell, "Player moved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_move_updates_grid_and_positions() {
        let mut grid = Grid::new(3, 3, 100.0);
        grid.set(IVec2::new(1, 1), Tile::Player);
        let mut player = Player::new(&grid, IVec2::new(1, 1));

        player.update(&mut grid, Action::MoveRight);
        assert_eq!(player.cell, IVec2::new(2, 1));
        assert_eq!(player.pixel, grid.cell_to_pixel(IVec2::new(2, 1)));
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(Tile::Open));
        assert_eq!(grid.get(IVec2::new(2, 1)), Some(Tile::Player));
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let mut grid = Grid::new(2, 1, 100.0);
        grid.set(IVec2::new(0, 0), Tile::Player);
        grid.set(IVec2::new(1, 0), Tile::Wall);
        let mut player = Player::new(&grid, IVec2::new(0, 0));

        player.update(&mut grid, Action::MoveRight);
        player.update(&mut grid, Action::MoveUp);
        assert_eq!(player.cell, IVec2::new(0, 0));
        assert_eq!(grid.get(IVec2::new(0, 0)), Some(Tile::Player));
    }

    #[test]
    fn test_none_action_is_a_no_op() {
        let mut grid = Grid::new(2, 1, 100.0);
        grid.set(IVec2::new(0, 0), Tile::Player);
        let mut player = Player::new(&grid, IVec2::new(0, 0));

        player.update(&mut grid, Action::None);
        assert_eq!(player.cell, IVec2::new(0, 0));
    }
}
