//! The closed set of non-player actors and their per-turn update contracts.
//!
//! Each variant owns its grid position, its derived pixel position, and the
//! state its behavior needs (a pattern cursor or a travel direction). Failure
//! to move is always local: the entity simply stays put for the turn.

use glam::{IVec2, Vec2};
use tracing::debug;

use crate::constants::Tile;
use crate::direction::Direction;
use crate::grid::Grid;
use crate::pathfinder;
use crate::pattern::BehaviorPattern;

/// The kind-specific state of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// Re-runs the shortest-path search toward the player every turn and
    /// takes the first step of the result.
    Tracer,
    /// Steps along its cyclic pattern; blocked steps are skipped but still
    /// consume the cursor.
    Guard { pattern: BehaviorPattern },
    /// Immobile; spawns an arrow into the adjacent cell named by its pattern.
    Dispenser { pattern: BehaviorPattern },
    /// Travels in a straight line until its step fails, which is the signal
    /// for the turn engine to remove it.
    Arrow { direction: Direction },
}

/// A live actor on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Grid position, in cells.
    pub cell: IVec2,
    /// Pixel position, derived from the grid position.
    pub pixel: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    fn new(grid: &Grid, cell: IVec2, kind: EntityKind) -> Entity {
        Entity {
            cell,
            pixel: grid.cell_to_pixel(cell),
            kind,
        }
    }

    pub fn new_tracer(grid: &Grid, cell: IVec2) -> Entity {
        Entity::new(grid, cell, EntityKind::Tracer)
    }

    pub fn new_guard(grid: &Grid, cell: IVec2, pattern: BehaviorPattern) -> Entity {
        Entity::new(grid, cell, EntityKind::Guard { pattern })
    }

    pub fn new_dispenser(grid: &Grid, cell: IVec2, pattern: BehaviorPattern) -> Entity {
        Entity::new(grid, cell, EntityKind::Dispenser { pattern })
    }

    pub fn new_arrow(grid: &Grid, cell: IVec2, direction: Direction) -> Entity {
        Entity::new(grid, cell, EntityKind::Arrow { direction })
    }

    /// Returns the grid symbol this entity occupies its cell with.
    pub fn symbol(&self) -> Tile {
        match self.kind {
            EntityKind::Tracer => Tile::Tracer,
            EntityKind::Guard { .. } => Tile::Guard,
            EntityKind::Dispenser { .. } => Tile::Dispenser,
            EntityKind::Arrow { .. } => Tile::Arrow,
        }
    }

    pub fn is_tracer(&self) -> bool {
        matches!(self.kind, EntityKind::Tracer)
    }

    pub fn is_guard(&self) -> bool {
        matches!(self.kind, EntityKind::Guard { .. })
    }

    pub fn is_dispenser(&self) -> bool {
        matches!(self.kind, EntityKind::Dispenser { .. })
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self.kind, EntityKind::Arrow { .. })
    }

    fn move_to(&mut self, grid: &mut Grid, destination: IVec2, symbol: Tile) {
        grid.set(self.cell, Tile::Open);
        grid.set(destination, symbol);
        self.cell = destination;
        self.pixel = grid.cell_to_pixel(destination);
    }

    /// Steps the arrow one cell along its travel direction.
    ///
    /// When the destination fails the bounds/wall/dispenser check the position
    /// is left untouched; the turn engine reads the unchanged position as the
    /// removal signal.
    pub(crate) fn update_arrow(&mut self, grid: &mut Grid) {
        let direction = match &self.kind {
            EntityKind::Arrow { direction } => *direction,
            _ => return,
        };

        let destination = self.cell + direction.offset();
        if !grid.is_walkable(destination) {
            return;
        }
        self.move_to(grid, destination, Tile::Arrow);
    }

    /// Re-runs the path search toward the player and takes the first step.
    ///
    /// The search treats occupied cells as walkable, but the actual step is
    /// refused when another monster or an arrow stands on the next cell; the
    /// tracer then holds position for the turn.
    pub(crate) fn update_tracer(&mut self, grid: &mut Grid, player_cell: IVec2) {
        if !self.is_tracer() {
            return;
        }

        let path = pathfinder::find_path(grid, self.cell, player_cell);
        if path.len() <= 1 {
            debug!(cell = ?self.cell, "Tracer is blocked or already at the player");
            return;
        }

        let next = path[1];
        if matches!(grid.get(next), Some(Tile::Tracer | Tile::Guard | Tile::Arrow)) {
            debug!(cell = ?self.cell, ?next, "Tracer step blocked by another entity");
            return;
        }
        self.move_to(grid, next, Tile::Tracer);
    }

    /// Steps the guard along its pattern's current direction.
    ///
    /// The cursor advances whether or not the step succeeds; only a step into
    /// an in-bounds open cell actually moves the guard.
    pub(crate) fn update_guard(&mut self, grid: &mut Grid) {
        let cell = self.cell;
        let EntityKind::Guard { pattern } = &mut self.kind else {
            return;
        };
        let Some(direction) = pattern.current() else {
            return;
        };
        pattern.advance();

        let destination = cell + direction.offset();
        if grid.get(destination) != Some(Tile::Open) {
            debug!(?cell, ?destination, "Guard step blocked");
            return;
        }
        self.move_to(grid, destination, Tile::Guard);
    }

    /// Consumes one pattern step and, when legal, spawns an arrow.
    ///
    /// The cursor advances unconditionally; the spawn happens only when the
    /// destination is an in-bounds open cell. Spawned arrows go into `spawned`
    /// so they join the live set after the current pass, never acting in the
    /// sub-turn they were created.
    pub(crate) fn update_dispenser(&mut self, grid: &mut Grid, spawned: &mut Vec<Entity>) {
        let cell = self.cell;
        let EntityKind::Dispenser { pattern } = &mut self.kind else {
            return;
        };
        let Some(direction) = pattern.current() else {
            return;
        };
        pattern.advance();

        let destination = cell + direction.offset();
        // Open implies in-bounds and neither wall nor dispenser.
        if grid.get(destination) != Some(Tile::Open) {
            return;
        }

        grid.set(destination, Tile::Arrow);
        spawned.push(Entity::new_arrow(grid, destination, direction));
        debug!(?cell, ?destination, "Dispenser spawned an arrow");
    }
}
