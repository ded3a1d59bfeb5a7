//! The turn engine: action queue, sub-turn resolution order, and reset.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::Tile;
use crate::entity::Entity;
use crate::grid::Grid;
use crate::player::{Action, Player};

/// The frozen copy of everything mutable, captured at construction time so
/// `reset` never has to re-parse the stage source.
#[derive(Debug, Clone)]
struct Snapshot {
    grid: Grid,
    player: Player,
    entities: SmallVec<[Entity; 8]>,
}

/// One playable stage: the authoritative grid, the live entity set, the
/// player, and the bounded queue of not-yet-resolved actions.
///
/// All mutation of the grid flows through this type's single control flow, in
/// the fixed sub-turn order of [`Stage::advance`].
#[derive(Debug, Clone)]
pub struct Stage {
    id: u32,
    actions_per_turn: usize,
    grid: Grid,
    player: Player,
    entities: SmallVec<[Entity; 8]>,
    actions: VecDeque<Action>,
    initial: Snapshot,
}

impl Stage {
    /// Builds a stage and captures its initial snapshot.
    pub fn new(id: u32, actions_per_turn: usize, grid: Grid, player: Player, entities: Vec<Entity>) -> Stage {
        let entities: SmallVec<[Entity; 8]> = entities.into();
        let initial = Snapshot {
            grid: grid.clone(),
            player: player.clone(),
            entities: entities.clone(),
        };
        debug!(
            stage = id,
            columns = grid.columns(),
            rows = grid.rows(),
            entities = entities.len(),
            "Stage created"
        );
        Stage {
            id,
            actions_per_turn,
            grid,
            player,
            entities,
            actions: VecDeque::with_capacity(actions_per_turn),
            initial,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn columns(&self) -> i32 {
        self.grid.columns()
    }

    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    pub fn actions_per_turn(&self) -> usize {
        self.actions_per_turn
    }

    /// The number of queued, not-yet-resolved actions.
    pub fn pending_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn player_position(&self) -> IVec2 {
        self.player.cell
    }

    /// Read-only view of the grid, for rendering and inspection.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Enumerates the moving pieces as `(symbol, pixel position)` pairs,
    /// player last. Terrain comes from [`Stage::grid`].
    pub fn drawables(&self) -> impl Iterator<Item = (Tile, Vec2)> + '_ {
        self.entities
            .iter()
            .map(|entity| (entity.symbol(), entity.pixel))
            .chain(std::iter::once((Tile::Player, self.player.pixel)))
    }

    /// Queues one player action. Silently ignored once the queue holds
    /// `actions_per_turn` entries.
    pub fn add_action(&mut self, action: Action) {
        if self.actions.len() >= self.actions_per_turn {
            debug!(stage = self.id, ?action, "Action queue full, ignoring");
            return;
        }
        self.actions.push_back(action);
    }

    /// True once the queue is at capacity and `advance` should run.
    pub fn reached_max_actions(&self) -> bool {
        self.actions.len() >= self.actions_per_turn
    }

    /// Removes the most recently queued action. No-op on an empty queue.
    pub fn undo_last_action(&mut self) {
        if self.actions.pop_back().is_none() {
            debug!(stage = self.id, "No actions to undo");
        }
    }

    /// Resolves up to `actions_per_turn` queued actions, one sub-turn each,
    /// stopping early when the queue empties.
    ///
    /// Each sub-turn runs in a fixed order: arrows first (marking stopped
    /// ones for removal), then tracers, guards, and dispensers, then the
    /// removal of stopped arrows, and finally one player action. Arrows
    /// spawned this sub-turn are buffered and never act before the next one.
    pub fn advance(&mut self) {
        debug!(stage = self.id, budget = self.actions_per_turn, "Advancing stage");
        for _ in 0..self.actions_per_turn {
            if self.actions.is_empty() {
                debug!(stage = self.id, "No more actions to resolve");
                break;
            }
            self.resolve_entities();
            self.resolve_player();
        }
        self.print();
    }

    fn resolve_entities(&mut self) {
        // Phase 1: arrows fly. A stopped arrow vacates its cell immediately
        // but stays in the set until phase 3 so indices remain stable.
        let mut stopped: SmallVec<[usize; 4]> = SmallVec::new();
        for (index, entity) in self.entities.iter_mut().enumerate() {
            if !entity.is_arrow() {
                continue;
            }
            let before = entity.cell;
            entity.update_arrow(&mut self.grid);
            if entity.cell == before {
                // Clears the symbol even when an earlier arrow moved into
                // this cell during the same pass; the survivor keeps flying
                // and writes its symbol again on its next step.
                self.grid.set(entity.cell, Tile::Open);
                stopped.push(index);
            }
        }

        // Phase 2: tracers see the grid before guards move; dispensers spawn
        // into a buffer so new arrows never act in the sub-turn of their birth.
        let player_cell = self.player.cell;
        for entity in self.entities.iter_mut().filter(|e| e.is_tracer()) {
            entity.update_tracer(&mut self.grid, player_cell);
        }
        for entity in self.entities.iter_mut().filter(|e| e.is_guard()) {
            entity.update_guard(&mut self.grid);
        }
        let mut spawned = Vec::new();
        for entity in self.entities.iter_mut().filter(|e| e.is_dispenser()) {
            entity.update_dispenser(&mut self.grid, &mut spawned);
        }
        self.entities.extend(spawned);

        // Phase 3: drop stopped arrows, highest index first so earlier
        // removals don't shift the later ones.
        for &index in stopped.iter().rev() {
            self.entities.remove(index);
            debug!(stage = self.id, index, "Removed stopped arrow");
        }
    }

    fn resolve_player(&mut self) {
        let Some(action) = self.actions.pop_front() else {
            return;
        };
        self.player.update(&mut self.grid, action);
    }

    /// Restores grid, entities, and player from the initial snapshot and
    /// clears the action queue.
    pub fn reset(&mut self) {
        debug!(stage = self.id, "Resetting stage to initial state");
        self.grid = self.initial.grid.clone();
        self.player = self.initial.player.clone();
        self.entities = self.initial.entities.clone();
        self.actions.clear();
        self.print();
    }

    /// Dumps the tile map through the tracing layer.
    pub fn print(&self) {
        debug!(
            stage = self.id,
            actions_per_turn = self.actions_per_turn,
            pending = self.actions.len(),
            "Stage state:\n{}",
            self.grid
        );
    }
}
