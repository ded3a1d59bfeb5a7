//! Stage-file parsing: turns the textual stage-block format into live stages.
//!
//! A stage file holds any number of blocks shaped like:
//!
//! ```text
//! STAGE_START
//! STAGE_ID:1
//! COLUMN:8
//! ROW:6
//! ACTION_PER_TURN:2
//! PATTERN_START
//! DISPENSER:L4
//! GUARD_MONSTER:U2D2;R4
//! PATTERN_END
//! MAP_START
//! ## comment lines are skipped
//! P---X--G
//! MAP_END
//! STAGE_END
//! ```
//!
//! Malformed blocks are skipped with a warning and excluded from the result;
//! the loader itself never fails.

use std::path::Path;

use glam::IVec2;
use tracing::{debug, warn};

use crate::constants::{Tile, TILE_SIZE};
use crate::entity::Entity;
use crate::error::{GameError, GameResult, ParseError};
use crate::grid::Grid;
use crate::pattern::BehaviorPattern;
use crate::player::Player;
use crate::stage::Stage;

const STAGE_START: &str = "STAGE_START";
const STAGE_END: &str = "STAGE_END";
const PATTERN_START: &str = "PATTERN_START";
const PATTERN_END: &str = "PATTERN_END";
const MAP_START: &str = "MAP_START";
const MAP_END: &str = "MAP_END";
const COMMENT: &str = "##";

const KEY_STAGE_ID: &str = "STAGE_ID:";
const KEY_COLUMN: &str = "COLUMN:";
const KEY_ROW: &str = "ROW:";
const KEY_ACTION_PER_TURN: &str = "ACTION_PER_TURN:";
const KEY_DISPENSER: &str = "DISPENSER:";
const KEY_GUARD_MONSTER: &str = "GUARD_MONSTER:";

/// Reads and parses a stage file, failing when nothing playable remains.
pub fn load_stages(path: &Path) -> GameResult<Vec<Stage>> {
    let source = std::fs::read_to_string(path)?;
    let stages = parse_stages(&source);
    if stages.is_empty() {
        return Err(GameError::NoStages(path.display().to_string()));
    }
    Ok(stages)
}

/// Parses every stage block in `source`.
///
/// Blocks that fail to parse are logged and dropped; the remaining stages are
/// returned in file order.
pub fn parse_stages(source: &str) -> Vec<Stage> {
    let mut stages = Vec::new();
    let mut lines = source.lines();

    while let Some(line) = lines.next() {
        if line.trim() != STAGE_START {
            continue;
        }
        match parse_stage(&mut lines) {
            Ok(stage) => {
                debug!(stage = stage.id(), "Stage loaded");
                stage.print();
                stages.push(stage);
            }
            Err(error) => {
                warn!("Skipping invalid stage block: {error}");
                // Resynchronize on the block terminator, unless the error
                // already left the cursor at or past it. Scanning again would
                // eat the next block's opening lines.
                if !matches!(error, ParseError::MissingMap(_) | ParseError::UnexpectedEof) {
                    for line in lines.by_ref() {
                        if line.trim() == STAGE_END {
                            break;
                        }
                    }
                }
            }
        }
    }

    stages
}

/// Expands the `<letter><count>` shorthand: `U2D2L4` becomes `UUDDLLLL`.
///
/// Multi-digit counts are supported; separators and other non-alphanumeric
/// characters pass through untouched.
pub fn expand_pattern(pattern: &str) -> String {
    let mut expanded = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_ascii_alphabetic() {
            let mut count: usize = 0;
            let mut has_count = false;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                has_count = true;
                count = count * 10 + digit as usize;
                chars.next();
            }
            if has_count {
                for _ in 0..count {
                    expanded.push(ch);
                }
            } else {
                expanded.push(ch);
            }
        } else if !ch.is_ascii_digit() {
            expanded.push(ch);
        }
    }

    expanded
}

/// Semicolon-separated pattern segments, one per entity in map discovery
/// order. When the segments run out the last one is shared.
struct Segments {
    parts: Vec<String>,
    cursor: usize,
}

impl Segments {
    fn new(pattern: &str) -> Segments {
        Segments {
            parts: pattern.split(';').map(|part| part.trim().to_string()).collect(),
            cursor: 0,
        }
    }

    fn next(&mut self) -> &str {
        let index = self.cursor.min(self.parts.len() - 1);
        if self.cursor < self.parts.len() {
            self.cursor += 1;
        }
        &self.parts[index]
    }
}

fn parse_field(line: &str, key: &'static str) -> Result<i32, ParseError> {
    let value = line[key.len()..].trim();
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field: &key[..key.len() - 1],
        value: value.to_string(),
    })
}

/// Parses one stage block, starting just after `STAGE_START`.
fn parse_stage(lines: &mut std::str::Lines) -> Result<Stage, ParseError> {
    let mut stage_id = 0;
    let mut column = 0;
    let mut row = 0;
    let mut action_per_turn = 1;

    // Header fields, order-independent, until a pattern or map block begins.
    let mut in_pattern_block = false;
    loop {
        let line = lines.next().ok_or(ParseError::UnexpectedEof)?.trim();
        if line.starts_with(KEY_STAGE_ID) {
            stage_id = parse_field(line, KEY_STAGE_ID)?;
        } else if line.starts_with(KEY_COLUMN) {
            column = parse_field(line, KEY_COLUMN)?;
        } else if line.starts_with(KEY_ROW) {
            row = parse_field(line, KEY_ROW)?;
        } else if line.starts_with(KEY_ACTION_PER_TURN) {
            action_per_turn = parse_field(line, KEY_ACTION_PER_TURN)?;
        } else if line == PATTERN_START {
            in_pattern_block = true;
            break;
        } else if line == MAP_START {
            break;
        } else if line == STAGE_END {
            return Err(ParseError::MissingMap(stage_id.max(0) as u32));
        }
    }

    if stage_id <= 0 || column <= 0 || row <= 0 || action_per_turn <= 0 {
        return Err(ParseError::InvalidHeader(format!(
            "STAGE_ID:{stage_id} COLUMN:{column} ROW:{row} ACTION_PER_TURN:{action_per_turn}"
        )));
    }

    // Pattern block: both lists expand the shorthand before segmentation.
    let mut guard_pattern = String::new();
    let mut dispenser_pattern = String::new();
    if in_pattern_block {
        loop {
            let line = lines.next().ok_or(ParseError::UnexpectedEof)?.trim();
            if line == PATTERN_END {
                break;
            }
            if let Some(rest) = line.strip_prefix(KEY_DISPENSER) {
                dispenser_pattern = expand_pattern(rest.trim());
            } else if let Some(rest) = line.strip_prefix(KEY_GUARD_MONSTER) {
                guard_pattern = expand_pattern(rest.trim());
            }
        }

        // Advance to the map block.
        loop {
            let line = lines.next().ok_or(ParseError::UnexpectedEof)?.trim();
            if line == MAP_START {
                break;
            }
            if line == STAGE_END {
                return Err(ParseError::MissingMap(stage_id as u32));
            }
        }
    }

    // Map block: entities are discovered left-to-right, top-to-bottom and
    // consume pattern segments in that order.
    let mut grid = Grid::new(column, row, TILE_SIZE);
    let mut guard_segments = Segments::new(&guard_pattern);
    let mut dispenser_segments = Segments::new(&dispenser_pattern);
    let mut player = None;
    let mut entities = Vec::new();

    let mut r = 0;
    while let Some(line) = lines.next() {
        if line.trim() == MAP_END {
            break;
        }
        if line.starts_with(COMMENT) || line.is_empty() {
            continue;
        }

        for (c, ch) in line.chars().take(column as usize).enumerate() {
            let cell = IVec2::new(c as i32, r);
            let Some(tile) = Tile::from_char(ch) else {
                debug!(stage = stage_id, ?cell, character = %ch, "Unknown map character, treating as open space");
                continue;
            };

            // Short lines were already padded: the grid starts out open.
            grid.set(cell, tile);
            match tile {
                Tile::Player => player = Some(cell),
                Tile::Tracer => entities.push(Entity::new_tracer(&grid, cell)),
                Tile::Guard => {
                    let pattern = BehaviorPattern::parse(guard_segments.next());
                    entities.push(Entity::new_guard(&grid, cell, pattern));
                }
                Tile::Dispenser => {
                    let pattern = BehaviorPattern::parse(dispenser_segments.next());
                    entities.push(Entity::new_dispenser(&grid, cell, pattern));
                }
                _ => {}
            }
        }

        r += 1;
        if r >= row {
            // Consume any surplus map lines up to the block terminator.
            for line in lines.by_ref() {
                if line.trim() == MAP_END {
                    break;
                }
            }
            break;
        }
    }

    // A stage without a player symbol still loads: synthesize one at the
    // fallback cell instead of failing construction.
    let player = match player {
        Some(cell) => Player::new(&grid, cell),
        None => {
            warn!(stage = stage_id, "Player symbol not found, creating default player at (0, 0)");
            let fallback = IVec2::new(0, 0);
            if grid.get(fallback) == Some(Tile::Open) {
                grid.set(fallback, Tile::Player);
            }
            Player::new(&grid, fallback)
        }
    };

    // Advance to the stage terminator.
    for line in lines.by_ref() {
        if line.trim() == STAGE_END {
            break;
        }
    }

    Ok(Stage::new(
        stage_id as u32,
        action_per_turn as usize,
        grid,
        player,
        entities,
    ))
}
