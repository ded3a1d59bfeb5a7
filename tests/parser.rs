use glam::IVec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use gridlock::constants::{Tile, DEFAULT_STAGES};
use gridlock::level::{expand_pattern, parse_stages};
use gridlock::player::Action;

#[test]
fn default_stages_load() {
    let stages = parse_stages(DEFAULT_STAGES);
    assert_that!(stages).has_length(1);

    let stage = &stages[0];
    assert_eq!(stage.id(), 1);
    assert_eq!(stage.columns(), 8);
    assert_eq!(stage.rows(), 6);
    assert_eq!(stage.actions_per_turn(), 2);
    assert_eq!(stage.player_position(), IVec2::new(0, 0));

    let monsters = stage
        .drawables()
        .filter(|(tile, _)| matches!(tile, Tile::Tracer | Tile::Guard | Tile::Dispenser))
        .count();
    assert_eq!(monsters, 3);
}

#[test]
fn shorthand_counts_expand() {
    assert_eq!(expand_pattern("U2D2L4"), "UUDDLLLL");
    assert_eq!(expand_pattern("D10"), "D".repeat(10));
    assert_eq!(expand_pattern("L;R2"), "L;RR");
}

#[test]
fn comments_and_short_lines_are_tolerated() {
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:4\n\
         ROW:2\n\
         MAP_START\n\
         ## the second row is short and gets padded with open space\n\
         P-X-\n\
         -\n\
         MAP_END\n\
         STAGE_END\n",
    );
    assert_that!(stages).has_length(1);

    let grid = stages[0].grid();
    assert_eq!(grid.get(IVec2::new(2, 0)), Some(Tile::Wall));
    assert_eq!(grid.get(IVec2::new(1, 1)), Some(Tile::Open));
    assert_eq!(grid.get(IVec2::new(3, 1)), Some(Tile::Open));
}

#[test]
fn action_per_turn_defaults_to_one() {
    let mut stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:3\n\
         ROW:1\n\
         MAP_START\n\
         P--\n\
         MAP_END\n\
         STAGE_END\n",
    );
    let stage = &mut stages[0];
    assert_eq!(stage.actions_per_turn(), 1);

    stage.add_action(Action::MoveRight);
    assert!(stage.reached_max_actions());
    // The second push overflows the queue and is dropped.
    stage.add_action(Action::MoveRight);
    assert_eq!(stage.pending_actions(), 1);
}

#[test]
fn missing_player_falls_back_to_the_origin() {
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:3\n\
         ROW:2\n\
         MAP_START\n\
         ---\n\
         --G\n\
         MAP_END\n\
         STAGE_END\n",
    );
    assert_that!(stages).has_length(1);
    assert_eq!(stages[0].player_position(), IVec2::new(0, 0));
    assert_eq!(stages[0].grid().get(IVec2::new(0, 0)), Some(Tile::Player));
}

#[test]
fn malformed_blocks_are_skipped_without_aborting_the_load() {
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:0\n\
         ROW:2\n\
         MAP_START\n\
         MAP_END\n\
         STAGE_END\n\
         STAGE_START\n\
         STAGE_ID:2\n\
         COLUMN:2\n\
         ROW:1\n\
         MAP_START\n\
         P-\n\
         MAP_END\n\
         STAGE_END\n",
    );
    assert_that!(stages).has_length(1);
    assert_eq!(stages[0].id(), 2);
}

#[test]
fn map_less_block_does_not_swallow_the_next_stage() {
    // The first block ends without a map; the loader must still return the
    // valid stage that follows it.
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:2\n\
         ROW:1\n\
         STAGE_END\n\
         STAGE_START\n\
         STAGE_ID:2\n\
         COLUMN:2\n\
         ROW:1\n\
         MAP_START\n\
         P-\n\
         MAP_END\n\
         STAGE_END\n",
    );
    assert_that!(stages).has_length(1);
    assert_eq!(stages[0].id(), 2);
}

#[test]
fn truncated_trailing_block_is_dropped() {
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:2\n\
         ROW:1\n\
         MAP_START\n\
         P-\n\
         MAP_END\n\
         STAGE_END\n\
         STAGE_START\n\
         STAGE_ID:2\n",
    );
    assert_that!(stages).has_length(1);
    assert_eq!(stages[0].id(), 1);
}

#[test]
fn delimiters_tolerate_surrounding_whitespace() {
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:2\n\
         ROW:1\n\
         MAP_START\n\
         P-\n\
         \tMAP_END  \n\
         STAGE_END\n",
    );
    assert_that!(stages).has_length(1);
    assert_eq!(stages[0].player_position(), IVec2::new(0, 0));
}

#[test]
fn unknown_map_characters_degrade_to_open_space() {
    let stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:3\n\
         ROW:1\n\
         MAP_START\n\
         P?-\n\
         MAP_END\n\
         STAGE_END\n",
    );
    assert_eq!(stages[0].grid().get(IVec2::new(1, 0)), Some(Tile::Open));
}

#[test]
fn pattern_segments_bind_in_discovery_order() {
    // Two guards, two segments: the first guard walks right, the second left.
    let mut stages = parse_stages(
        "STAGE_START\n\
         STAGE_ID:1\n\
         COLUMN:5\n\
         ROW:2\n\
         PATTERN_START\n\
         GUARD_MONSTER:R;L\n\
         PATTERN_END\n\
         MAP_START\n\
         m---m\n\
         --P--\n\
         MAP_END\n\
         STAGE_END\n",
    );
    let stage = &mut stages[0];

    stage.add_action(Action::None);
    stage.advance();
    assert_eq!(stage.grid().get(IVec2::new(1, 0)), Some(Tile::Guard));
    assert_eq!(stage.grid().get(IVec2::new(3, 0)), Some(Tile::Guard));
    assert_eq!(stage.grid().get(IVec2::new(0, 0)), Some(Tile::Open));
    assert_eq!(stage.grid().get(IVec2::new(4, 0)), Some(Tile::Open));
}
