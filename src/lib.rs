//! Turn-based grid puzzle engine library crate.
//!
//! The player queues a bounded number of actions per turn; [`stage::Stage::advance`]
//! resolves them one sub-turn at a time against a single shared grid, moving
//! arrows, tracers, guards, and dispensers in a fixed order before each player
//! step.

pub mod constants;
pub mod direction;
pub mod entity;
pub mod error;
pub mod grid;
pub mod level;
pub mod pathfinder;
pub mod pattern;
pub mod player;
pub mod stage;
