//! Terminal front-end for the engine.
//!
//! Loads a stage file (or the built-in default), translates keystrokes into
//! queued actions, and drives the turn engine: a full action queue resolves a
//! turn, `u` undoes the last queued action, `r` resets the stage, `n` skips to
//! the next stage, `q` quits. The engine itself never calls back into this
//! layer; it only consumes the queue/advance/reset surface and the grid view.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use gridlock::constants::DEFAULT_STAGES;
use gridlock::level::{load_stages, parse_stages};
use gridlock::player::Action;
use gridlock::stage::Stage;

fn setup_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Could not set global default");
}

fn show(stage: &Stage) {
    println!(
        "Stage {} | actions per turn: {} | queued: {}",
        stage.id(),
        stage.actions_per_turn(),
        stage.pending_actions()
    );
    print!("{}", stage.grid());
    let _ = io::stdout().flush();
}

fn main() -> Result<()> {
    setup_tracing();

    let mut stages = match std::env::args().nth(1) {
        Some(path) => load_stages(Path::new(&path)).with_context(|| format!("Could not load stage file {path}"))?,
        None => parse_stages(DEFAULT_STAGES),
    };
    if stages.is_empty() {
        bail!("No playable stages found");
    }

    let mut current = 0;
    println!("Loaded {} stage(s). Keys: w/a/s/d move, u undo, r reset, n next stage, q quit.", stages.len());
    show(&stages[current]);

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        let stage = &mut stages[current];

        for key in line.trim().chars() {
            match key {
                'w' => stage.add_action(Action::MoveUp),
                's' => stage.add_action(Action::MoveDown),
                'a' => stage.add_action(Action::MoveLeft),
                'd' => stage.add_action(Action::MoveRight),
                'u' => stage.undo_last_action(),
                'r' => stage.reset(),
                'n' => {
                    current = (current + 1) % stages.len();
                    break;
                }
                'q' => return Ok(()),
                _ => {}
            }

            if stage.reached_max_actions() {
                stage.advance();
            }
        }

        show(&stages[current]);
    }

    Ok(())
}
