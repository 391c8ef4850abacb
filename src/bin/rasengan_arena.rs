//! Headless Rasengan Arena
//!
//! Run with: `cargo run --bin rasengan_arena -- [player] [config.json]`
//!
//! Plays one timed run with a scripted autopilot at a fixed 60 Hz frame
//! rate and prints the leaderboard afterwards. Useful for watching the
//! simulation through its logs (`RUST_LOG=debug`) without a renderer.
//!
//! Autopilot:
//! - walks toward the nearest wall and stops a few meters short
//! - fires on a fixed cadence while facing it
//! - hops now and then

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;
#[cfg(not(target_arch = "wasm32"))]
use rasengan_engine::game::{ArenaConfig, CharacterCommand, GameSession, World};

// ============================================================================
// AUTOPILOT
// ============================================================================

/// Real seconds per rendered frame.
#[cfg(not(target_arch = "wasm32"))]
const FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Frames between shots.
#[cfg(not(target_arch = "wasm32"))]
const FIRE_EVERY: u64 = 12;
/// Frames between hops.
#[cfg(not(target_arch = "wasm32"))]
const JUMP_EVERY: u64 = 150;
/// Distance from the target wall the autopilot holds.
#[cfg(not(target_arch = "wasm32"))]
const STANDOFF: f32 = 6.0;

/// Pick the move toward the nearest wall.
#[cfg(not(target_arch = "wasm32"))]
fn steer(world: &World) -> Option<CharacterCommand> {
    let character = world.character_id().and_then(|id| world.body(id).ok())?;
    let x = character.center.x;

    let nearest = world
        .bodies()
        .iter()
        .filter(|entry| entry.body.tag().is_wall())
        .map(|entry| entry.body.center.x - x)
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))?;

    Some(if nearest.abs() <= STANDOFF {
        CharacterCommand::Stop
    } else if nearest > 0.0 {
        CharacterCommand::MoveRight
    } else {
        CharacterCommand::MoveLeft
    })
}

// ============================================================================
// MAIN
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(if cfg!(debug_assertions) {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .format_timestamp_millis()
        .format_target(false)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let player = args.next().unwrap_or_default();
    let config = match args.next() {
        Some(path) => ArenaConfig::load(Path::new(&path))?,
        None => ArenaConfig::default(),
    };

    let mut session = GameSession::new(config)?;
    session.start(&player);
    println!("=== Rasengan Arena: {} ===", session.player());

    let mut frame = 0u64;
    let outcome = loop {
        let tick = session.tick(FRAME_SECONDS)?;
        if let Some(outcome) = tick.outcome {
            break outcome;
        }
        frame += 1;

        if let Some(command) = steer(session.simulation().world()) {
            session.command(command)?;
        }
        if frame % JUMP_EVERY == 0 {
            session.command(CharacterCommand::Jump)?;
        }
        if frame % FIRE_EVERY == 0 {
            session.fire();
        }
        if tick.frame.report.score_delta > 0 {
            println!(
                "{:5.1}s  score {:3}  ({} walls standing)",
                session.time_left(),
                session.score(),
                session
                    .simulation()
                    .world()
                    .bodies()
                    .iter()
                    .filter(|entry| entry.body.tag().is_wall())
                    .count()
            );
        }
    };

    println!();
    println!(
        "{} scored {}{}",
        outcome.player,
        outcome.score,
        if outcome.new_best { " - new personal best!" } else { "" }
    );
    println!("steps simulated: {}", session.simulation().steps_taken());
    println!();
    println!("Leaderboard");
    for (rank, (name, score)) in session.leaderboard().top(5).into_iter().enumerate() {
        println!("  {}. {:<12} {:>4}", rank + 1, name, score);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
