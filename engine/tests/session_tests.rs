//! Session Tests - Timer, Scoring and Leaderboard
//!
//! End-to-end runs through `GameSession` plus leaderboard invariants.

use glam::{Mat4, Vec3};
use proptest::prelude::*;
use rasengan_engine::game::{ArenaConfig, GameSession, Leaderboard};
use rasengan_engine::physics::{BodyTag, BodyTemplate};

fn short_run(seconds: f32) -> ArenaConfig {
    ArenaConfig {
        seed: Some(77),
        session_seconds: seconds,
        target_body_count: 2,
        ..ArenaConfig::default()
    }
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_hit_scores_and_is_submitted_at_end() {
    let mut session = GameSession::new(short_run(0.1)).unwrap();
    session.start("Tester");

    // First frame seeds the character at the origin and the ground.
    assert!(session.tick(0.05).unwrap().outcome.is_none());

    // A wall right where the projectile appears.
    let wall = BodyTemplate::new(BodyTag::MovingWall, Vec3::new(1.0, 5.0, 1.0)).emplace(
        Mat4::from_translation(Vec3::new(1.5, 6.0, 0.0)),
        Vec3::Y,
        0.0,
    );
    session.simulation_mut().world_mut().spawn(wall);
    session.fire();

    let tick = session.tick(0.05).unwrap();
    assert_eq!(tick.frame.report.score_delta, 1);

    let outcome = tick.outcome.expect("run should end on this frame");
    assert_eq!(outcome.player, "Tester");
    assert_eq!(outcome.score, 1);
    assert!(outcome.new_best);
    assert_eq!(session.score(), 1);
    assert_eq!(session.leaderboard().best("Tester"), Some(1));
}

#[test]
fn test_timer_uses_real_seconds() {
    let mut session = GameSession::new(short_run(10.0)).unwrap();
    session.start("Tester");
    session.simulation_mut().speed_up();

    session.tick(0.04).unwrap();
    assert!((session.time_left() - 9.96).abs() < 1e-4);
    // Five times faster, clamped to 0.1 s of simulated time: two steps.
    assert_eq!(session.simulation().steps_taken(), 2);
}

#[test]
fn test_lower_score_keeps_previous_best() {
    let mut board = Leaderboard::new();
    board.submit("Tester", 3);

    let mut session = GameSession::with_leaderboard(short_run(0.05), board).unwrap();
    session.start("Tester");
    let outcome = session.tick(0.05).unwrap().outcome.unwrap();

    assert_eq!(outcome.score, 0);
    assert!(!outcome.new_best);
    assert_eq!(session.into_leaderboard().best("Tester"), Some(3));
}

#[test]
fn test_default_leaderboard_seed() {
    let session = GameSession::new(ArenaConfig::default()).unwrap();
    let top: Vec<_> = session.leaderboard().top(5).into_iter().map(|(name, _)| name).collect();
    assert_eq!(top, vec!["Apply", "Valentin", "LOL", "R", "Ling"]);
}

// ============================================================================
// Leaderboard monotonicity
// ============================================================================

proptest! {
    #[test]
    fn test_best_score_never_decreases(scores in prop::collection::vec(0u32..1000, 1..50)) {
        let mut board = Leaderboard::new();
        let mut previous = None;

        for &score in &scores {
            board.submit("Tester", score);
            let best = board.best("Tester");
            if let Some(previous) = previous {
                prop_assert!(best >= Some(previous));
            }
            previous = best;
        }

        prop_assert_eq!(board.best("Tester"), scores.iter().copied().max());
        prop_assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_top_is_sorted_and_bounded(
        entries in prop::collection::vec(("[a-z]{1,6}", 0u32..100), 0..30),
        n in 0usize..10,
    ) {
        let board = Leaderboard::from_entries(entries);
        let top = board.top(n);

        prop_assert!(top.len() <= n);
        prop_assert!(top.len() <= board.len());
        for pair in top.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }
}
