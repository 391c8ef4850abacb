//! Game Session
//!
//! A timed, scored run on top of the simulation. Score counts walls
//! destroyed by projectiles; when the timer reaches zero the run ends and
//! the score is submitted to the leaderboard.

use crate::game::config::ArenaConfig;
use crate::game::leaderboard::Leaderboard;
use crate::game::player::CharacterCommand;
use crate::game::simulation::{FrameReport, Simulation};
use crate::game::world::WorldError;

/// Name used when a run is started with a blank player name.
pub const ANONYMOUS_PLAYER: &str = "Anonymous";

/// How a finished run was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Player the run belonged to
    pub player: String,
    /// Final score
    pub score: u32,
    /// The score became the player's leaderboard best
    pub new_best: bool,
}

/// Result of one session frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTick {
    /// What the simulation did this frame
    pub frame: FrameReport,
    /// Set on the frame the run ended
    pub outcome: Option<SessionOutcome>,
}

/// Central session state: simulation, timer, score and leaderboard.
pub struct GameSession {
    simulation: Simulation,
    leaderboard: Leaderboard,
    player: String,
    score: u32,
    time_left: f32,
    running: bool,
    session_seconds: f32,
    target_body_count: usize,
}

impl GameSession {
    /// Create an idle session with the configured leaderboard seed.
    pub fn new(config: ArenaConfig) -> Result<Self, WorldError> {
        let leaderboard = Leaderboard::from_entries(config.leaderboard_seed.clone());
        Self::with_leaderboard(config, leaderboard)
    }

    /// Create an idle session that records into an existing leaderboard.
    pub fn with_leaderboard(config: ArenaConfig, leaderboard: Leaderboard) -> Result<Self, WorldError> {
        let session_seconds = config.session_seconds;
        let target_body_count = config.target_body_count;
        Ok(Self {
            simulation: Simulation::new(config)?,
            leaderboard,
            player: ANONYMOUS_PLAYER.to_string(),
            score: 0,
            time_left: session_seconds,
            running: false,
            session_seconds,
            target_body_count,
        })
    }

    /// Begin a run for `player`, resetting score and timer.
    ///
    /// The world is left as it is; the arena keeps running between runs.
    pub fn start(&mut self, player: &str) {
        let player = player.trim();
        self.player = if player.is_empty() {
            ANONYMOUS_PLAYER.to_string()
        } else {
            player.to_string()
        };
        self.score = 0;
        self.time_left = self.session_seconds;
        self.running = true;
        log::info!("run started for {} ({} s)", self.player, self.session_seconds);
    }

    /// Advance by one rendered frame of `frame_seconds` real time.
    ///
    /// The world always steps; score and timer only move while a run is in
    /// progress. The timer counts real seconds regardless of time scale.
    pub fn tick(&mut self, frame_seconds: f32) -> Result<SessionTick, WorldError> {
        let frame = self
            .simulation
            .simulate(frame_seconds, self.target_body_count, self.running)?;

        let mut outcome = None;
        if self.running {
            self.score += frame.report.score_delta;
            self.time_left = (self.time_left - frame_seconds.max(0.0)).max(0.0);
            if self.time_left <= 0.0 {
                outcome = Some(self.finish());
            }
        }

        Ok(SessionTick { frame, outcome })
    }

    /// Queue a projectile for the next step. Ignored outside a run.
    pub fn fire(&mut self) {
        if self.running {
            self.simulation.request_fire();
        }
    }

    /// Apply a control command to the character.
    pub fn command(&mut self, command: CharacterCommand) -> Result<(), WorldError> {
        self.simulation.world_mut().command(command)
    }

    /// Walls destroyed in the current or last run.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left in the current run.
    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Name the current or last run is recorded under.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Best score per player.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// The underlying fixed-step simulation.
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Mutable simulation, for time scale and collider changes.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    /// Consume the session, keeping its leaderboard.
    pub fn into_leaderboard(self) -> Leaderboard {
        self.leaderboard
    }

    fn finish(&mut self) -> SessionOutcome {
        self.running = false;
        let new_best = self.leaderboard.submit(&self.player, self.score);
        log::info!(
            "run over: {} scored {}{}",
            self.player,
            self.score,
            if new_best { " (new best)" } else { "" }
        );
        SessionOutcome {
            player: self.player.clone(),
            score: self.score,
            new_best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seconds: f32) -> GameSession {
        GameSession::new(ArenaConfig {
            seed: Some(2),
            session_seconds: seconds,
            ..ArenaConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_idle_session_does_not_count_down() {
        let mut session = session(1.0);
        session.tick(0.05).unwrap();
        assert!(!session.is_running());
        assert_eq!(session.time_left(), 1.0);
        assert_eq!(session.simulation().steps_taken(), 1);
    }

    #[test]
    fn test_blank_name_becomes_anonymous() {
        let mut session = session(1.0);
        session.start("   ");
        assert_eq!(session.player(), ANONYMOUS_PLAYER);
        session.start("Ling");
        assert_eq!(session.player(), "Ling");
    }

    #[test]
    fn test_run_ends_and_submits() {
        let mut session = session(0.1);
        session.start("Newcomer");

        let first = session.tick(0.05).unwrap();
        assert!(first.outcome.is_none());
        assert!(session.is_running());

        let second = session.tick(0.05).unwrap();
        let outcome = second.outcome.unwrap();
        assert_eq!(outcome.player, "Newcomer");
        assert!(outcome.new_best);
        assert!(!session.is_running());
        assert_eq!(session.time_left(), 0.0);
        assert_eq!(session.leaderboard().best("Newcomer"), Some(outcome.score));

        // After the run the timer stays put.
        assert!(session.tick(0.05).unwrap().outcome.is_none());
    }

    #[test]
    fn test_fire_ignored_when_idle() {
        let mut session = session(1.0);
        session.tick(0.05).unwrap();
        session.fire();
        session.tick(0.05).unwrap();
        assert_eq!(session.simulation().world().projectile_count(), 0);
    }
}
