//! Game Module
//!
//! Arena rules built on the physics kernel: who spawns where, what a
//! contact does, and how a timed run is scored.

pub mod config;
pub mod leaderboard;
pub mod player;
pub mod simulation;
pub mod state;
pub mod systems;
pub mod world;

pub use config::{ArenaConfig, ConfigError};
pub use leaderboard::Leaderboard;
pub use player::{CharacterCommand, Facing};
pub use simulation::{FrameReport, Simulation, TIME_SCALE_FACTOR};
pub use state::{ANONYMOUS_PLAYER, GameSession, SessionOutcome, SessionTick};
pub use world::{
    ActiveBody, DestroyCause, DestroyedBody, StepInput, StepReport, World, WorldError,
};
