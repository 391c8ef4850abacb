//! Rasengan Engine Library
//!
//! Rigid-body simulation and collision kernel for the rasengan arena: a
//! side-scrolling game where a character throws energy balls at walls.
//! Bodies are integrated at a fixed step, tested pairwise by point
//! sampling, and blended between poses for drawing.
//!
//! # Modules
//!
//! - [`physics`] - Bodies, collision shapes and the collider set
//! - [`game`] - World step, simulation clock, scoring session and leaderboard
//! - [`render`] - Instance records handed to an external renderer
//!
//! # Example
//!
//! ```ignore
//! use rasengan_engine::game::{ArenaConfig, CharacterCommand, GameSession};
//!
//! let mut session = GameSession::new(ArenaConfig::default())?;
//! session.start("Ling");
//!
//! session.command(CharacterCommand::MoveRight)?;
//! session.fire();
//! let tick = session.tick(1.0 / 60.0)?;
//!
//! let instances = session.simulation().world().instances();
//! ```

pub mod physics;
pub mod render;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export the most used types at crate level for convenience
pub use game::{ArenaConfig, GameSession, Simulation, World, WorldError};
pub use physics::{Body, BodyId, BodyTag, BodyTemplate, PhysicsError};
pub use render::{BodyInstance, instance_bytes};
