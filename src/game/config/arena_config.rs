//! Arena Configuration
//!
//! Centralized configuration for the rasengan arena: timing, spawn layout,
//! wall motion and projectile limits. `Default` returns the values the game
//! ships with; a JSON file only needs to name the fields it overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::physics::collision::ColliderSet;

/// Errors raised while loading or validating an [`ArenaConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read arena config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for this schema.
    #[error("failed to parse arena config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid arena config: {0}")]
    Invalid(String),
}

/// The player character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Collision/draw size of the character body
    pub size: Vec3,
    /// Horizontal speed while a move command is held (m/s)
    pub walk_speed: f32,
    /// Upward velocity added by a jump (m/s)
    pub jump_velocity: f32,
    /// Horizontal speed a wall contact pushes the character away with (m/s)
    pub wall_push_speed: f32,
    /// Scale from the character body frame to the head frame projectiles leave from
    pub head_scale: Vec3,
    /// Projectile spawn offset in the head frame; X is mirrored by facing
    pub projectile_offset: Vec3,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            size: Vec3::new(0.5, 0.1, 1.0),
            walk_speed: 2.0,
            jump_velocity: 10.0,
            wall_push_speed: 2.0,
            head_scale: Vec3::new(2.0, 10.0, 1.0),
            projectile_offset: Vec3::new(1.0, 4.0, 0.0),
        }
    }
}

/// The ground slab.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Center of the slab
    pub translation: Vec3,
    /// Scale baked into the slab placement
    pub scale: Vec3,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            translation: Vec3::new(0.0, -3.5, 0.0),
            scale: Vec3::new(500.0, 0.5, 500.0),
        }
    }
}

/// Sinusoidal coordinate driver: `center + amplitude * sin(frequency * t)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Oscillation {
    /// Resting coordinate
    pub center: f32,
    /// Peak displacement
    pub amplitude: f32,
    /// Angular frequency (rad/s)
    pub frequency: f32,
}

impl Oscillation {
    /// Coordinate at simulation time `t`.
    pub fn at(&self, t: f32) -> f32 {
        self.center + (self.frequency * t).sin() * self.amplitude
    }
}

impl Default for Oscillation {
    fn default() -> Self {
        Self {
            center: 5.0,
            amplitude: 5.0,
            frequency: std::f32::consts::PI / 8.0,
        }
    }
}

/// Spawned walls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Collision/draw size of every wall
    pub size: Vec3,
    /// Chance a spawned wall is a moving (Y-bobbing) wall
    pub moving_probability: f64,
    /// Walls never spawn with `|x|` below this, keeping the character spawn clear
    pub spawn_exclusion: f32,
    /// Upper bound of the random spawn height
    pub spawn_height: f32,
    /// Initial upward velocity of moving walls (m/s)
    pub rise_speed: f32,
    /// Shared driver for both wall kinds
    pub oscillation: Oscillation,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            size: Vec3::new(1.0, 5.0, 1.0),
            moving_probability: 0.5,
            spawn_exclusion: 1.0,
            spawn_height: 10.0,
            rise_speed: 1.0,
            oscillation: Oscillation::default(),
        }
    }
}

/// Thrown rasengan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Outward speed along the facing direction (m/s)
    pub speed: f32,
    /// Maximum number of simultaneously live projectiles
    pub max_active: u32,
    /// Collision/draw size of a projectile
    pub size: Vec3,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            max_active: 4,
            size: Vec3::ONE,
        }
    }
}

/// Central configuration for the entire arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Fixed physics step (seconds)
    pub fixed_dt: f32,
    /// Longest frame the simulation will catch up on (seconds)
    pub max_frame_time: f32,
    /// Multiplier applied to real frame time
    pub time_scale: f32,
    /// Length of a run (seconds)
    pub session_seconds: f32,
    /// Body population the spawner tops the world up to
    pub target_body_count: usize,
    /// Half-width of the playable strip along X
    pub world_half_extent: f32,
    /// Downward acceleration on an airborne character (m/s²)
    pub gravity: f32,
    /// Index into the standard collider set
    pub collider_selection: usize,
    /// Seed for wall placement; entropy when absent
    pub seed: Option<u64>,
    /// Player character
    pub character: CharacterConfig,
    /// Ground slab
    pub ground: GroundConfig,
    /// Spawned walls
    pub walls: WallConfig,
    /// Thrown projectiles
    pub projectile: ProjectileConfig,
    /// Scores the leaderboard starts with
    pub leaderboard_seed: BTreeMap<String, u32>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let leaderboard_seed = [("Ling", 1), ("R", 2), ("Valentin", 10), ("Apply", 20), ("LOL", 5)]
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect();

        Self {
            fixed_dt: 1.0 / 20.0,
            max_frame_time: 0.1,
            time_scale: 1.0,
            session_seconds: 60.0,
            target_body_count: 5,
            world_half_extent: 50.0,
            gravity: 9.8,
            collider_selection: 0,
            seed: None,
            character: CharacterConfig::default(),
            ground: GroundConfig::default(),
            walls: WallConfig::default(),
            projectile: ProjectileConfig::default(),
            leaderboard_seed,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded arena config from {}", path.display());
        Ok(config)
    }

    /// Check every value the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("fixed_dt", self.fixed_dt),
            ("max_frame_time", self.max_frame_time),
            ("time_scale", self.time_scale),
            ("session_seconds", self.session_seconds),
            ("world_half_extent", self.world_half_extent),
            ("gravity", self.gravity),
            ("character.walk_speed", self.character.walk_speed),
            ("character.jump_velocity", self.character.jump_velocity),
            ("character.wall_push_speed", self.character.wall_push_speed),
            ("walls.spawn_exclusion", self.walls.spawn_exclusion),
            ("walls.spawn_height", self.walls.spawn_height),
            ("walls.rise_speed", self.walls.rise_speed),
            ("walls.oscillation.center", self.walls.oscillation.center),
            ("walls.oscillation.amplitude", self.walls.oscillation.amplitude),
            ("walls.oscillation.frequency", self.walls.oscillation.frequency),
            ("projectile.speed", self.projectile.speed),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }

        let vectors = [
            ("character.projectile_offset", self.character.projectile_offset),
            ("ground.translation", self.ground.translation),
        ];
        for (name, value) in vectors {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }

        // These end up as scale factors in body transforms, which must stay invertible.
        let scales = [
            ("character.size", self.character.size),
            ("character.head_scale", self.character.head_scale),
            ("ground.scale", self.ground.scale),
            ("walls.size", self.walls.size),
            ("projectile.size", self.projectile.size),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value.cmpeq(Vec3::ZERO).any() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must have finite non-zero components, got {value}"
                )));
            }
        }

        if !(self.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.max_frame_time < self.fixed_dt {
            return Err(ConfigError::Invalid(format!(
                "max_frame_time ({}) must be at least fixed_dt ({})",
                self.max_frame_time, self.fixed_dt
            )));
        }
        if !(self.time_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be positive, got {}",
                self.time_scale
            )));
        }
        if self.session_seconds < 0.0 || self.world_half_extent < 0.0 || self.gravity < 0.0 {
            return Err(ConfigError::Invalid(
                "session_seconds, world_half_extent and gravity must not be negative".into(),
            ));
        }
        let colliders = ColliderSet::standard().len();
        if self.collider_selection >= colliders {
            return Err(ConfigError::Invalid(format!(
                "collider_selection {} is out of range ({} colliders)",
                self.collider_selection, colliders
            )));
        }
        if !(0.0..=1.0).contains(&self.walls.moving_probability) {
            return Err(ConfigError::Invalid(format!(
                "walls.moving_probability must be within [0, 1], got {}",
                self.walls.moving_probability
            )));
        }
        if self.walls.spawn_exclusion < 0.0
            || self.walls.spawn_exclusion >= self.world_half_extent
            || self.walls.spawn_height < 0.0
        {
            return Err(ConfigError::Invalid(
                "walls.spawn_exclusion must lie in [0, world_half_extent) and spawn_height must not be negative"
                    .into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_body_count, 5);
        assert_eq!(config.projectile.max_active, 4);
        assert_eq!(config.leaderboard_seed.get("Apply"), Some(&20));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ArenaConfig::from_json_str(
            r#"{ "seed": 7, "projectile": { "max_active": 2 }, "walls": { "size": [2.0, 4.0, 1.0] } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.projectile.max_active, 2);
        assert_eq!(config.projectile.speed, 4.0);
        assert_eq!(config.walls.size, Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(config.fixed_dt, 1.0 / 20.0);
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let err = ArenaConfig::from_json_str(r#"{ "fixed_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_frame_clamp_below_step() {
        let err = ArenaConfig::from_json_str(r#"{ "fixed_dt": 0.2, "max_frame_time": 0.1 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = ArenaConfig::from_json_str(r#"{ "walls": { "moving_probability": 1.5 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let config = ArenaConfig {
            gravity: f32::NAN,
            ..ArenaConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ArenaConfig::default();
        config.walls.oscillation.frequency = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_size_components() {
        let mut config = ArenaConfig::default();
        config.character.size = Vec3::new(0.5, 0.0, 1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ArenaConfig::default();
        config.walls.size = Vec3::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let err = ArenaConfig::from_json_str(r#"{ "projectile": { "size": [1.0, 1.0, 0.0] } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_arena() {
        let config = ArenaConfig {
            world_half_extent: 0.0,
            ..ArenaConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ArenaConfig::from_json_str("{ fixed_dt: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_oscillation_at_zero_is_center() {
        let osc = Oscillation::default();
        assert_eq!(osc.at(0.0), 5.0);
        assert!((osc.at(4.0) - 10.0).abs() < 1e-4);
    }
}
