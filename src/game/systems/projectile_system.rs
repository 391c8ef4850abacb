//! Projectile lifecycle management system.
//!
//! Projectile bodies live in the world alongside everything else; this
//! system owns the live count and builds new projectiles at the character's
//! head. The world reports every removal back through [`ProjectileSystem::release`].

use glam::{Mat4, Vec3};

use crate::game::config::ArenaConfig;
use crate::game::player::Facing;
use crate::physics::body::{Body, BodyTag, BodyTemplate};

/// Tracks live projectiles against a fixed budget.
#[derive(Debug, Clone)]
pub struct ProjectileSystem {
    active: u32,
    /// Maximum number of simultaneously active projectiles.
    pub max_projectiles: u32,
}

impl ProjectileSystem {
    /// Create an empty system with the given budget.
    pub fn new(max_projectiles: u32) -> Self {
        Self {
            active: 0,
            max_projectiles,
        }
    }

    /// Number of projectiles currently counted as live.
    pub fn active_count(&self) -> u32 {
        self.active
    }

    /// Returns true if another projectile may be fired.
    pub fn has_capacity(&self) -> bool {
        self.active < self.max_projectiles
    }

    /// Build a projectile leaving `character` in the `facing` direction.
    ///
    /// Returns `None` without side effects when the budget is spent.
    pub fn fire(&mut self, character: &Body, facing: Facing, config: &ArenaConfig) -> Option<Body> {
        if !self.has_capacity() {
            return None;
        }
        self.active += 1;
        Some(Self::launch(character, facing, config))
    }

    /// Count a projectile that entered the world without [`fire`](Self::fire).
    pub fn track(&mut self) {
        self.active += 1;
    }

    /// Forget one projectile that left the world.
    pub fn release(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    /// Placement and velocity of a new projectile.
    ///
    /// The spawn frame is the character's drawn transform rescaled to the
    /// head frame, then offset up and to the facing side.
    fn launch(character: &Body, facing: Facing, config: &ArenaConfig) -> Body {
        let sign = facing.sign();
        let offset = config.character.projectile_offset * Vec3::new(sign, 1.0, 1.0);
        let location = character.drawn_location()
            * Mat4::from_scale(config.character.head_scale)
            * Mat4::from_translation(offset);
        let velocity = Vec3::new(sign * config.projectile.speed, 0.0, 0.0);

        BodyTemplate::new(BodyTag::Projectile, config.projectile.size).emplace(location, velocity, 0.0)
    }
}
