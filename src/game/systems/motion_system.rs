//! Per-body update phase: gravity, arena bounds and wall oscillators.
//!
//! Runs once per body per fixed step, before pair collisions. Integration
//! itself happens later in [`Body::advance`].

use crate::game::config::ArenaConfig;
use crate::physics::body::{Body, BodyTag};
use crate::physics::error::PhysicsError;

/// What the world should do with a body after its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionOutcome {
    /// Keep simulating it
    Active,
    /// Projectile past the arena edge; remove it
    OutOfBounds,
}

/// Stateless per-body rules.
pub struct MotionSystem;

impl MotionSystem {
    /// Apply the per-body rules for one step at simulation time `time`.
    ///
    /// Refreshes the body's cached inverse first, so a singular drawn
    /// transform aborts the step before any pair test reads it.
    pub fn update_body(
        body: &mut Body,
        config: &ArenaConfig,
        time: f32,
        dt: f32,
    ) -> Result<MotionOutcome, PhysicsError> {
        body.refresh_inverse()?;

        let bound = config.world_half_extent;
        match body.tag() {
            BodyTag::Projectile => {
                if body.center.x.abs() > bound {
                    return Ok(MotionOutcome::OutOfBounds);
                }
            }
            BodyTag::Character => {
                if !body.grounded {
                    body.linear_velocity.y += dt * -config.gravity;
                }
                Self::hold_inside(body, bound);
            }
            BodyTag::MovingWall => {
                body.center.y = config.walls.oscillation.at(time);
                body.center.z = 0.0;
            }
            // Static walls sweep along X; only moving walls bob vertically.
            BodyTag::StaticWall => {
                body.center.x = config.walls.oscillation.at(time);
                body.center.z = 0.0;
            }
            BodyTag::Ground => {}
        }

        Ok(MotionOutcome::Active)
    }

    /// Stops outward horizontal motion past the arena edge.
    fn hold_inside(body: &mut Body, bound: f32) {
        let velocity = &mut body.linear_velocity;
        if body.center.x > bound {
            velocity.x = velocity.x.min(0.0);
            velocity.z = 0.0;
        } else if body.center.x < -bound {
            velocity.x = velocity.x.max(0.0);
            velocity.z = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyTemplate;
    use glam::{Mat4, Vec3};

    fn body(tag: BodyTag, at: Vec3, velocity: Vec3) -> Body {
        BodyTemplate::new(tag, Vec3::ONE).emplace(Mat4::from_translation(at), velocity, 0.0)
    }

    #[test]
    fn test_airborne_character_falls() {
        let config = ArenaConfig::default();
        let mut character = body(BodyTag::Character, Vec3::ZERO, Vec3::ZERO);

        MotionSystem::update_body(&mut character, &config, 0.0, 0.05).unwrap();
        assert!((character.linear_velocity.y - -0.49).abs() < 1e-6);

        character.grounded = true;
        character.linear_velocity = Vec3::ZERO;
        MotionSystem::update_body(&mut character, &config, 0.0, 0.05).unwrap();
        assert_eq!(character.linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_character_held_inside_arena() {
        let config = ArenaConfig::default();
        let mut right = body(BodyTag::Character, Vec3::new(51.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 1.0));
        right.grounded = true;
        MotionSystem::update_body(&mut right, &config, 0.0, 0.05).unwrap();
        assert_eq!(right.linear_velocity, Vec3::ZERO);

        let mut left = body(BodyTag::Character, Vec3::new(-51.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 1.0));
        left.grounded = true;
        MotionSystem::update_body(&mut left, &config, 0.0, 0.05).unwrap();
        assert_eq!(left.linear_velocity, Vec3::ZERO);

        // Walking back inward is allowed.
        let mut returning = body(BodyTag::Character, Vec3::new(51.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0));
        returning.grounded = true;
        MotionSystem::update_body(&mut returning, &config, 0.0, 0.05).unwrap();
        assert_eq!(returning.linear_velocity.x, -2.0);
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        let config = ArenaConfig::default();
        let mut inside = body(BodyTag::Projectile, Vec3::new(50.0, 4.0, 0.0), Vec3::X);
        let mut outside = body(BodyTag::Projectile, Vec3::new(-51.0, 4.0, 0.0), -Vec3::X);

        assert_eq!(
            MotionSystem::update_body(&mut inside, &config, 0.0, 0.05).unwrap(),
            MotionOutcome::Active
        );
        assert_eq!(
            MotionSystem::update_body(&mut outside, &config, 0.0, 0.05).unwrap(),
            MotionOutcome::OutOfBounds
        );
    }

    #[test]
    fn test_walls_follow_oscillator() {
        let config = ArenaConfig::default();
        let mut moving = body(BodyTag::MovingWall, Vec3::new(-20.0, 3.0, 1.0), Vec3::Y);
        let mut fixed = body(BodyTag::StaticWall, Vec3::new(-20.0, 3.0, 1.0), Vec3::ZERO);

        MotionSystem::update_body(&mut moving, &config, 4.0, 0.05).unwrap();
        MotionSystem::update_body(&mut fixed, &config, 4.0, 0.05).unwrap();

        assert!((moving.center - Vec3::new(-20.0, 10.0, 0.0)).length() < 1e-4);
        assert!((fixed.center - Vec3::new(10.0, 3.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_singular_body_is_rejected() {
        let config = ArenaConfig::default();
        let mut flat = BodyTemplate::new(BodyTag::Ground, Vec3::new(1.0, 0.0, 1.0))
            .emplace(Mat4::IDENTITY, Vec3::ZERO, 0.0);
        let err = MotionSystem::update_body(&mut flat, &config, 0.0, 0.05).unwrap_err();
        assert!(matches!(err, PhysicsError::SingularTransform { tag: BodyTag::Ground, .. }));
    }
}
