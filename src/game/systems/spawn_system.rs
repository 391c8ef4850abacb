//! Spawn system: keeps the arena stocked with a character, ground and walls.
//!
//! Pure construction: the system builds placed bodies and hands them back,
//! the world decides where they are stored.

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::game::config::ArenaConfig;
use crate::physics::body::{Body, BodyTag, BodyTemplate};

/// Stateless body factory for the arena population.
pub struct SpawnSystem;

impl SpawnSystem {
    /// The character, standing at the origin.
    pub fn character(config: &ArenaConfig) -> Body {
        BodyTemplate::new(BodyTag::Character, config.character.size).emplace(
            Mat4::IDENTITY,
            Vec3::ZERO,
            0.0,
        )
    }

    /// The ground slab. Its placement carries the slab scale; the body size is 1.
    pub fn ground(config: &ArenaConfig) -> Body {
        let location = Mat4::from_translation(config.ground.translation)
            * Mat4::from_scale(config.ground.scale)
            * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2);
        BodyTemplate::new(BodyTag::Ground, Vec3::ONE).emplace(location, Vec3::ZERO, 0.0)
    }

    /// A randomly placed wall.
    ///
    /// X is drawn uniformly across the arena and redrawn while it falls inside
    /// the exclusion band around the character spawn; Y is drawn from
    /// `[0, spawn_height]`. Moving walls start rising, static walls at rest.
    pub fn wall<R: Rng + ?Sized>(config: &ArenaConfig, rng: &mut R) -> Body {
        let half = config.world_half_extent;
        let exclusion = config.walls.spawn_exclusion;

        let mut x = rng.gen_range(-half..half);
        while x > -exclusion && x < exclusion {
            x = rng.gen_range(-half..half);
        }
        let y = rng.gen_range(0.0..=config.walls.spawn_height);
        let location = Mat4::from_translation(Vec3::new(x, y, 0.0));

        let (tag, velocity) = if rng.gen_bool(config.walls.moving_probability) {
            (BodyTag::MovingWall, Vec3::new(0.0, config.walls.rise_speed, 0.0))
        } else {
            (BodyTag::StaticWall, Vec3::ZERO)
        };

        BodyTemplate::new(tag, config.walls.size).emplace(location, velocity, 0.0)
    }

    /// Bodies needed to bring a world of `current` bodies up to `target`.
    ///
    /// An empty world is first seeded with the character and the ground;
    /// walls fill the rest.
    pub fn populate<R: Rng + ?Sized>(
        config: &ArenaConfig,
        current: usize,
        target: usize,
        rng: &mut R,
    ) -> Vec<Body> {
        let mut spawned = Vec::new();

        if current == 0 {
            spawned.push(Self::character(config));
            spawned.push(Self::ground(config));
        }

        while current + spawned.len() < target {
            spawned.push(Self::wall(config, rng));
        }

        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_world_gets_character_and_ground_first() {
        let config = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let bodies = SpawnSystem::populate(&config, 0, 5, &mut rng);

        assert_eq!(bodies.len(), 5);
        assert_eq!(bodies[0].tag(), BodyTag::Character);
        assert_eq!(bodies[1].tag(), BodyTag::Ground);
        assert!(bodies[2..].iter().all(|b| b.tag().is_wall()));
    }

    #[test]
    fn test_seeding_ignores_small_target() {
        let config = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let bodies = SpawnSystem::populate(&config, 0, 0, &mut rng);
        assert_eq!(bodies.len(), 2);
    }

    #[test]
    fn test_full_world_spawns_nothing() {
        let config = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(SpawnSystem::populate(&config, 5, 5, &mut rng).is_empty());
        assert!(SpawnSystem::populate(&config, 9, 5, &mut rng).is_empty());
    }

    #[test]
    fn test_walls_avoid_spawn_band() {
        let config = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let wall = SpawnSystem::wall(&config, &mut rng);
            assert!(wall.center.x.abs() >= 1.0, "wall spawned at x = {}", wall.center.x);
            assert!(wall.center.x.abs() <= 50.0);
            assert!((0.0..=10.0).contains(&wall.center.y));
            assert_eq!(wall.center.z, 0.0);
            assert_eq!(wall.size, Vec3::new(1.0, 5.0, 1.0));
        }
    }

    #[test]
    fn test_wall_kinds_and_velocities() {
        let mut config = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        config.walls.moving_probability = 1.0;
        let moving = SpawnSystem::wall(&config, &mut rng);
        assert_eq!(moving.tag(), BodyTag::MovingWall);
        assert_eq!(moving.linear_velocity, Vec3::Y);

        config.walls.moving_probability = 0.0;
        let fixed = SpawnSystem::wall(&config, &mut rng);
        assert_eq!(fixed.tag(), BodyTag::StaticWall);
        assert_eq!(fixed.linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_ground_slab_extent() {
        let ground = SpawnSystem::ground(&ArenaConfig::default());
        let top = ground.drawn_location().transform_point3(Vec3::new(0.0, 0.0, -1.0));
        // The quarter turn about X maps the unit cube's -Z face to +Y.
        assert!((top.y - -3.0).abs() < 1e-4, "slab top at {}", top.y);
    }
}
