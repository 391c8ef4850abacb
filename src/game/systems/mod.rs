//! Game systems: the phases of a world step, each kept free of storage concerns.

pub mod collision_system;
pub mod motion_system;
pub mod projectile_system;
pub mod spawn_system;

pub use collision_system::{
    CollisionOutcome, CollisionSystem, ContactRule, Resolution, Subject, contact_rule,
};
pub use motion_system::{MotionOutcome, MotionSystem};
pub use projectile_system::ProjectileSystem;
pub use spawn_system::SpawnSystem;
