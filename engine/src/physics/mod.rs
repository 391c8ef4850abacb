//! Physics module for the rasengan arena
//!
//! A deliberately small rigid-body kernel: bodies are advanced by forward
//! Euler, tested pairwise by point sampling, and blended between their last
//! two poses for drawing. There is no mass, restitution or contact manifold;
//! gameplay rules decide what a contact does.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, seconds for time, radians for angles.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`body`] - Body records, advance/blend/intersects
//! - [`collision`] - Point-sampled collision shapes and the collider set
//! - [`error`] - Invariant violations

pub mod body;
pub mod collision;
pub mod error;
pub mod types;

// Re-export commonly used types at the physics module level
pub use body::{Body, BodyId, BodyTag, BodyTemplate, Pose};
pub use collision::{ColliderSet, CollisionShape, IntersectTest, cube_corners, subdivision_sphere};
pub use error::PhysicsError;
pub use types::{Mat3, Mat4, Vec3};
