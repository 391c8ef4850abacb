//! Invariant violations raised by the physics kernel.
//!
//! None of these are recoverable mid-step: a body whose transform cannot be
//! inverted would feed garbage into every later pair test, so the step that
//! observes it is aborted.

use thiserror::Error;

use super::body::BodyTag;

/// Errors produced by bodies and collision shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// The drawn transform of a body has no inverse (zero size or NaN pose).
    #[error("{tag:?} body has a singular drawn transform (determinant {determinant})")]
    SingularTransform {
        /// Tag of the offending body
        tag: BodyTag,
        /// Determinant that failed the check
        determinant: f32,
    },
    /// A collider index outside the configured set was requested.
    #[error("collider {index} does not exist ({available} available)")]
    UnknownCollider {
        /// Requested index
        index: usize,
        /// Number of shapes in the set
        available: usize,
    },
    /// Interpolation factor outside `[0, 1]`.
    #[error("blend factor {0} is outside [0, 1]")]
    AlphaOutOfRange(f32),
}
