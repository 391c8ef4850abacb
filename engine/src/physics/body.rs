//! Rigid bodies advanced by forward Euler and blended for drawing
//!
//! A [`Body`] keeps two poses: the physical one (`center`, `rotation`) that
//! only [`Body::advance`] moves, and the pose captured just before the last
//! advance (`previous`). Drawing interpolates between the two, as described
//! at the end of Glenn Fiedler's "Fix Your Timestep!", so a renderer running
//! faster than the physics step still sees smooth motion.
//!
//! Bodies can only be obtained by placing a [`BodyTemplate`], so there is no
//! such thing as an unplaced body to blend or test.
//!
//! # Example
//!
//! ```ignore
//! use rasengan_engine::physics::body::{BodyTag, BodyTemplate};
//! use glam::{Mat4, Vec3};
//!
//! let mut wall = BodyTemplate::new(BodyTag::MovingWall, Vec3::new(1.0, 5.0, 1.0))
//!     .emplace(Mat4::from_translation(Vec3::new(12.0, 3.0, 0.0)), Vec3::Y, 0.0);
//! wall.advance(0.05);
//! let drawn = wall.blend(0.5);
//! ```

use std::fmt;

use super::collision::CollisionShape;
use super::error::PhysicsError;
use super::types::{Mat3, Mat4, Vec3};

// =============================================================================
// Identity and tags
// =============================================================================

/// Stable handle of a body inside a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Behavioral tag selecting spawn and collision-resolution rules.
///
/// A body keeps its tag for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTag {
    /// The player-controlled character
    Character,
    /// The floor slab
    Ground,
    /// A wall that sweeps along X. Despite the name it oscillates just like
    /// [`BodyTag::MovingWall`], only on the other axis.
    StaticWall,
    /// A wall that bobs along Y
    MovingWall,
    /// A thrown rasengan
    Projectile,
}

impl BodyTag {
    /// Numeric code written into render instances.
    pub fn code(self) -> u32 {
        match self {
            Self::Character => 0,
            Self::Ground => 1,
            Self::StaticWall => 2,
            Self::MovingWall => 3,
            Self::Projectile => 4,
        }
    }

    /// Returns true for both wall kinds.
    pub fn is_wall(self) -> bool {
        matches!(self, Self::StaticWall | Self::MovingWall)
    }
}

// =============================================================================
// Pose
// =============================================================================

/// Position plus linear frame of a body.
///
/// `rotation` is the 3x3 linear part of the placement matrix. It is a pure
/// rotation for most bodies but keeps any scale baked into the placement
/// (the ground slab is placed with one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space center
    pub center: Vec3,
    /// Linear frame
    pub rotation: Mat3,
}

impl Pose {
    /// Splits an affine placement matrix into center and linear frame.
    pub fn from_matrix(location: Mat4) -> Self {
        Self {
            center: location.w_axis.truncate(),
            rotation: Mat3::from_mat4(location),
        }
    }

    /// Rebuilds the affine matrix `T(center) * rotation`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center) * Mat4::from_mat3(self.rotation)
    }
}

/// `from * (1 - t) + to * t`, exact at both ends.
fn mix(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from * (1.0 - t) + to * t
}

/// Entry-wise linear blend of two frames.
///
/// Fine for pure translation and small rotational deltas; large deltas shear
/// the result because the blend is not renormalized.
fn mix_frame(from: Mat3, to: Mat3, t: f32) -> Mat3 {
    Mat3::from_cols(
        mix(from.x_axis, to.x_axis, t),
        mix(from.y_axis, to.y_axis, t),
        mix(from.z_axis, to.z_axis, t),
    )
}

// =============================================================================
// Body
// =============================================================================

/// Tag and size of a body that has not been placed yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTemplate {
    /// Behavioral tag
    pub tag: BodyTag,
    /// Non-uniform scale applied at draw and collision time
    pub size: Vec3,
}

impl BodyTemplate {
    /// Creates a template.
    pub fn new(tag: BodyTag, size: Vec3) -> Self {
        Self { tag, size }
    }

    /// Places the body, producing a live [`Body`].
    ///
    /// # Arguments
    /// * `location` - Affine placement matrix (translation and linear frame)
    /// * `linear_velocity` - Initial velocity (units/second)
    /// * `angular_velocity` - Spin rate about the spin axis (radians/second)
    pub fn emplace(self, location: Mat4, linear_velocity: Vec3, angular_velocity: f32) -> Body {
        let pose = Pose::from_matrix(location);
        let drawn_location = pose.to_matrix() * Mat4::from_scale(self.size);
        Body {
            tag: self.tag,
            size: self.size,
            center: pose.center,
            rotation: pose.rotation,
            previous: pose,
            linear_velocity,
            angular_velocity,
            spin_axis: Vec3::Y,
            grounded: false,
            drawn_location,
            cached_inverse: drawn_location.inverse(),
        }
    }
}

/// A positioned, sized, tagged rigid body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    tag: BodyTag,
    /// Non-uniform scale applied at draw and collision time
    pub size: Vec3,
    /// Current world-space center
    pub center: Vec3,
    /// Current linear frame
    pub rotation: Mat3,
    previous: Pose,
    /// Velocity in units/second
    pub linear_velocity: Vec3,
    /// Spin rate in radians/second
    pub angular_velocity: f32,
    spin_axis: Vec3,
    /// Set once vertical motion has been arrested by the ground
    pub grounded: bool,
    drawn_location: Mat4,
    cached_inverse: Mat4,
}

impl Body {
    /// Re-places an existing body.
    ///
    /// The previous pose is reset to the new one so the next draw shows no
    /// interpolation from wherever the body used to be.
    pub fn emplace(&mut self, location: Mat4, linear_velocity: Vec3, angular_velocity: f32) {
        let spin_axis = self.spin_axis;
        *self = BodyTemplate::new(self.tag, self.size).emplace(
            location,
            linear_velocity,
            angular_velocity,
        );
        self.spin_axis = spin_axis;
    }

    /// Sets the axis `angular_velocity` spins about. A zero axis falls back to +Y.
    ///
    /// Placed bodies start out spinning about +Y rather than a random axis, so
    /// a spawn stays reproducible under a fixed seed.
    pub fn with_spin_axis(mut self, axis: Vec3) -> Self {
        let axis = axis.normalize_or_zero();
        self.spin_axis = if axis == Vec3::ZERO { Vec3::Y } else { axis };
        self
    }

    /// Behavioral tag.
    pub fn tag(&self) -> BodyTag {
        self.tag
    }

    /// Unit spin axis.
    pub fn spin_axis(&self) -> Vec3 {
        self.spin_axis
    }

    /// Current physical pose.
    pub fn pose(&self) -> Pose {
        Pose {
            center: self.center,
            rotation: self.rotation,
        }
    }

    /// Pose at the start of the last advance.
    pub fn previous(&self) -> Pose {
        self.previous
    }

    /// Last blended draw transform (includes `size`).
    pub fn drawn_location(&self) -> Mat4 {
        self.drawn_location
    }

    /// Inverse of [`Body::drawn_location`] as of the last refresh.
    pub fn cached_inverse(&self) -> Mat4 {
        self.cached_inverse
    }

    /// Integrates one step with forward Euler.
    ///
    /// Captures the current pose into `previous`, then moves the center by
    /// `linear_velocity * dt` and pre-multiplies the frame by a rotation of
    /// `angular_velocity * dt` about the spin axis.
    pub fn advance(&mut self, dt: f32) {
        self.previous = self.pose();
        self.center += self.linear_velocity * dt;

        let angle = self.angular_velocity * dt;
        if angle != 0.0 {
            self.rotation = Mat3::from_axis_angle(self.spin_axis, angle) * self.rotation;
        }
    }

    /// Computes and stores the draw transform interpolated between the
    /// previous and current poses.
    ///
    /// `alpha = 0` reproduces the previous pose, `alpha = 1` the current one.
    /// Rotation is blended entry-wise rather than by quaternion slerp, which
    /// shears under large rotational deltas.
    pub fn blend(&mut self, alpha: f32) -> Mat4 {
        let center = mix(self.previous.center, self.center, alpha);
        let rotation = mix_frame(self.previous.rotation, self.rotation, alpha);
        self.drawn_location = Mat4::from_translation(center)
            * Mat4::from_mat3(rotation)
            * Mat4::from_scale(self.size);
        self.drawn_location
    }

    /// Recomputes the cached inverse of the drawn transform.
    pub fn refresh_inverse(&mut self) -> Result<(), PhysicsError> {
        let determinant = self.drawn_location.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(PhysicsError::SingularTransform {
                tag: self.tag,
                determinant,
            });
        }
        self.cached_inverse = self.drawn_location.inverse();
        Ok(())
    }

    /// Tests whether `other` penetrates this body.
    ///
    /// Every sample point of `shape`, placed by `other`'s drawn transform, is
    /// carried into this body's unit frame and checked against the shape's
    /// test volume. The test is directional: it samples `other` against this
    /// body's volume. A body never intersects itself.
    pub fn intersects(&self, other: &Body, shape: &CollisionShape) -> bool {
        if std::ptr::eq(self, other) {
            return false;
        }

        let to_local = self.cached_inverse * other.drawn_location;
        shape
            .points()
            .iter()
            .any(|p| shape.contains((to_local * p.extend(1.0)).truncate()))
    }
}
