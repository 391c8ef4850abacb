//! Collision system: pairwise contact detection and gameplay resolution.
//!
//! Every unordered pair of live bodies is sampled in both directions with the
//! active collider; a hit either way is one contact. The contact rule is
//! looked up from the two body tags and applied once. Removals are only
//! marked here; the world compacts its body list after the scan.

use glam::Vec3;

use crate::game::world::ActiveBody;
use crate::physics::body::{Body, BodyTag};
use crate::physics::collision::CollisionShape;

/// Effect of a contact between two tagged bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Character touched a wall: pushed horizontally away from it
    PushCharacter,
    /// Character touched the ground: lands if not rising
    GroundCharacter,
    /// Projectile hit a wall: both are destroyed and the player scores
    Shatter,
    /// Static wall rests on the ground
    GroundWall,
}

/// Which body of the pair a resolution acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// The first body passed to [`contact_rule`]
    First,
    /// The second body passed to [`contact_rule`]
    Second,
}

/// A resolution together with the body it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactRule {
    /// What happens
    pub resolution: Resolution,
    /// To whom (the character, the projectile or the static wall)
    pub subject: Subject,
}

impl ContactRule {
    const fn new(resolution: Resolution, subject: Subject) -> Self {
        Self { resolution, subject }
    }
}

/// Contact rule for a pair of tags, or `None` when the pair never interacts.
pub fn contact_rule(first: BodyTag, second: BodyTag) -> Option<ContactRule> {
    use BodyTag::*;
    use Resolution::*;

    match (first, second) {
        (Character, StaticWall | MovingWall) => Some(ContactRule::new(PushCharacter, Subject::First)),
        (StaticWall | MovingWall, Character) => Some(ContactRule::new(PushCharacter, Subject::Second)),
        (Character, Ground) => Some(ContactRule::new(GroundCharacter, Subject::First)),
        (Ground, Character) => Some(ContactRule::new(GroundCharacter, Subject::Second)),
        (Projectile, StaticWall | MovingWall) => Some(ContactRule::new(Shatter, Subject::First)),
        (StaticWall | MovingWall, Projectile) => Some(ContactRule::new(Shatter, Subject::Second)),
        (StaticWall, Ground) => Some(ContactRule::new(GroundWall, Subject::First)),
        (Ground, StaticWall) => Some(ContactRule::new(GroundWall, Subject::Second)),
        (Character, Character | Projectile)
        | (Projectile, Character | Ground | Projectile)
        | (Ground, Ground | MovingWall | Projectile)
        | (MovingWall, Ground)
        | (StaticWall | MovingWall, StaticWall | MovingWall) => None,
    }
}

/// Result of one collision scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Number of intersecting pairs that had a contact rule
    pub contacts: usize,
    /// `(projectile, wall)` slot pairs destroyed by impact, in scan order
    pub shattered: Vec<(usize, usize)>,
}

/// Stateless collision system over the world's body list.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Scan all live pairs and resolve their contacts.
    ///
    /// `removed` runs parallel to `bodies`; slots already marked are skipped
    /// and shattered pairs are marked here. Expects every body's cached
    /// inverse to be current.
    pub fn resolve_all(
        bodies: &mut [ActiveBody],
        removed: &mut [bool],
        shape: &CollisionShape,
        wall_push_speed: f32,
    ) -> CollisionOutcome {
        let mut outcome = CollisionOutcome::default();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if removed[i] {
                    break;
                }
                if removed[j] {
                    continue;
                }

                let (first, second) = (&bodies[i].body, &bodies[j].body);
                if !(first.intersects(second, shape) || second.intersects(first, shape)) {
                    continue;
                }
                let Some(rule) = contact_rule(first.tag(), second.tag()) else {
                    continue;
                };

                outcome.contacts += 1;
                log::trace!(
                    "contact {:?}: {} {:?} / {} {:?}",
                    rule.resolution,
                    bodies[i].id,
                    first.tag(),
                    bodies[j].id,
                    second.tag()
                );

                if rule.resolution == Resolution::Shatter {
                    removed[i] = true;
                    removed[j] = true;
                    outcome.shattered.push(match rule.subject {
                        Subject::First => (i, j),
                        Subject::Second => (j, i),
                    });
                    continue;
                }

                let (first, second) = pair_mut(bodies, i, j);
                let (subject, other) = match rule.subject {
                    Subject::First => (first, second),
                    Subject::Second => (second, first),
                };
                apply(rule.resolution, subject, other, wall_push_speed);
            }
        }

        outcome
    }
}

/// Mutable access to two distinct slots, `i < j`.
fn pair_mut(bodies: &mut [ActiveBody], i: usize, j: usize) -> (&mut Body, &mut Body) {
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i].body, &mut tail[0].body)
}

fn apply(resolution: Resolution, subject: &mut Body, other: &Body, wall_push_speed: f32) {
    let velocity = subject.linear_velocity;
    match resolution {
        Resolution::PushCharacter => {
            let away = if other.center.x > subject.center.x { -1.0 } else { 1.0 };
            subject.linear_velocity = Vec3::new(away * wall_push_speed, velocity.y, 0.0);
        }
        Resolution::GroundCharacter => {
            if velocity.y <= 0.0 {
                subject.grounded = true;
            }
            subject.linear_velocity = Vec3::new(velocity.x, velocity.y.max(0.0), 0.0);
            subject.angular_velocity = 0.0;
        }
        Resolution::GroundWall => {
            subject.grounded = true;
            subject.linear_velocity = Vec3::new(velocity.x, 0.0, 0.0);
            subject.angular_velocity = 0.0;
        }
        // Removal is handled by the scan.
        Resolution::Shatter => {}
    }
}
