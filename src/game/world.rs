//! World: the body list and the fixed step that drives it.
//!
//! A step runs its phases in a fixed order:
//!
//! 1. population top-up ([`SpawnSystem`])
//! 2. projectile launch, if requested and the budget allows ([`ProjectileSystem`])
//! 3. per-body rules ([`MotionSystem`])
//! 4. pairwise contacts ([`CollisionSystem`])
//! 5. removal of everything destroyed this step
//! 6. forward-Euler advance of every survivor
//!
//! Contacts read each body's *drawn* transform, so callers are expected to
//! blend between steps ([`World::blend_all`]); [`crate::game::Simulation`]
//! does this every frame.
//!
//! # Example
//!
//! ```ignore
//! let mut world = World::new(ArenaConfig::default())?;
//! let input = StepInput { target_body_count: 5, fire: false, session_running: true };
//! let report = world.step(1.0 / 20.0, &input)?;
//! world.blend_all(1.0);
//! ```

use glam::Mat4;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::game::config::ArenaConfig;
use crate::game::player::{CharacterCommand, Facing};
use crate::game::systems::{
    CollisionSystem, MotionOutcome, MotionSystem, ProjectileSystem, SpawnSystem,
};
use crate::physics::body::{Body, BodyId, BodyTag};
use crate::physics::collision::ColliderSet;
use crate::physics::error::PhysicsError;
use crate::render::instances::BodyInstance;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors returned by world operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// A physics invariant was violated; the step was aborted.
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    /// The arena config failed validation.
    #[error("{0}")]
    InvalidConfig(String),
    /// No live body carries this id.
    #[error("no live body with id {0}")]
    UnknownBody(BodyId),
    /// A character command arrived while no character exists.
    #[error("the world has no character")]
    NoCharacter,
}

// ============================================================================
// STEP INPUT / REPORT
// ============================================================================

/// External inputs sampled once per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    /// Population the spawner tops the world up to
    pub target_body_count: usize,
    /// Launch a projectile this step
    pub fire: bool,
    /// Whether a scored run is in progress; firing is ignored otherwise
    pub session_running: bool,
}

/// Why a body left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    /// Projectile crossed the arena edge
    OutOfBounds,
    /// Projectile and wall destroyed each other
    Impact,
}

/// A body removed during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyedBody {
    /// Id the body had while live
    pub id: BodyId,
    /// Its tag
    pub tag: BodyTag,
    /// Why it went
    pub cause: DestroyCause,
}

/// What happened during one or more steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Walls destroyed by projectiles
    pub score_delta: u32,
    /// Intersecting pairs that triggered a contact rule
    pub contacts: usize,
    /// Bodies added, in insertion order
    pub spawned: Vec<(BodyId, BodyTag)>,
    /// Bodies removed, in detection order
    pub destroyed: Vec<DestroyedBody>,
}

impl StepReport {
    /// Fold a later report into this one.
    pub fn absorb(&mut self, later: StepReport) {
        self.score_delta += later.score_delta;
        self.contacts += later.contacts;
        self.spawned.extend(later.spawned);
        self.destroyed.extend(later.destroyed);
    }
}

// ============================================================================
// WORLD
// ============================================================================

/// A live body and its stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBody {
    /// Stable for the body's lifetime, never reused
    pub id: BodyId,
    /// The body itself
    pub body: Body,
}

/// The arena: every live body plus the state the step phases share.
pub struct World {
    bodies: Vec<ActiveBody>,
    colliders: ColliderSet,
    projectiles: ProjectileSystem,
    config: ArenaConfig,
    facing: Facing,
    time: f32,
    next_id: u64,
    rng: StdRng,
}

impl World {
    /// Create an empty world. Bodies appear on the first step.
    ///
    /// The config is validated first, whether or not it came from a file.
    pub fn new(config: ArenaConfig) -> Result<Self, WorldError> {
        config
            .validate()
            .map_err(|err| WorldError::InvalidConfig(err.to_string()))?;

        let mut colliders = ColliderSet::standard();
        colliders.select(config.collider_selection)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            bodies: Vec::new(),
            colliders,
            projectiles: ProjectileSystem::new(config.projectile.max_active),
            config,
            facing: Facing::default(),
            time: 0.0,
            next_id: 0,
            rng,
        })
    }

    /// Configuration the world was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Live bodies in insertion order.
    pub fn bodies(&self) -> &[ActiveBody] {
        &self.bodies
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if there are no live bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Simulation time in seconds (advanced by `dt` per step).
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Direction the character last walked in.
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Live projectiles counted against the budget.
    pub fn projectile_count(&self) -> u32 {
        self.projectiles.active_count()
    }

    /// Projectile budget.
    pub fn projectile_capacity(&self) -> u32 {
        self.projectiles.max_projectiles
    }

    /// The collider set used for pair tests.
    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// Mutable collider set, for cycling the active shape.
    pub fn colliders_mut(&mut self) -> &mut ColliderSet {
        &mut self.colliders
    }

    /// Add a placed body. Projectiles count against the budget.
    pub fn spawn(&mut self, body: Body) -> BodyId {
        if body.tag() == BodyTag::Projectile {
            self.projectiles.track();
        }
        self.insert(body)
    }

    /// Look up a live body.
    pub fn body(&self, id: BodyId) -> Result<&Body, WorldError> {
        self.bodies
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.body)
            .ok_or(WorldError::UnknownBody(id))
    }

    /// Look up a live body for modification.
    pub fn body_mut(&mut self, id: BodyId) -> Result<&mut Body, WorldError> {
        self.bodies
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.body)
            .ok_or(WorldError::UnknownBody(id))
    }

    /// Id of the first character body, if any.
    pub fn character_id(&self) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|entry| entry.body.tag() == BodyTag::Character)
            .map(|entry| entry.id)
    }

    /// Apply a control command to the character.
    pub fn command(&mut self, command: CharacterCommand) -> Result<(), WorldError> {
        let character = &self.config.character;
        let body = self
            .bodies
            .iter_mut()
            .find(|entry| entry.body.tag() == BodyTag::Character)
            .map(|entry| &mut entry.body)
            .ok_or(WorldError::NoCharacter)?;

        match command {
            CharacterCommand::Jump => {
                if body.linear_velocity.y == 0.0 {
                    body.linear_velocity.y += character.jump_velocity;
                    body.grounded = false;
                }
            }
            CharacterCommand::MoveLeft => {
                self.facing = Facing::Left;
                body.linear_velocity.x = -character.walk_speed;
            }
            CharacterCommand::MoveRight => {
                self.facing = Facing::Right;
                body.linear_velocity.x = character.walk_speed;
            }
            CharacterCommand::Stop => {
                body.linear_velocity.x = 0.0;
            }
        }
        Ok(())
    }

    /// Run one fixed step of length `dt`.
    ///
    /// On error the step is abandoned part way; bodies spawned before the
    /// failure stay in the world and the projectile budget is left as it was
    /// before the per-body phase.
    pub fn step(&mut self, dt: f32, input: &StepInput) -> Result<StepReport, WorldError> {
        let mut report = StepReport::default();

        // Population
        let current = self.bodies.len();
        for body in SpawnSystem::populate(&self.config, current, input.target_body_count, &mut self.rng) {
            let (tag, center) = (body.tag(), body.center);
            let id = self.insert(body);
            log::debug!("spawned {:?} {} at {}", tag, id, center);
            report.spawned.push((id, tag));
        }

        // Projectile launch
        if input.fire && input.session_running {
            self.launch_projectile(&mut report);
        }

        // Per-body rules. Budget changes wait until every body has passed.
        let mut out_of_bounds = Vec::new();
        for (slot, entry) in self.bodies.iter_mut().enumerate() {
            if MotionSystem::update_body(&mut entry.body, &self.config, self.time, dt)?
                == MotionOutcome::OutOfBounds
            {
                out_of_bounds.push(slot);
            }
        }

        let mut removed = vec![false; self.bodies.len()];
        for slot in out_of_bounds {
            let entry = &self.bodies[slot];
            removed[slot] = true;
            self.projectiles.release();
            log::debug!("projectile {} left the arena at x = {}", entry.id, entry.body.center.x);
            report.destroyed.push(DestroyedBody {
                id: entry.id,
                tag: entry.body.tag(),
                cause: DestroyCause::OutOfBounds,
            });
        }

        // Contacts
        let outcome = CollisionSystem::resolve_all(
            &mut self.bodies,
            &mut removed,
            self.colliders.active(),
            self.config.character.wall_push_speed,
        );
        report.contacts = outcome.contacts;
        for (projectile, wall) in outcome.shattered {
            self.projectiles.release();
            report.score_delta += 1;
            for slot in [projectile, wall] {
                let entry = &self.bodies[slot];
                report.destroyed.push(DestroyedBody {
                    id: entry.id,
                    tag: entry.body.tag(),
                    cause: DestroyCause::Impact,
                });
            }
            log::info!(
                "projectile {} destroyed wall {}",
                self.bodies[projectile].id,
                self.bodies[wall].id
            );
        }

        // Removal
        let mut flags = removed.into_iter();
        self.bodies.retain(|_| !flags.next().unwrap_or(false));

        // Integration
        for entry in &mut self.bodies {
            entry.body.advance(dt);
        }
        self.time += dt;

        Ok(report)
    }

    /// Blend one body between its previous and current pose.
    ///
    /// Stores the result as the body's drawn transform and returns it.
    pub fn interpolated_pose(&mut self, id: BodyId, alpha: f32) -> Result<Mat4, WorldError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PhysicsError::AlphaOutOfRange(alpha).into());
        }
        Ok(self.body_mut(id)?.blend(alpha))
    }

    /// Blend every body with the same factor, clamped to `[0, 1]`.
    pub fn blend_all(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        for entry in &mut self.bodies {
            entry.body.blend(alpha);
        }
    }

    /// Draw records for every live body, in body order.
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.bodies
            .iter()
            .map(|entry| BodyInstance::from_body(&entry.body))
            .collect()
    }

    fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(ActiveBody { id, body });
        id
    }

    fn launch_projectile(&mut self, report: &mut StepReport) {
        let Some(character) = self
            .bodies
            .iter()
            .find(|entry| entry.body.tag() == BodyTag::Character)
        else {
            log::warn!("fire requested but the world has no character");
            return;
        };

        let Some(projectile) = self.projectiles.fire(&character.body, self.facing, &self.config) else {
            log::debug!(
                "projectile budget spent ({}/{})",
                self.projectiles.active_count(),
                self.projectiles.max_projectiles
            );
            return;
        };

        let id = self.insert(projectile);
        log::debug!("fired projectile {} facing {:?}", id, self.facing);
        report.spawned.push((id, BodyTag::Projectile));
    }
}
