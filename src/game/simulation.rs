//! Fixed-step simulation driver.
//!
//! Real frame time (scaled, then clamped) feeds an accumulator that is
//! drained in whole world steps. The leftover fraction becomes the blend
//! factor every body is drawn with until the next frame.

use crate::game::config::ArenaConfig;
use crate::game::world::{StepInput, StepReport, World, WorldError};

/// Factor applied by [`Simulation::speed_up`] and [`Simulation::slow_down`].
pub const TIME_SCALE_FACTOR: f32 = 5.0;

/// Result of one rendered frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// World steps taken this frame
    pub steps: u32,
    /// Blend factor applied after stepping, in `[0, 1)`
    pub alpha: f32,
    /// Combined report of every step taken
    pub report: StepReport,
}

/// Owns the world and the fixed-step clock.
pub struct Simulation {
    world: World,
    fixed_dt: f32,
    max_frame_time: f32,
    time_scale: f32,
    accumulator: f32,
    steps_taken: u64,
    pending_fire: bool,
}

impl Simulation {
    /// Create a simulation over an empty world.
    pub fn new(config: ArenaConfig) -> Result<Self, WorldError> {
        let (fixed_dt, max_frame_time, time_scale) =
            (config.fixed_dt, config.max_frame_time, config.time_scale);
        Ok(Self {
            world: World::new(config)?,
            fixed_dt,
            max_frame_time,
            time_scale,
            accumulator: 0.0,
            steps_taken: 0,
            pending_fire: false,
        })
    }

    /// The simulated world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulated world, for commands and direct spawns.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Fixed step length in seconds.
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Current multiplier on real frame time.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Total world steps since creation.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Seconds of simulated time waiting to be stepped.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Run the simulation faster.
    pub fn speed_up(&mut self) {
        self.time_scale *= TIME_SCALE_FACTOR;
        log::info!("time scale now {}", self.time_scale);
    }

    /// Run the simulation slower.
    pub fn slow_down(&mut self) {
        self.time_scale /= TIME_SCALE_FACTOR;
        log::info!("time scale now {}", self.time_scale);
    }

    /// Ask for a projectile on the next world step.
    ///
    /// Repeated requests before that step collapse into one.
    pub fn request_fire(&mut self) {
        self.pending_fire = true;
    }

    /// Advance by one rendered frame of `frame_seconds` real time.
    ///
    /// Negative or NaN frame times count as zero. After stepping, every body
    /// is blended with the leftover fraction so the next frame's contacts
    /// see current drawn transforms.
    pub fn simulate(
        &mut self,
        frame_seconds: f32,
        target_body_count: usize,
        session_running: bool,
    ) -> Result<FrameReport, WorldError> {
        let frame = (frame_seconds * self.time_scale).max(0.0);
        self.accumulator += frame.min(self.max_frame_time);

        let mut frame_report = FrameReport::default();
        while self.accumulator >= self.fixed_dt {
            let input = StepInput {
                target_body_count,
                fire: std::mem::take(&mut self.pending_fire),
                session_running,
            };
            let report = self.world.step(self.fixed_dt, &input)?;
            frame_report.report.absorb(report);

            self.accumulator -= self.fixed_dt;
            self.steps_taken += 1;
            frame_report.steps += 1;
        }

        frame_report.alpha = self.accumulator / self.fixed_dt;
        self.world.blend_all(frame_report.alpha);

        if frame_report.steps > 0 {
            log::trace!(
                "frame: {} steps, alpha {:.3}, {} bodies",
                frame_report.steps,
                frame_report.alpha,
                self.world.len()
            );
        }
        Ok(frame_report)
    }
}
