//! Browser bindings
//!
//! A thin `wasm-bindgen` wrapper over [`GameSession`]. The page drives it
//! from `requestAnimationFrame`, forwards key presses as method calls and
//! uploads [`RasenganGame::instance_data`] to its own instance buffer.

use wasm_bindgen::prelude::*;

use crate::game::{ArenaConfig, CharacterCommand, GameSession};
use crate::render::instance_bytes;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One arena plus its scoring session.
#[wasm_bindgen]
pub struct RasenganGame {
    session: GameSession,
}

#[wasm_bindgen]
impl RasenganGame {
    /// Build a game from an optional JSON config (defaults otherwise).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RasenganGame, JsError> {
        let config = match config_json {
            Some(json) => ArenaConfig::from_json_str(&json)?,
            None => ArenaConfig::default(),
        };
        Ok(RasenganGame {
            session: GameSession::new(config)?,
        })
    }

    /// Begin a timed run.
    pub fn start(&mut self, player: &str) {
        self.session.start(player);
    }

    /// Advance by one animation frame. Returns the final score on the frame
    /// the run ends.
    pub fn tick(&mut self, frame_seconds: f32) -> Result<Option<u32>, JsError> {
        let tick = self.session.tick(frame_seconds)?;
        Ok(tick.outcome.map(|outcome| outcome.score))
    }

    pub fn fire(&mut self) {
        self.session.fire();
    }

    pub fn jump(&mut self) -> Result<(), JsError> {
        Ok(self.session.command(CharacterCommand::Jump)?)
    }

    pub fn move_left(&mut self) -> Result<(), JsError> {
        Ok(self.session.command(CharacterCommand::MoveLeft)?)
    }

    pub fn move_right(&mut self) -> Result<(), JsError> {
        Ok(self.session.command(CharacterCommand::MoveRight)?)
    }

    pub fn stop(&mut self) -> Result<(), JsError> {
        Ok(self.session.command(CharacterCommand::Stop)?)
    }

    pub fn next_collider(&mut self) {
        self.session.simulation_mut().world_mut().colliders_mut().next();
    }

    pub fn previous_collider(&mut self) {
        self.session.simulation_mut().world_mut().colliders_mut().previous();
    }

    pub fn speed_up(&mut self) {
        self.session.simulation_mut().speed_up();
    }

    pub fn slow_down(&mut self) {
        self.session.simulation_mut().slow_down();
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[wasm_bindgen(getter)]
    pub fn time_left(&self) -> f32 {
        self.session.time_left()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.session.is_running()
    }

    /// Packed 80-byte instance records for every live body.
    pub fn instance_data(&self) -> Vec<u8> {
        let instances = self.session.simulation().world().instances();
        instance_bytes(&instances).to_vec()
    }

    /// Top `n` leaderboard entries as a JSON array of `[name, score]`.
    pub fn leaderboard_json(&self, n: usize) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.leaderboard().top(n))?)
    }
}
