//! Player controls
//!
//! Device handling lives outside the crate; whatever reads the keyboard or
//! touch screen turns it into [`CharacterCommand`]s for the world.

/// Direction the character last moved in. Projectiles leave this way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    /// Toward -X
    Left,
    /// Toward +X
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// A single control action applied to the character body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterCommand {
    /// Add the jump velocity, only while vertical velocity is exactly zero
    Jump,
    /// Face left and walk left
    MoveLeft,
    /// Face right and walk right
    MoveRight,
    /// Stop walking (facing is kept)
    Stop,
}
