//! Sprite display surface.
//!
//! The renderer is an external collaborator; this component is the narrow
//! interface it reads. The playback system writes the current sprite key
//! here at the end of every tick.

use bevy_ecs::prelude::Component;

use crate::resources::animationstore::SpriteKey;

/// What the (out-of-process) renderer should draw for this entity.
#[derive(Component, Clone, Debug, Default)]
pub struct Sprite {
    /// Current sprite, `None` before any animation has played.
    pub key: Option<SpriteKey>,
    /// Mirror horizontally (facing left).
    pub flip_h: bool,
}

impl Sprite {
    pub fn new() -> Self {
        Self::default()
    }
}
