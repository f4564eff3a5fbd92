//! Kinematic body for the player.
//!
//! Velocity is driven directly by the movement system (platformer-style
//! control, not force integration). Gravity pulls `velocity.y` down each
//! tick; the floor probe zeroes it on contact.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Threshold below which horizontal motion counts as standing still.
pub const MOVE_EPSILON: f32 = 0.1;

/// Kinematic body storing velocity in world units per second.
#[derive(Component, Clone, Copy, Debug)]
pub struct Body {
    pub velocity: Vec2,
    /// Scales the configured gravity for this body.
    pub gravity_scale: f32,
    /// When true the movement system leaves this body alone (used by the
    /// death/respawn collaborator).
    pub frozen: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            frozen: false,
        }
    }

    pub fn is_moving_horizontally(&self) -> bool {
        self.velocity.x.abs() > MOVE_EPSILON
    }

    /// Stop horizontal motion, preserving vertical velocity.
    pub fn halt_horizontal(&mut self) {
        self.velocity.x = 0.0;
    }
}
