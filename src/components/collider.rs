//! Player collider shape.
//!
//! Collision resolution itself is an external collaborator; this component
//! only publishes the shape it should use. Crouching shrinks the box, and
//! the assembly quality of the prone/crawl animation decides how far: a
//! sloppy assembly leaves a taller box that won't fit under tight gaps.

use bevy_ecs::prelude::Component;
use glam::Vec2;

const STANDING_SIZE: Vec2 = Vec2::new(0.78, 1.55);
const STANDING_OFFSET: Vec2 = Vec2::new(0.03, 0.0);

// Measured prone shapes: "perfect" is the fully flattened box, "poor" the
// barely-ducked one a bad assembly earns.
const PERFECT_PRONE_SIZE: Vec2 = Vec2::new(0.78, 0.53);
const PERFECT_PRONE_OFFSET: Vec2 = Vec2::new(0.03, -0.22);
const POOR_PRONE_SIZE: Vec2 = Vec2::new(0.78, 0.73);
const POOR_PRONE_OFFSET: Vec2 = Vec2::new(0.03, -0.12);

/// Axis-aligned collision box published for the physics collaborator.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ColliderShape {
    pub size: Vec2,
    pub offset: Vec2,
}

impl ColliderShape {
    /// The upright box.
    pub fn standing() -> Self {
        Self {
            size: STANDING_SIZE,
            offset: STANDING_OFFSET,
        }
    }

    /// The crouched box, interpolated from poor to perfect by `quality`.
    pub fn crouched(quality: f32) -> Self {
        let t = quality.clamp(0.0, 1.0);
        Self {
            size: POOR_PRONE_SIZE.lerp(PERFECT_PRONE_SIZE, t),
            offset: POOR_PRONE_OFFSET.lerp(PERFECT_PRONE_OFFSET, t),
        }
    }
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::standing()
    }
}
