//! Collected-frame inventory.
//!
//! Frames picked up in the level sit here until the player drags them onto
//! the timeline. The inventory owns its frames; moving one onto a slot takes
//! it out of the list, clearing a slot puts it back.

use bevy_ecs::prelude::Resource;
use log::warn;

use crate::resources::animationstore::{AnimationKind, Frame, SpriteKey};

/// Frames collected but not yet placed on a timeline.
#[derive(Resource, Debug, Default)]
pub struct FrameInventory {
    frames: Vec<Frame>,
}

impl FrameInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Remove and return the frame at `index`; a stale index is a no-op.
    pub fn take(&mut self, index: usize) -> Option<Frame> {
        if index >= self.frames.len() {
            warn!(
                "inventory take with stale index {index} (len {})",
                self.frames.len()
            );
            return None;
        }
        Some(self.frames.remove(index))
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn of_kind(&self, kind: AnimationKind) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.kind == kind)
    }

    /// Whether any held frame of `kind` shows this UI sprite.
    pub fn has_sprite(&self, kind: AnimationKind, sprite: &SpriteKey) -> bool {
        self.of_kind(kind).any(|f| &f.ui_sprite == sprite)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
