//! Frame pickup messages.
//!
//! Trigger volumes live in the (out-of-scope) level; whoever detects the
//! overlap writes a [`FrameCollected`] message and the pickup system folds
//! it into the inventory.

use bevy_ecs::message::Message;

use crate::resources::animationstore::Frame;

/// The player touched a frame pickup.
#[derive(Message, Debug, Clone)]
pub struct FrameCollected {
    pub frame: Frame,
}
