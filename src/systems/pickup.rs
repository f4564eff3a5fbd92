//! Frame pickup intake.
//!
//! Folds [`FrameCollected`] messages into the inventory and runs the
//! collection-complete check, firing [`SetCompleted`] the first time a
//! kind's full pattern is covered.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::notify::SetCompleted;
use crate::events::pickup::FrameCollected;
use crate::resources::animrules::AnimationRules;
use crate::resources::checker::CollectionChecker;
use crate::resources::inventory::FrameInventory;

/// Advance the ECS message queue for [`FrameCollected`] so same-tick readers
/// can observe writes.
pub fn pump_pickup_messages(mut msgs: ResMut<Messages<FrameCollected>>) {
    msgs.update();
}

/// Append collected frames to the inventory and check set completion.
pub fn collect_frames(
    mut reader: MessageReader<FrameCollected>,
    mut inventory: ResMut<FrameInventory>,
    rules: Res<AnimationRules>,
    mut checker: ResMut<CollectionChecker>,
    mut commands: Commands,
) {
    for msg in reader.read() {
        let kind = msg.frame.kind;
        info!("collected {kind} frame '{}'", msg.frame.ui_sprite);
        inventory.add(msg.frame.clone());
        if checker.mark_if_complete(kind, &rules, &inventory) {
            commands.trigger(SetCompleted { kind });
        }
    }
}
