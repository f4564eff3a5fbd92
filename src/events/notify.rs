//! Collection-complete notification event.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::animationstore::AnimationKind;
use crate::resources::notification::NotificationPanel;

/// Every frame of `kind`'s canonical pattern is now in the inventory.
/// Fired at most once per kind per session.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetCompleted {
    pub kind: AnimationKind,
}

/// Observer: start the sliding banner for the completed kind.
pub fn observe_set_completed(
    trigger: On<SetCompleted>,
    mut panel: Option<ResMut<NotificationPanel>>,
) {
    if let Some(panel) = panel.as_deref_mut() {
        panel.show(trigger.event().kind);
    } else {
        log::warn!("SetCompleted fired without a NotificationPanel resource");
    }
}
