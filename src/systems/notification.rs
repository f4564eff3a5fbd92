//! Notification banner advance.

use bevy_ecs::prelude::*;

use crate::resources::clock::Clock;
use crate::resources::notification::NotificationPanel;

/// Step the sliding banner by the frame delta.
pub fn advance_notification(clock: Res<Clock>, mut panel: ResMut<NotificationPanel>) {
    panel.advance(clock.delta);
}
