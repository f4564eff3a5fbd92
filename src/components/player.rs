//! Player marker and pose state.

use bevy_ecs::prelude::Component;

/// Marker for the one player entity.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Discrete movement pose evaluated every tick.
///
/// `grounded` and `obstructed_above` come from the (out-of-scope) physics
/// probes; the demo loop uses a flat floor and lets tests set the overhead
/// flag directly. Everything else is derived in
/// [`crate::systems::playerstate`].
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlayerPose {
    pub grounded: bool,
    pub was_grounded: bool,
    pub jumping: bool,
    /// Crouched, either static or crawling.
    pub prone: bool,
    /// Moving while crouched.
    pub crawling: bool,
    /// Something solid overhead; standing up is blocked.
    pub obstructed_above: bool,
    /// Horizontal motion state last tick, for walk/idle edge detection.
    pub was_moving: bool,
    /// Set when an external change (ability lock, finished stand-up)
    /// requires the standing animation to be re-evaluated.
    pub needs_anim_refresh: bool,
}

impl PlayerPose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the refresh request.
    pub fn take_anim_refresh(&mut self) -> bool {
        std::mem::take(&mut self.needs_anim_refresh)
    }
}
