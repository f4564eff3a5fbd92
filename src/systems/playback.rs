//! Playback advance and sprite write.
//!
//! Runs late in the tick: advances the active animation by the frame delta
//! and copies the staged sprite onto the player's [`Sprite`] surface, so the
//! renderer always sees the frame chosen *this* tick. When the reverse
//! stand-up sequence finishes, flags the pose for an animation
//! re-evaluation on the next tick.

use bevy_ecs::prelude::*;

use crate::components::player::{Player, PlayerPose};
use crate::components::sprite::Sprite;
use crate::resources::clock::Clock;
use crate::resources::playback::Playback;

pub fn advance_playback(
    clock: Res<Clock>,
    mut playback: ResMut<Playback>,
    mut query: Query<(&mut Sprite, &mut PlayerPose), With<Player>>,
) {
    let outcome = playback.advance(clock.delta);
    for (mut sprite, mut pose) in query.iter_mut() {
        if let Some(staged) = playback.sprite() {
            if sprite.key.as_ref() != Some(staged) {
                sprite.key = Some(staged.clone());
            }
        }
        if outcome.reevaluate_pose {
            pose.needs_anim_refresh = true;
        }
    }
}
