//! Player animation selection.
//!
//! Decides, once per tick, which assembled animation should be on the
//! player: jump while airborne, crawl or prone while crouched, walk or idle
//! on the ground. Requests go through [`Playback::play`], whose restart
//! guard keeps a repeated selection from resetting the cycle.
//!
//! Selection is suspended entirely while the reverse stand-up transition is
//! in flight; playback re-requests an evaluation the tick it finishes.

use bevy_ecs::prelude::*;

use crate::components::body::Body;
use crate::components::player::{Player, PlayerPose};
use crate::resources::abilities::{Abilities, Ability};
use crate::resources::animationstore::{AnimationKind, AnimationStore};
use crate::resources::playback::Playback;

pub fn select_player_animation(
    store: Res<AnimationStore>,
    abilities: Res<Abilities>,
    mut playback: ResMut<Playback>,
    mut query: Query<(&mut PlayerPose, &Body), With<Player>>,
) {
    for (mut pose, body) in query.iter_mut() {
        if playback.is_transition_locked() {
            continue;
        }
        let moving = body.is_moving_horizontally();
        let refresh = pose.take_anim_refresh();

        if pose.jumping || (!pose.grounded && body.velocity.y != 0.0) {
            // airborne: hold the jump cycle, never swap mid-air
            if store.has(AnimationKind::Jump)
                && playback.active_kind() != Some(AnimationKind::Jump)
            {
                playback.play(&store, AnimationKind::Jump, true, false);
            }
        } else if pose.prone {
            if pose.crawling && moving && store.has(AnimationKind::Crawl) {
                if playback.active_kind() != Some(AnimationKind::Crawl) {
                    playback.play(&store, AnimationKind::Crawl, false, false);
                }
            } else if store.has(AnimationKind::Prone)
                && (refresh || playback.active_kind() != Some(AnimationKind::Prone))
            {
                playback.play(&store, AnimationKind::Prone, false, false);
            }
        } else if pose.grounded {
            if moving && abilities.can(Ability::Walk) && store.has(AnimationKind::Walk) {
                if refresh
                    || !pose.was_moving
                    || playback.active_kind() != Some(AnimationKind::Walk)
                {
                    playback.play(&store, AnimationKind::Walk, false, false);
                }
            } else if !moving && store.has(AnimationKind::Idle) {
                if refresh
                    || pose.was_moving
                    || playback.active_kind() != Some(AnimationKind::Idle)
                {
                    playback.play(&store, AnimationKind::Idle, false, false);
                }
            }
        }

        pose.was_moving = moving;
    }
}
