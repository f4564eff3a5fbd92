//! Player pose transitions.
//!
//! Evaluates crouch enter/leave and crawl state from the current input and
//! abilities. Standing up from prone plays the prone animation in reverse
//! (the "get up" sequence) and engages the playback transition lock so
//! nothing interrupts it.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::body::MOVE_EPSILON;
use crate::components::collider::ColliderShape;
use crate::components::player::{Player, PlayerPose};
use crate::resources::abilities::{Abilities, Ability};
use crate::resources::animationstore::{AnimationKind, AnimationStore};
use crate::resources::input::InputState;
use crate::resources::playback::Playback;

/// Update prone/crawl pose from input, correcting the collider as we go.
pub fn update_player_state(
    input: Res<InputState>,
    abilities: Res<Abilities>,
    store: Res<AnimationStore>,
    mut playback: ResMut<Playback>,
    mut query: Query<(&mut PlayerPose, &mut ColliderShape), With<Player>>,
) {
    for (mut pose, mut collider) in query.iter_mut() {
        let can_prone = abilities.can(Ability::Prone) && pose.grounded;
        let crouch_pressed = input.crouch.just_pressed && can_prone;
        let crouch_held = input.crouch.active && can_prone;

        if crouch_pressed && !pose.prone {
            pose.prone = true;
            *collider = ColliderShape::crouched(abilities.quality(Ability::Prone));
        } else if !crouch_held && pose.prone {
            if pose.obstructed_above {
                debug!("can't stand up, obstruction above");
            } else {
                pose.prone = false;
                pose.crawling = false;
                *collider = ColliderShape::standing();
                // play the get-up sequence backwards; falls back to a plain
                // animation re-evaluation when no prone cycle is assembled
                if store.has(AnimationKind::Prone) {
                    playback.play(&store, AnimationKind::Prone, true, true);
                } else {
                    pose.needs_anim_refresh = true;
                }
            }
        }

        // crawling is "prone and moving", provided the ability is unlocked
        let moving_input = input.horizontal().abs() > MOVE_EPSILON;
        if pose.prone && abilities.can(Ability::Crawl) && moving_input {
            if !pose.crawling {
                pose.crawling = true;
                *collider = ColliderShape::crouched(abilities.quality(Ability::Crawl));
            }
        } else if pose.prone && pose.crawling {
            pose.crawling = false;
            *collider = ColliderShape::crouched(abilities.quality(Ability::Prone));
        }
    }
}
