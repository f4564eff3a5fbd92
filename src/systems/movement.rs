//! Player movement and the demo floor probe.
//!
//! Movement is platformer-style direct velocity control, gated by the
//! abilities the player has assembled and scaled by their quality
//! multipliers. Real collision resolution is an external collaborator; the
//! flat floor probe here is just enough to keep the headless demo and the
//! tests grounded.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::body::{Body, MOVE_EPSILON};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerPose};
use crate::components::sprite::Sprite;
use crate::resources::abilities::{Abilities, Ability};
use crate::resources::clock::Clock;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::playback::Playback;

/// Apply input-driven velocity and gravity to the player body.
///
/// Contract
/// - Walking needs the walk ability, an upright pose, and no stand-up
///   transition in flight; speed scales with walk quality.
/// - Crawling needs the crawl ability and a crouched, crawling pose; crawl
///   quality affects the collider elsewhere, not the speed.
/// - Jumping needs the jump ability, ground underfoot, an upright pose and
///   no transition lock; the impulse reaches `jump_height * quality`.
pub fn apply_player_movement(
    input: Res<InputState>,
    abilities: Res<Abilities>,
    playback: Res<Playback>,
    config: Res<GameConfig>,
    clock: Res<Clock>,
    mut query: Query<(&mut Body, &mut PlayerPose, &mut Sprite), With<Player>>,
) {
    let locked = playback.is_transition_locked();
    for (mut body, mut pose, mut sprite) in query.iter_mut() {
        if body.frozen {
            continue;
        }

        let dir = input.horizontal();
        let can_walk_now = abilities.can(Ability::Walk) && !pose.prone && !locked;
        let can_crawl_now =
            abilities.can(Ability::Crawl) && pose.prone && pose.crawling && !locked;

        if dir.abs() > MOVE_EPSILON {
            if can_crawl_now {
                body.velocity.x = dir * config.crawl_speed;
            } else if can_walk_now {
                body.velocity.x = dir * config.walk_speed * abilities.quality(Ability::Walk);
            } else {
                if pose.prone && !abilities.can(Ability::Crawl) {
                    debug!("can't move while prone without the crawl ability");
                }
                body.halt_horizontal();
            }
            if body.is_moving_horizontally() {
                sprite.flip_h = dir < 0.0;
            }
        } else {
            body.halt_horizontal();
        }

        if input.jump.just_pressed
            && abilities.can(Ability::Jump)
            && pose.grounded
            && !pose.prone
            && !locked
        {
            let height = config.jump_height * abilities.quality(Ability::Jump);
            body.velocity.y = (2.0 * config.gravity * body.gravity_scale * height).sqrt();
            pose.jumping = true;
        }

        body.velocity.y -= config.gravity * body.gravity_scale * clock.delta;
    }
}

/// Integrate positions from velocities.
pub fn integrate_positions(clock: Res<Clock>, mut query: Query<(&mut MapPosition, &Body)>) {
    for (mut position, body) in query.iter_mut() {
        if body.frozen {
            continue;
        }
        position.pos += body.velocity * clock.delta;
    }
}

/// Flat-floor ground probe for the headless demo.
///
/// Clamps the player onto the floor plane, zeroes downward velocity on
/// contact, and maintains the grounded/landing flags the pose machine and
/// animation selector read. Landing clears the jump state and requests an
/// animation re-evaluation.
pub fn probe_floor(
    config: Res<GameConfig>,
    mut query: Query<(&mut MapPosition, &mut Body, &mut PlayerPose), With<Player>>,
) {
    for (mut position, mut body, mut pose) in query.iter_mut() {
        pose.was_grounded = pose.grounded;
        if position.pos.y <= config.floor_y && body.velocity.y <= 0.0 {
            position.pos.y = config.floor_y;
            body.velocity.y = 0.0;
            pose.grounded = true;
        } else {
            pose.grounded = false;
        }
        if pose.grounded && !pose.was_grounded {
            pose.jumping = false;
            pose.needs_anim_refresh = true;
        }
    }
}
