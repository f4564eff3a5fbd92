//! Ability unlock/lock events and their observers.
//!
//! The editor emits these when a completed timeline registers or a broken
//! one unregisters. Movement reads the [`Abilities`] resource directly each
//! tick; the observers here handle the immediate side effects a flip
//! requires: correcting the player's pose when a capability disappears out
//! from under them, and nudging the animation selector.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::body::Body;
use crate::components::collider::ColliderShape;
use crate::components::player::PlayerPose;
use crate::resources::abilities::{Abilities, Ability};

/// An ability became available (again).
#[derive(Event, Debug, Clone, Copy)]
pub struct AbilityUnlocked {
    pub ability: Ability,
    /// Quality multiplier the ability will perform at.
    pub multiplier: f32,
}

/// An ability was revoked.
#[derive(Event, Debug, Clone, Copy)]
pub struct AbilityLocked {
    pub ability: Ability,
}

/// Observer: log the unlock and ask the animation selector to reconsider,
/// so e.g. a walk animation starts on the very next tick if the player is
/// already moving.
pub fn observe_ability_unlocked(
    trigger: On<AbilityUnlocked>,
    mut query: Query<&mut PlayerPose>,
) {
    let event = trigger.event();
    info!(
        "ability {} unlocked (x{:.2})",
        event.ability, event.multiplier
    );
    for mut pose in query.iter_mut() {
        pose.needs_anim_refresh = true;
    }
}

/// Observer: apply the pose corrections a lock demands.
///
/// Contract
/// - `Prone` locked while crouched and unobstructed: stand up, restore the
///   collider, re-evaluate animations. Obstructed players stay crouched.
/// - `Crawl` locked while crawling: stop the crawl motion but stay prone.
/// - `Walk` locked while walking upright: halt horizontal motion.
/// - `Jump` locked: flag only; an in-flight jump finishes ballistically.
pub fn observe_ability_locked(
    trigger: On<AbilityLocked>,
    abilities: Res<Abilities>,
    mut query: Query<(&mut PlayerPose, &mut Body, &mut ColliderShape)>,
) {
    let ability = trigger.event().ability;
    for (mut pose, mut body, mut collider) in query.iter_mut() {
        match ability {
            Ability::Prone => {
                if pose.prone && !pose.obstructed_above {
                    pose.prone = false;
                    pose.crawling = false;
                    *collider = ColliderShape::standing();
                    pose.needs_anim_refresh = true;
                } else if pose.prone {
                    debug!("prone locked under an obstruction, staying down");
                }
            }
            Ability::Crawl => {
                if pose.crawling {
                    pose.crawling = false;
                    body.halt_horizontal();
                    *collider = ColliderShape::crouched(abilities.quality(Ability::Prone));
                    pose.needs_anim_refresh = true;
                }
            }
            Ability::Walk => {
                if !pose.prone && body.is_moving_horizontally() {
                    body.halt_horizontal();
                    pose.needs_anim_refresh = true;
                }
            }
            Ability::Jump => {}
        }
    }
}
